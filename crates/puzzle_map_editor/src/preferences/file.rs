//! Reading and writing the viewport preferences JSON file
//!
//! The file lives in the per-user config directory. Loading never fails the
//! editor: anything unreadable falls back to defaults with a warning.

use super::EditorPreferences;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug)]
pub enum PreferencesError {
    /// The file or its directory could not be read or written
    IoError { path: PathBuf, message: String },
    /// The file is not valid preferences JSON
    ParseError { path: PathBuf, message: String },
    SerializeError(String),
    /// No home directory to put a config directory in
    NoConfigDir,
}

impl PreferencesError {
    fn io(path: &Path, err: std::io::Error) -> Self {
        PreferencesError::IoError {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferencesError::IoError { path, message } => {
                write!(f, "IO error on {}: {}", path.display(), message)
            }
            PreferencesError::ParseError { path, message } => {
                write!(f, "Parse error in {}: {}", path.display(), message)
            }
            PreferencesError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            PreferencesError::NoConfigDir => write!(f, "No config directory for puzzle_map_editor"),
        }
    }
}

impl std::error::Error for PreferencesError {}

impl EditorPreferences {
    /// Per-user config directory of `puzzle_map_editor`
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "puzzle_map", "puzzle_map_editor")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn preferences_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(PREFERENCES_FILE))
    }

    /// Load the user's viewport preferences, or defaults if they cannot be read
    pub fn load() -> Self {
        let loaded = Self::preferences_path()
            .ok_or(PreferencesError::NoConfigDir)
            .and_then(|path| Self::load_from(&path));
        match loaded {
            Ok(prefs) => prefs,
            Err(e) => {
                bevy::log::warn!("Viewport preferences unavailable ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Load preferences from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, PreferencesError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| PreferencesError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| PreferencesError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write preferences to the user's config directory
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = Self::preferences_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Write preferences to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| PreferencesError::io(dir, e))?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PreferencesError::SerializeError(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| PreferencesError::io(path, e))?;

        bevy::log::info!("Saved viewport preferences to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_map_render::Perception;

    #[test]
    fn test_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(PREFERENCES_FILE);
        let prefs = EditorPreferences {
            viewport_size_x: 13,
            perception: Perception::Xray,
            use_rewind_effect: true,
            ..Default::default()
        };
        prefs.save_to(&path).unwrap();
        assert_eq!(EditorPreferences::load_from(&path).unwrap(), prefs);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = EditorPreferences::load_from(&dir.path().join(PREFERENCES_FILE)).unwrap();
        assert_eq!(prefs, EditorPreferences::default());
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        let err = EditorPreferences::load_from(&path).unwrap_err();
        assert!(matches!(&err, PreferencesError::ParseError { path: p, .. } if *p == path));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_save_reports_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "a file, not a directory").unwrap();
        let err = EditorPreferences::default()
            .save_to(&blocker.join(PREFERENCES_FILE))
            .unwrap_err();
        assert!(matches!(&err, PreferencesError::IoError { path, .. } if *path == blocker));
    }
}
