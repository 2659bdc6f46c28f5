//! puzzle_map_editor - Tile property editing for puzzle_map levels
//!
//! This crate provides:
//! - A copy-on-write edit session with one undo transaction per edit
//! - Property editors for letter, hint, frame block, thin wall and railroad tiles
//! - A cell inspector with per-layer thumbnails
//! - Undo/redo history over a shared level
//! - Persisted viewport preferences
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use puzzle_map_editor::{MapEditor, TileEditorPlugin};
//!
//! App::new()
//!     .add_plugins(TileEditorPlugin)
//!     .insert_resource(MapEditor::new(level.clone()))
//!     .run();
//! ```

pub mod commands;
mod document;
mod editor;
mod host;
pub mod inspector;
pub mod overlays;
pub mod preferences;

pub use document::MapDocument;
pub use editor::MapEditor;
pub use host::EditorHost;
pub use inspector::{CellInspector, InspectorAction, PointerButton};
pub use overlays::{ChangeCallback, TileEditSession, TilePropEditor, TilePropKind};
pub use preferences::{EditorPreferences, PreferencesError};

use bevy::prelude::*;
use puzzle_map_render::ViewportRenderer;

/// Plugin for the tile editor
///
/// Loads [`EditorPreferences`], keeps the viewport renderer in sync with them
/// and delivers queued edit notifications once per frame.
pub struct TileEditorPlugin;

impl Plugin for TileEditorPlugin {
    fn build(&self, app: &mut App) {
        let preferences = EditorPreferences::load();
        bevy::log::info!("Loaded editor preferences");

        app.insert_resource(preferences)
            .add_systems(Update, (apply_preferences, dispatch_edit_notifications));
    }
}

/// Deliver change notifications queued during the previous frame's edits
fn dispatch_edit_notifications(editor: Option<ResMut<MapEditor>>) {
    if let Some(mut editor) = editor {
        editor.tick();
    }
}

/// Push changed preferences into the renderer
fn apply_preferences(
    preferences: Res<EditorPreferences>,
    renderer: Option<ResMut<ViewportRenderer>>,
) {
    let Some(mut renderer) = renderer else {
        return;
    };
    if preferences.is_changed() || renderer.is_added() {
        preferences.apply_to(&mut renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use puzzle_map_core::{CellPos, Layer, Level, Tile};
    use puzzle_map_render::{AtlasTileset, Perception};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_notifications_arrive_on_next_update() {
        let pos = CellPos::new(0, 0);
        let mut level = Level::new(1, 1);
        level.place(pos, Tile::named("hint").unwrap());
        let mut editor = MapEditor::new(level.into_shared());
        let tile = editor.document().tile_at(pos, Layer::Terrain).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ChangeCallback = Box::new(move |tile: &Tile, _: Option<CellPos>| {
            sink.lock().unwrap().push(tile.hint_text.clone());
        });
        editor.open_tile_prop_overlay(tile, Some(pos), Rect::default(), Some(callback));
        editor.with_overlay(|overlay, doc| {
            if let TilePropEditor::Hint(hint) = overlay {
                hint.set_text(doc, "look up");
            }
        });

        let mut app = App::new();
        app.add_systems(Update, dispatch_edit_notifications)
            .insert_resource(editor);
        assert!(seen.lock().unwrap().is_empty());
        app.update();
        assert_eq!(*seen.lock().unwrap(), vec!["look up".to_string()]);
    }

    #[test]
    fn test_preferences_reach_renderer() {
        let tileset = AtlasTileset::from_colors(2, &[("floor", Rgba([9, 9, 9, 255]))]);
        let renderer = ViewportRenderer::new(Arc::new(tileset), None);
        let preferences = EditorPreferences {
            perception: Perception::Xray,
            show_actor_bboxes: true,
            ..Default::default()
        };

        let mut app = App::new();
        app.add_systems(Update, apply_preferences)
            .insert_resource(preferences)
            .insert_resource(renderer);
        app.update();

        let renderer = app.world().resource::<ViewportRenderer>();
        assert_eq!(renderer.perception, Perception::Xray);
        assert!(renderer.show_actor_bboxes);

        app.world_mut()
            .resource_mut::<EditorPreferences>()
            .use_rewind_effect = true;
        app.update();
        assert!(app.world().resource::<ViewportRenderer>().use_rewind_effect);
    }
}
