//! Letter floor editor: picks the glyph drawn over the tile

use puzzle_map_core::{CellPos, Tile};

use super::{ChangeCallback, TileEditSession};
use crate::EditorHost;

/// Arrow glyphs, one appended after each row of 16 characters
pub const ARROW_GLYPHS: [char; 4] = ['⬆', '➡', '⬇', '⬅'];

/// Every glyph a letter tile can show, in picker order
///
/// ASCII 32 through 95, with an arrow after each character ending a row
/// (47, 63, 79 and 95).
pub fn letter_glyphs() -> Vec<String> {
    let mut glyphs = Vec::with_capacity(68);
    for code in 32u8..96 {
        glyphs.push(char::from(code).to_string());
        if code % 16 == 15 {
            let row = usize::from((code - 47) / 16);
            glyphs.push(ARROW_GLYPHS[row].to_string());
        }
    }
    glyphs
}

pub struct LetterTileEditor {
    session: TileEditSession,
    selected_glyph: String,
}

impl LetterTileEditor {
    pub fn edit(tile: Tile, cell: Option<CellPos>, on_change: Option<ChangeCallback>) -> Self {
        let selected_glyph = tile.overlaid_glyph.clone();
        Self {
            session: TileEditSession::edit(tile, cell, on_change),
            selected_glyph,
        }
    }

    pub fn session(&self) -> &TileEditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TileEditSession {
        &mut self.session
    }

    pub fn selected_glyph(&self) -> &str {
        &self.selected_glyph
    }

    /// Pick a glyph from [`letter_glyphs`]; anything else is ignored
    pub fn select_glyph(&mut self, host: &mut dyn EditorHost, glyph: &str) -> bool {
        if !letter_glyphs().iter().any(|g| g == glyph) {
            return false;
        }
        self.selected_glyph = glyph.to_string();
        self.session
            .mutate(host, |tile| tile.overlaid_glyph = glyph.to_string());
        true
    }

    pub fn configure_tile_defaults(tile: &mut Tile) {
        (tile.ty.populate_defaults)(tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapDocument;
    use puzzle_map_core::{Layer, Level};

    #[test]
    fn test_glyph_list() {
        let glyphs = letter_glyphs();
        assert_eq!(glyphs.len(), 68);
        assert_eq!(glyphs[0], " ");
        assert_eq!(glyphs[15], "/");
        assert_eq!(glyphs[16], "⬆");
        assert_eq!(glyphs[17], "0");
        assert_eq!(glyphs[67], "⬅");
        assert_eq!(glyphs[66], "_");
    }

    #[test]
    fn test_select_glyph() {
        let pos = CellPos::new(0, 0);
        let mut level = Level::new(1, 1);
        level.place(pos, Tile::named("floor_letter").unwrap());
        let mut doc = MapDocument::new(level.into_shared());
        let tile = doc.tile_at(pos, Layer::Terrain).unwrap();

        let mut editor = LetterTileEditor::edit(tile, Some(pos), None);
        assert_eq!(editor.selected_glyph(), "?");
        assert!(!editor.select_glyph(&mut doc, "a"));
        assert!(!editor.session().needs_undo_entry());

        assert!(editor.select_glyph(&mut doc, "➡"));
        assert_eq!(doc.tile_at(pos, Layer::Terrain).unwrap().overlaid_glyph, "➡");
        assert!(editor.session_mut().close(&mut doc));
    }
}
