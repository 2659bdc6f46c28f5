//! Hint tile editor: free text

use puzzle_map_core::{CellPos, Tile};

use super::{ChangeCallback, TileEditSession};
use crate::EditorHost;

pub struct HintTileEditor {
    session: TileEditSession,
    text: String,
}

impl HintTileEditor {
    pub fn edit(tile: Tile, cell: Option<CellPos>, on_change: Option<ChangeCallback>) -> Self {
        let text = tile.hint_text.clone();
        Self {
            session: TileEditSession::edit(tile, cell, on_change),
            text,
        }
    }

    pub fn session(&self) -> &TileEditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TileEditSession {
        &mut self.session
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the hint text; unchanged text is not an edit
    pub fn set_text(&mut self, host: &mut dyn EditorHost, text: &str) -> bool {
        self.text = text.to_string();
        if self.session.tile().hint_text == text {
            return false;
        }
        self.session
            .mutate(host, |tile| tile.hint_text = text.to_string());
        true
    }

    pub fn configure_tile_defaults(tile: &mut Tile) {
        tile.hint_text = String::new();
    }
}
