//! Frame block editor: one arrow toggle per direction

use std::collections::BTreeSet;

use puzzle_map_core::{CellPos, Direction, Tile};

use super::{ChangeCallback, TileEditSession};
use crate::EditorHost;

pub struct FrameBlockTileEditor {
    session: TileEditSession,
    checked: BTreeSet<Direction>,
}

impl FrameBlockTileEditor {
    pub fn edit(tile: Tile, cell: Option<CellPos>, on_change: Option<ChangeCallback>) -> Self {
        let checked = tile.arrows.clone();
        Self {
            session: TileEditSession::edit(tile, cell, on_change),
            checked,
        }
    }

    pub fn session(&self) -> &TileEditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TileEditSession {
        &mut self.session
    }

    pub fn is_checked(&self, direction: Direction) -> bool {
        self.checked.contains(&direction)
    }

    pub fn set_arrow(&mut self, host: &mut dyn EditorHost, direction: Direction, checked: bool) {
        if checked {
            self.checked.insert(direction);
        } else {
            self.checked.remove(&direction);
        }
        self.session.mutate(host, |tile| {
            if checked {
                tile.arrows.insert(direction);
            } else {
                tile.arrows.remove(&direction);
            }
        });
    }

    pub fn configure_tile_defaults(_tile: &mut Tile) {}
}
