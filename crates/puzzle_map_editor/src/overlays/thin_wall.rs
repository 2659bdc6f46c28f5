//! Thin wall and one-way wall editor: one toggle per edge

use puzzle_map_core::{CellPos, Direction, Tile};

use super::{ChangeCallback, TileEditSession};
use crate::EditorHost;

pub struct ThinWallTileEditor {
    session: TileEditSession,
    checked: u8,
}

impl ThinWallTileEditor {
    pub fn edit(tile: Tile, cell: Option<CellPos>, on_change: Option<ChangeCallback>) -> Self {
        let checked = tile.edges;
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
        self.checked & direction.bit() != 0
    }

    /// Toggle one edge, returning the resulting state of its checkbox
    ///
    /// A template tile keeps at least one edge: clearing its last one is
    /// reverted and leaves the tile untouched.
    pub fn set_edge(&mut self, host: &mut dyn EditorHost, direction: Direction, checked: bool) -> bool {
        let bit = direction.bit();
        if !checked && self.session.is_template() && self.session.tile().edges == bit {
            self.checked |= bit;
            return true;
        }
        if checked {
            self.checked |= bit;
        } else {
            self.checked &= !bit;
        }
        self.session.mutate(host, |tile| {
            if checked {
                tile.edges |= bit;
            } else {
                tile.edges &= !bit;
            }
        });
        checked
    }

    /// Close the session, erasing an attached tile left without edges
    pub fn close(&mut self, host: &mut dyn EditorHost) -> bool {
        if !self.session.is_template() && self.session.tile().edges == 0 {
            return self.session.close_as_deletion(host);
        }
        self.session.close(host)
    }

    pub fn configure_tile_defaults(_tile: &mut Tile) {}
}
