//! Railroad editor: track shapes and the active switch

use puzzle_map_core::{CellPos, Tile, TRACK_SHAPE_COUNT};

use super::{ChangeCallback, TileEditSession};
use crate::EditorHost;

/// Display order of the track controls: straight pieces first, then the curves in a circle
pub const TRACK_ORDER: [u8; TRACK_SHAPE_COUNT as usize] = [4, 1, 2, 5, 0, 3];

/// Edits `tracks` and `track_switch` independently
///
/// The switch may name a shape that isn't laid; no cross-check is made.
pub struct RailroadTileEditor {
    session: TileEditSession,
    tracks: u8,
    track_switch: Option<u8>,
}

impl RailroadTileEditor {
    pub fn edit(tile: Tile, cell: Option<CellPos>, on_change: Option<ChangeCallback>) -> Self {
        let tracks = tile.tracks;
        let track_switch = tile.track_switch;
        Self {
            session: TileEditSession::edit(tile, cell, on_change),
            tracks,
            track_switch,
        }
    }

    pub fn session(&self) -> &TileEditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TileEditSession {
        &mut self.session
    }

    pub fn is_track_checked(&self, shape: u8) -> bool {
        shape < TRACK_SHAPE_COUNT && self.tracks & (1 << shape) != 0
    }

    pub fn selected_switch(&self) -> Option<u8> {
        self.track_switch
    }

    /// Lay or remove one track shape; out-of-range shapes are ignored
    pub fn set_track(&mut self, host: &mut dyn EditorHost, shape: u8, checked: bool) -> bool {
        if shape >= TRACK_SHAPE_COUNT {
            return false;
        }
        let bit = 1 << shape;
        if checked {
            self.tracks |= bit;
        } else {
            self.tracks &= !bit;
        }
        self.session.mutate(host, |tile| {
            if checked {
                tile.tracks |= bit;
            } else {
                tile.tracks &= !bit;
            }
        });
        true
    }

    /// Select the switch shape, or none
    pub fn set_track_switch(&mut self, host: &mut dyn EditorHost, shape: Option<u8>) -> bool {
        if shape.is_some_and(|s| s >= TRACK_SHAPE_COUNT) {
            return false;
        }
        self.track_switch = shape;
        self.session.mutate(host, |tile| tile.track_switch = shape);
        true
    }

    pub fn configure_tile_defaults(_tile: &mut Tile) {}
}
