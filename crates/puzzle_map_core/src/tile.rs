//! Placed tiles and actor motion

use std::collections::BTreeSet;

use bevy::math::Vec2;

use crate::{Direction, TileType};

/// Number of railroad track shapes (one bit each in `Tile::tracks`)
pub const TRACK_SHAPE_COUNT: u8 = 6;

/// Movement of an actor between two cells, interpolated over tics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Position (in tiles) the move started from
    pub from: Vec2,
    /// Position (in tiles) the move ends at
    pub to: Vec2,
    /// Tic at which the move started
    pub start_tic: f32,
    /// Length of the move in tics
    pub duration: f32,
}

impl Motion {
    pub fn new(from: Vec2, to: Vec2, start_tic: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            start_tic,
            duration,
        }
    }

    /// A motion that has already finished at `position`
    pub fn stationary(position: Vec2) -> Self {
        Self::new(position, position, 0.0, 0.0)
    }

    /// Fractional position at the given tic
    pub fn position_at(&self, tic: f32) -> Vec2 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = ((tic - self.start_tic) / self.duration).clamp(0.0, 1.0);
        self.from.lerp(self.to, t)
    }
}

/// A tile placed in (or destined for) a cell
///
/// Fields beyond `ty` only carry meaning for the tile types that use them;
/// the rest keep their zero values.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub ty: &'static TileType,
    /// Glyph drawn over a letter floor
    pub overlaid_glyph: String,
    /// Text shown by a hint tile
    pub hint_text: String,
    /// Arrows on a frame block
    pub arrows: BTreeSet<Direction>,
    /// Edge bitmask of a thin or one-way wall (see `Direction::bit`)
    pub edges: u8,
    /// Railroad track shapes, one bit per shape
    pub tracks: u8,
    /// Railroad track shape the switch currently selects
    pub track_switch: Option<u8>,
    pub wire_directions: u8,
    pub wire_tunnel_directions: u8,
    /// Smooth movement, only present on live actors
    pub motion: Option<Motion>,
}

impl Tile {
    /// Create a tile of the given type with its defaults populated
    pub fn new(ty: &'static TileType) -> Self {
        let mut tile = Self::bare(ty);
        (ty.populate_defaults)(&mut tile);
        tile
    }

    /// Create a tile of the given type with every field zeroed
    pub fn bare(ty: &'static TileType) -> Self {
        Self {
            ty,
            overlaid_glyph: String::new(),
            hint_text: String::new(),
            arrows: BTreeSet::new(),
            edges: 0,
            tracks: 0,
            track_switch: None,
            wire_directions: 0,
            wire_tunnel_directions: 0,
            motion: None,
        }
    }

    /// Create a tile by type name
    pub fn named(name: &str) -> Option<Self> {
        crate::tile_type(name).map(Self::new)
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = Some(motion);
        self
    }

    /// Interpolated position, if this tile is a moving actor
    pub fn visual_position(&self, tic: f32) -> Option<Vec2> {
        self.motion.map(|m| m.position_at(tic))
    }

    /// Whether any wire or wire tunnel runs through this tile
    pub fn has_wiring(&self) -> bool {
        (self.wire_directions | self.wire_tunnel_directions) != 0
    }

    pub fn has_track(&self, shape: u8) -> bool {
        shape < TRACK_SHAPE_COUNT && self.tracks & (1 << shape) != 0
    }
}
