//! Compass directions and their edge bits

use serde::{Deserialize, Serialize};

/// Mask with every edge bit set
pub const ALL_EDGES: u8 = 0x0f;

/// One of the four compass directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, clockwise from north
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Bit used for this direction in edge and wire masks
    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            Direction::North => 0x01,
            Direction::East => 0x02,
            Direction::South => 0x04,
            Direction::West => 0x08,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// Directions whose bits are set in `mask`
    pub fn from_mask(mask: u8) -> impl Iterator<Item = Direction> {
        Self::ALL.into_iter().filter(move |d| mask & d.bit() != 0)
    }
}
