//! Draw layers of a cell

use serde::{Deserialize, Serialize};

/// Number of layer slots in every cell
pub const LAYER_COUNT: usize = 8;

/// A layer slot of a cell, in draw order (lowest first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Terrain,
    Item,
    ItemMod,
    Actor,
    Vfx,
    Swivel,
    ThinWall,
    Canopy,
}

/// Layers the cell inspector lets a user pick, in display order
pub const SELECTABLE_LAYERS: [Layer; 7] = [
    Layer::Terrain,
    Layer::Item,
    Layer::ItemMod,
    Layer::Actor,
    Layer::Swivel,
    Layer::ThinWall,
    Layer::Canopy,
];

impl Layer {
    /// Every layer in draw order
    pub const ALL: [Layer; LAYER_COUNT] = [
        Layer::Terrain,
        Layer::Item,
        Layer::ItemMod,
        Layer::Actor,
        Layer::Vfx,
        Layer::Swivel,
        Layer::ThinWall,
        Layer::Canopy,
    ];

    /// Slot index within a cell
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Identifier used by editor UI
    pub fn ident(self) -> &'static str {
        match self {
            Layer::Terrain => "terrain",
            Layer::Item => "item",
            Layer::ItemMod => "item_mod",
            Layer::Actor => "actor",
            Layer::Vfx => "vfx",
            Layer::Swivel => "swivel",
            Layer::ThinWall => "thin_wall",
            Layer::Canopy => "canopy",
        }
    }
}
