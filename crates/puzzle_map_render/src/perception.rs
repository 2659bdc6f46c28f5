//! How much of a level's hidden content gets drawn

use puzzle_map_core::{Cell, Layer, Tile};
use serde::{Deserialize, Serialize};

/// Perception mode passed to every tileset draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perception {
    /// What a player sees
    #[default]
    Normal,
    /// See-through view of what is under blocks
    Xray,
    /// Editor view, everything revealed
    Editor,
    /// Palette and thumbnails: a tile type always shows what it is
    Palette,
}

impl Perception {
    /// Whether hidden or disguised content is drawn as what it really is
    pub fn reveals_hidden(self) -> bool {
        self != Perception::Normal
    }
}

/// Perception to use for one tile of a cell
///
/// Actors only get the global mode when something interesting lies beneath them:
/// any lower-layer tile other than a plain, unwired floor. Otherwise they are drawn
/// normally so blocks stay clearly visible.
pub fn tile_perception(global: Perception, cell: &Cell, layer: Layer, tile: &Tile) -> Perception {
    if global == Perception::Normal || !tile.ty.is_actor {
        return global;
    }
    let something_beneath = cell.some(|under| {
        under.ty.layer < layer && !(under.ty.name == "floor" && !under.has_wiring())
    });
    if something_beneath {
        global
    } else {
        Perception::Normal
    }
}
