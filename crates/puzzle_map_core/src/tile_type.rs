//! Tile type descriptors

use std::fmt;

use crate::{Direction, Layer, Tile};

/// Immutable description of a kind of tile
///
/// Tiles hold a `&'static TileType`; two tiles have the same type when their
/// descriptors have the same name.
pub struct TileType {
    /// Unique identifier, e.g. `"thin_walls"`
    pub name: &'static str,
    /// Layer slot this type occupies in a cell
    pub layer: Layer,
    /// Whether tiles of this type can move (and are drawn with smooth motion)
    pub is_actor: bool,
    /// Fills type-specific fields of a freshly created tile
    pub populate_defaults: fn(&mut Tile),
}

impl fmt::Debug for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileType")
            .field("name", &self.name)
            .field("layer", &self.layer)
            .field("is_actor", &self.is_actor)
            .finish_non_exhaustive()
    }
}

impl PartialEq for TileType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TileType {}

fn no_defaults(_tile: &mut Tile) {}

fn letter_defaults(tile: &mut Tile) {
    tile.overlaid_glyph = "?".to_string();
}

fn hint_defaults(tile: &mut Tile) {
    tile.hint_text.clear();
}

fn wall_edge_defaults(tile: &mut Tile) {
    tile.edges = Direction::South.bit();
}

fn railroad_defaults(tile: &mut Tile) {
    tile.tracks = 0;
    tile.track_switch = None;
}

fn frame_block_defaults(tile: &mut Tile) {
    tile.arrows.clear();
}

const fn terrain(name: &'static str, populate_defaults: fn(&mut Tile)) -> TileType {
    TileType {
        name,
        layer: Layer::Terrain,
        is_actor: false,
        populate_defaults,
    }
}

const fn actor(name: &'static str, populate_defaults: fn(&mut Tile)) -> TileType {
    TileType {
        name,
        layer: Layer::Actor,
        is_actor: true,
        populate_defaults,
    }
}

/// Every known tile type
pub static TILE_TYPES: &[TileType] = &[
    terrain("floor", no_defaults),
    terrain("wall", no_defaults),
    terrain("water", no_defaults),
    terrain("floor_letter", letter_defaults),
    terrain("hint", hint_defaults),
    terrain("railroad", railroad_defaults),
    TileType {
        name: "chip",
        layer: Layer::Item,
        is_actor: false,
        populate_defaults: no_defaults,
    },
    TileType {
        name: "key_blue",
        layer: Layer::Item,
        is_actor: false,
        populate_defaults: no_defaults,
    },
    TileType {
        name: "swivel_ne",
        layer: Layer::Swivel,
        is_actor: false,
        populate_defaults: no_defaults,
    },
    TileType {
        name: "thin_walls",
        layer: Layer::ThinWall,
        is_actor: false,
        populate_defaults: wall_edge_defaults,
    },
    TileType {
        name: "one_way_walls",
        layer: Layer::ThinWall,
        is_actor: false,
        populate_defaults: wall_edge_defaults,
    },
    TileType {
        name: "canopy",
        layer: Layer::Canopy,
        is_actor: false,
        populate_defaults: no_defaults,
    },
    actor("player", no_defaults),
    actor("dirt_block", no_defaults),
    actor("frame_block", frame_block_defaults),
];

/// Look up a tile type by name
pub fn tile_type(name: &str) -> Option<&'static TileType> {
    TILE_TYPES.iter().find(|ty| ty.name == name)
}
