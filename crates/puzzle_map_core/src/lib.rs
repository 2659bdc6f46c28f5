//! Core data structures for puzzle_map
//!
//! This crate provides the fundamental types for representing layered tile-puzzle levels:
//! - `Level` - A grid of cells plus the animation clock, player and camera regions
//! - `Cell` - A fixed array of layer slots, each holding at most one `Tile`
//! - `Tile` - A placed tile and its type-specific properties
//! - `TileType` - Immutable descriptor (name, layer, actor flag, defaults)
//! - `Direction` / `Layer` - Compass directions and the draw layers

mod cell;
mod direction;
mod layer;
mod level;
mod tile;
mod tile_type;

pub use cell::{Cell, CellPos};
pub use direction::{Direction, ALL_EDGES};
pub use layer::{Layer, LAYER_COUNT, SELECTABLE_LAYERS};
pub use level::{CameraRegion, Level, SharedLevel};
pub use tile::{Motion, Tile, TRACK_SHAPE_COUNT};
pub use tile_type::{tile_type, TileType, TILE_TYPES};
