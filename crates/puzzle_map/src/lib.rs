//! # puzzle_map
//!
//! Viewport rendering and tile property editing for layered tile-puzzle levels.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use puzzle_map::prelude::*;
//!
//! fn main() {
//!     let level = Level::filled(32, 32, "floor").into_shared();
//!     let mut renderer = ViewportRenderer::new(tileset, None);
//!     renderer.set_level(level.clone());
//!
//!     App::new()
//!         .add_plugins(PuzzleMapPlugins)
//!         .insert_resource(renderer)
//!         .insert_resource(MapEditor::new(level))
//!         .run();
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`core`] - Levels, cells, tiles and tile types
//! - [`render`] - The viewport renderer, camera math and tilesets
//! - [`editor`] - Edit sessions, property editors, cell inspector and undo history

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

/// Core data types for layered levels.
pub mod core {
    pub use puzzle_map_core::*;
}

pub use puzzle_map_core::{
    tile_type, CameraRegion, Cell, CellPos, Direction, Layer, Level, Motion, SharedLevel, Tile,
    TileType,
};

/// Viewport rendering.
pub mod render {
    pub use puzzle_map_render::*;
}

pub use puzzle_map_render::{
    AtlasTileset, Perception, TilePart, TileSprite, Tileset, ViewportRenderPlugin,
    ViewportRenderer,
};

/// Tile editing.
pub mod editor {
    pub use puzzle_map_editor::*;
}

pub use puzzle_map_editor::{
    CellInspector, EditorHost, EditorPreferences, MapDocument, MapEditor, TileEditorPlugin,
    TilePropEditor,
};

/// Adds [`ViewportRenderPlugin`] and [`TileEditorPlugin`]
pub struct PuzzleMapPlugins;

impl PluginGroup for PuzzleMapPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(ViewportRenderPlugin)
            .add(TileEditorPlugin)
    }
}

/// Prelude for convenient imports.
///
/// ```rust,ignore
/// use puzzle_map::prelude::*;
/// ```
pub mod prelude {
    pub use crate::PuzzleMapPlugins;

    pub use crate::{CameraRegion, CellPos, Layer, Level, SharedLevel, Tile};

    pub use crate::{AtlasTileset, Perception, Tileset, ViewportRenderPlugin, ViewportRenderer};

    pub use crate::{CellInspector, EditorPreferences, MapEditor, TileEditorPlugin, TilePropEditor};
}
