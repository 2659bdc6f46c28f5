//! Viewport rendering for puzzle_map levels
//!
//! Levels are drawn into an owned raster surface (`image::RgbaImage`) by
//! [`ViewportRenderer`]. Tile artwork comes from a [`Tileset`], which splits
//! each tile into one or more [`TilePart`] blits.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use puzzle_map_render::{ViewportRenderPlugin, ViewportRenderer};
//!
//! App::new()
//!     .add_plugins(ViewportRenderPlugin)
//!     .insert_resource(ViewportRenderer::new(tileset, None))
//!     .run();
//! ```

pub mod camera;
mod perception;
mod renderer;
pub mod surface;
mod tileset;

pub use perception::{tile_perception, Perception};
pub use renderer::{
    blit_tiles, draw_tile_type, tileset_blitter, ViewportRenderer, DEFAULT_VIEWPORT_SIZE,
};
pub use tileset::{AtlasTileset, TilePart, TileSprite, Tileset};

use bevy::prelude::*;

/// Plugin that redraws the [`ViewportRenderer`] resource every frame
pub struct ViewportRenderPlugin;

impl Plugin for ViewportRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, redraw_viewport);
    }
}

/// Redraw the viewport if a renderer exists and has a level bound
fn redraw_viewport(renderer: Option<ResMut<ViewportRenderer>>) {
    let Some(mut renderer) = renderer else {
        return;
    };
    if renderer.level().is_some() {
        renderer.draw(0.0);
    }
}
