//! Viewport renderer: draws the visible part of a level into a raster surface

use std::sync::Arc;

use bevy::math::{IVec2, Rect, UVec2, Vec2};
use bevy::prelude::Resource;
use image::{Rgba, RgbaImage};
use puzzle_map_core::{Layer, SharedLevel, Tile};

use crate::camera;
use crate::perception::tile_perception;
use crate::surface;
use crate::{Perception, TilePart, Tileset};

/// Viewport size used until a level says otherwise
pub const DEFAULT_VIEWPORT_SIZE: u32 = 9;

/// Colour of the debug actor boxes
const ACTOR_BBOX_COLOR: Rgba<u8> = Rgba([255, 0, 0, 0x44]);

/// Tics per cycle of the rewind effect
const REWIND_PERIOD: f32 = 20.0;

/// Renders a scrolling, layered view of a level into an owned surface
///
/// The host binds a level, then calls [`ViewportRenderer::draw`] once per
/// frame (and after edits). The camera follows the level's player.
#[derive(Resource)]
pub struct ViewportRenderer {
    tileset: Arc<dyn Tileset>,
    surface: RgbaImage,
    level: Option<SharedLevel>,
    viewport_size_x: u32,
    viewport_size_y: u32,
    viewport_x: f32,
    viewport_y: f32,
    viewport_dirty: bool,
    display_rect: Option<Rect>,
    /// Overlay a translucent box at each moving actor's exact position
    pub show_actor_bboxes: bool,
    /// Apply the horizontal-shear rewind effect after drawing
    pub use_rewind_effect: bool,
    /// Global perception mode; actors may override it per draw call
    pub perception: Perception,
}

impl ViewportRenderer {
    /// Create a renderer with a square viewport of `fixed_size` tiles, or 9×9
    pub fn new(tileset: Arc<dyn Tileset>, fixed_size: Option<u32>) -> Self {
        let size = fixed_size.unwrap_or(DEFAULT_VIEWPORT_SIZE);
        let surface = RgbaImage::new(tileset.size_x() * size, tileset.size_y() * size);
        Self {
            tileset,
            surface,
            level: None,
            viewport_size_x: size,
            viewport_size_y: size,
            viewport_x: 0.0,
            viewport_y: 0.0,
            viewport_dirty: false,
            display_rect: None,
            show_actor_bboxes: false,
            use_rewind_effect: false,
            perception: Perception::Normal,
        }
    }

    pub fn tileset(&self) -> &Arc<dyn Tileset> {
        &self.tileset
    }

    /// Bind the level to draw, replacing any previous one
    pub fn set_level(&mut self, level: SharedLevel) {
        self.level = Some(level);
    }

    pub fn level(&self) -> Option<&SharedLevel> {
        self.level.as_ref()
    }

    /// Change the viewport size; the surface is resized on the next draw
    pub fn set_viewport_size(&mut self, x: u32, y: u32) {
        self.viewport_size_x = x;
        self.viewport_size_y = y;
        self.viewport_dirty = true;
    }

    /// Viewport size in tiles
    pub fn viewport_size(&self) -> UVec2 {
        UVec2::new(self.viewport_size_x, self.viewport_size_y)
    }

    /// Top-left of the viewport from the last draw, in fractional tiles
    pub fn viewport_position(&self) -> Vec2 {
        Vec2::new(self.viewport_x, self.viewport_y)
    }

    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    /// Where the surface is shown in host display coordinates
    ///
    /// Until set, the surface is assumed to sit at the origin at 1:1 scale.
    pub fn set_display_rect(&mut self, rect: Rect) {
        self.display_rect = Some(rect);
    }

    fn display_rect(&self) -> Rect {
        self.display_rect.unwrap_or_else(|| {
            Rect::new(
                0.0,
                0.0,
                self.surface.width() as f32,
                self.surface.height() as f32,
            )
        })
    }

    /// Map a pointer position (display coordinates) to a fractional cell position
    pub fn real_cell_coords_from_event(&self, pointer: Vec2) -> Vec2 {
        let rect = self.display_rect();
        let surface_size = Vec2::new(self.surface.width() as f32, self.surface.height() as f32);
        let scale = rect.size() / surface_size;
        (pointer - rect.min) / scale / self.tileset.tile_size().as_vec2() + self.viewport_position()
    }

    /// Map a pointer position (display coordinates) to the cell under it
    ///
    /// Out-of-map results are returned as-is.
    pub fn cell_coords_from_event(&self, pointer: Vec2) -> IVec2 {
        self.real_cell_coords_from_event(pointer).floor().as_ivec2()
    }

    /// Copy a `w` × `h` tile block of the atlas at (`sx`, `sy`) to (`dx`, `dy`), all in tiles
    pub fn blit(&self, target: &mut RgbaImage, sx: f32, sy: f32, dx: f32, dy: f32, w: f32, h: f32) {
        blit_tiles(&*self.tileset, target, sx, sy, dx, dy, w, h);
    }

    /// Draw the level as seen `tic_offset` tics after its current tic
    pub fn draw(&mut self, tic_offset: f32) {
        let Some(shared) = self.level.clone() else {
            bevy::log::warn!("ViewportRenderer::draw: no level to render");
            return;
        };

        if self.viewport_dirty {
            self.viewport_dirty = false;
            self.surface = RgbaImage::new(
                self.tileset.size_x() * self.viewport_size_x,
                self.tileset.size_y() * self.viewport_size_y,
            );
        }

        let level = shared.read();
        let tic = level.tic_counter + tic_offset;
        let tile_px = self.tileset.tile_size();
        let viewport = self.viewport_size();
        let map = UVec2::new(level.size_x, level.size_y);
        surface::clear(&mut self.surface);

        let anchor = level.player_visual_position(tic_offset).unwrap_or(Vec2::ZERO);
        let origin = camera::camera_origin(anchor, viewport, map, &level.camera_regions, tile_px);
        self.viewport_x = origin.x;
        self.viewport_y = origin.y;

        let Some(range) = camera::draw_range(origin, viewport, map) else {
            return;
        };

        let tileset = Arc::clone(&self.tileset);
        // Layer by layer, so moving actors are never overdrawn by neighbouring terrain
        for layer in Layer::ALL {
            for x in range.x.clone() {
                for y in range.y.clone() {
                    let Some(cell) = level.cell(x, y) else {
                        continue;
                    };
                    let Some(tile) = cell.get(layer) else {
                        continue;
                    };

                    let position = actor_position(tile, tic, tile_px)
                        .unwrap_or(Vec2::new(x as f32, y as f32));
                    let perception = tile_perception(self.perception, cell, layer, tile);
                    let mut blit = tileset_blitter(&*tileset, &mut self.surface, position - origin);
                    tileset.draw(tile, tic, perception, &mut blit);
                }
            }
        }

        if self.show_actor_bboxes {
            for x in range.x.clone() {
                for y in range.y.clone() {
                    let Some(actor) = level.cell(x, y).and_then(|cell| cell.get_actor()) else {
                        continue;
                    };
                    // Unsnapped, to show any misalignment
                    let Some(position) = actor.visual_position(tic) else {
                        continue;
                    };
                    let corner = (position - origin) * tile_px.as_vec2();
                    surface::fill_rect_subpixel(
                        &mut self.surface,
                        corner.x,
                        corner.y,
                        tile_px.x,
                        tile_px.y,
                        ACTOR_BBOX_COLOR,
                    );
                }
            }
        }

        if self.use_rewind_effect {
            self.draw_rewind_effect(tic);
        }
    }

    /// Shift a few rows in four rolling bands, like a rewinding tape
    pub fn draw_rewind_effect(&mut self, tic: f32) {
        let height = self.surface.height();
        let phase = (tic / REWIND_PERIOD).rem_euclid(1.0);
        for band in 0..4 {
            let y = (height as f32 * (band as f32 + phase) / 4.0).floor() as u32;
            for dy in 1..5u32 {
                surface::shift_row_left(&mut self.surface, y + dy, dy * dy);
            }
        }
    }

    /// Render one tile type on its own, always fully revealed
    pub fn create_tile_type_canvas(&self, name: &str, tile: Option<&Tile>) -> RgbaImage {
        let mut canvas = RgbaImage::new(self.tileset.size_x(), self.tileset.size_y());
        draw_tile_type(&*self.tileset, name, tile, &mut canvas);
        canvas
    }

    /// Render one tile type into an existing thumbnail, replacing its contents
    pub fn draw_single_tile_type(&self, name: &str, tile: Option<&Tile>, target: &mut RgbaImage) {
        draw_tile_type(&*self.tileset, name, tile, target);
    }
}

/// Pixel-snapped position of a moving actor
fn actor_position(tile: &Tile, tic: f32, tile_px: UVec2) -> Option<Vec2> {
    if !tile.ty.is_actor {
        return None;
    }
    tile.visual_position(tic)
        .map(|position| camera::snap_to_pixels(position, tile_px))
}

/// Blit closure handed to a tileset, placing parts relative to `offset` (in tiles)
pub fn tileset_blitter<'a>(
    tileset: &'a dyn Tileset,
    target: &'a mut RgbaImage,
    offset: Vec2,
) -> impl FnMut(TilePart) + 'a {
    move |part: TilePart| {
        blit_tiles(
            tileset,
            target,
            part.tx + part.mx,
            part.ty + part.my,
            offset.x + part.mdx,
            offset.y + part.mdy,
            part.mw,
            part.mh,
        );
    }
}

/// Copy a block of the atlas, with every coordinate in tiles
pub fn blit_tiles(
    tileset: &dyn Tileset,
    target: &mut RgbaImage,
    sx: f32,
    sy: f32,
    dx: f32,
    dy: f32,
    w: f32,
    h: f32,
) {
    let px = tileset.tile_size().as_vec2();
    surface::blit_region(
        target,
        tileset.image(),
        (sx * px.x).round() as i64,
        (sy * px.y).round() as i64,
        (dx * px.x).round() as i64,
        (dy * px.y).round() as i64,
        (w * px.x).round() as u32,
        (h * px.y).round() as u32,
    );
}

/// Clear `target` and draw a single tile type into it with palette perception
pub fn draw_tile_type(tileset: &dyn Tileset, name: &str, tile: Option<&Tile>, target: &mut RgbaImage) {
    surface::clear(target);
    let mut blit = tileset_blitter(tileset, target, Vec2::ZERO);
    tileset.draw_type(name, tile, 0.0, Perception::Palette, &mut blit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AtlasTileset, TileSprite};
    use puzzle_map_core::{CameraRegion, CellPos, Level, Motion};

    const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);
    const YELLOW: Rgba<u8> = Rgba([255, 255, 0, 255]);
    const BROWN: Rgba<u8> = Rgba([120, 70, 20, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const PINK: Rgba<u8> = Rgba([255, 150, 200, 255]);

    fn test_tileset() -> Arc<dyn Tileset> {
        let tileset = AtlasTileset::from_colors(
            4,
            &[
                ("floor", GRAY),
                ("chip", YELLOW),
                ("dirt_block", BROWN),
                ("player", BLUE),
                ("dirt_block_revealed", PINK),
            ],
        )
        .with_sprite(
            "dirt_block",
            TileSprite::Plain {
                normal: UVec2::new(2, 0),
                revealed: Some(UVec2::new(4, 0)),
            },
        );
        Arc::new(tileset)
    }

    fn tile(name: &str) -> Tile {
        Tile::named(name).unwrap()
    }

    fn renderer_for(level: Level, size: u32) -> ViewportRenderer {
        let mut renderer = ViewportRenderer::new(test_tileset(), Some(size));
        renderer.set_level(level.into_shared());
        renderer
    }

    #[test]
    fn test_draw_without_level_is_a_no_op() {
        let mut renderer = ViewportRenderer::new(test_tileset(), None);
        renderer.draw(0.0);
        assert_eq!(renderer.viewport_position(), Vec2::ZERO);
        assert_eq!(renderer.surface().dimensions(), (36, 36));
    }

    #[test]
    fn test_camera_follows_player_within_map() {
        for (player, expected) in [((2, 2), 0.0), ((30, 30), 23.0), ((16, 16), 12.0)] {
            let mut level = Level::filled(32, 32, "floor");
            level.place_player(CellPos::new(player.0, player.1), tile("player"));
            let mut renderer = renderer_for(level, 9);
            renderer.draw(0.0);
            assert_eq!(renderer.viewport_position(), Vec2::splat(expected));
        }
    }

    #[test]
    fn test_camera_respects_regions() {
        let mut level = Level::filled(32, 32, "floor");
        level.place_player(CellPos::new(11, 19), tile("player"));
        level.add_camera_region(CameraRegion::new(10, 10, 22, 20));
        let mut renderer = renderer_for(level, 9);
        renderer.draw(0.0);
        assert_eq!(renderer.viewport_position(), Vec2::new(10.0, 11.0));
    }

    #[test]
    fn test_resize_waits_for_next_draw() {
        let mut renderer = renderer_for(Level::filled(8, 8, "floor"), 9);
        renderer.set_viewport_size(5, 3);
        assert_eq!(renderer.viewport_size(), UVec2::new(5, 3));
        assert_eq!(renderer.surface().dimensions(), (36, 36));
        renderer.draw(0.0);
        assert_eq!(renderer.surface().dimensions(), (20, 12));
    }

    #[test]
    fn test_moving_actor_is_drawn_over_neighbouring_terrain() {
        let mut level = Level::filled(4, 1, "floor");
        let block = tile("dirt_block").with_motion(Motion::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            0.0,
            2.0,
        ));
        level.place(CellPos::new(1, 0), block);
        let mut renderer = renderer_for(level, 4);
        renderer.draw(1.0);

        let surface = renderer.surface();
        assert_eq!(*surface.get_pixel(1, 1), GRAY);
        assert_eq!(*surface.get_pixel(3, 1), BROWN);
        assert_eq!(*surface.get_pixel(5, 1), BROWN);
        assert_eq!(*surface.get_pixel(6, 1), GRAY);
    }

    #[test]
    fn test_actor_perception_depends_on_what_is_beneath() {
        let mut level = Level::filled(2, 1, "floor");
        level.place(CellPos::new(0, 0), tile("dirt_block"));
        level.place(CellPos::new(1, 0), tile("chip"));
        level.place(CellPos::new(1, 0), tile("dirt_block"));
        let mut renderer = renderer_for(level, 2);
        renderer.perception = Perception::Xray;
        renderer.draw(0.0);

        assert_eq!(*renderer.surface().get_pixel(1, 1), BROWN);
        assert_eq!(*renderer.surface().get_pixel(5, 1), PINK);
    }

    #[test]
    fn test_cell_coords_account_for_display_scale() {
        let mut renderer = ViewportRenderer::new(test_tileset(), None);
        renderer.set_display_rect(Rect::new(100.0, 50.0, 172.0, 122.0));
        let pointer = Vec2::new(125.0, 97.0);
        assert_eq!(renderer.cell_coords_from_event(pointer), IVec2::new(3, 5));
        assert_eq!(renderer.real_cell_coords_from_event(pointer), Vec2::new(3.125, 5.875));

        let mut level = Level::filled(32, 32, "floor");
        level.place_player(CellPos::new(16, 16), tile("player"));
        renderer.set_level(level.into_shared());
        renderer.draw(0.0);
        assert_eq!(renderer.cell_coords_from_event(pointer), IVec2::new(15, 17));
    }

    #[test]
    fn test_tile_type_canvas_is_always_revealed() {
        let renderer = ViewportRenderer::new(test_tileset(), None);
        let canvas = renderer.create_tile_type_canvas("dirt_block", None);
        assert_eq!(canvas.dimensions(), (4, 4));
        assert_eq!(*canvas.get_pixel(2, 2), PINK);

        let mut thumb = RgbaImage::from_pixel(4, 4, BLUE);
        renderer.draw_single_tile_type("nothing", None, &mut thumb);
        assert_eq!(*thumb.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_rewind_effect_shears_rows() {
        let mut level = Level::filled(9, 9, "floor");
        for y in 0..9 {
            level.place(CellPos::new(1, y), tile("chip"));
        }
        let mut renderer = renderer_for(level, 9);
        renderer.draw(0.0);
        assert_eq!(*renderer.surface().get_pixel(3, 1), GRAY);

        renderer.use_rewind_effect = true;
        renderer.draw(0.0);
        let surface = renderer.surface();
        assert_eq!(*surface.get_pixel(3, 1), YELLOW);
        assert_eq!(*surface.get_pixel(0, 2), YELLOW);
        assert_eq!(*surface.get_pixel(3, 5), GRAY);
    }

    #[test]
    fn test_actor_bboxes_tint_moving_actors() {
        let mut level = Level::filled(3, 3, "floor");
        level.place(
            CellPos::new(1, 1),
            tile("dirt_block").with_motion(Motion::stationary(Vec2::new(1.0, 1.0))),
        );
        let mut renderer = renderer_for(level, 3);
        renderer.draw(0.0);
        assert_eq!(*renderer.surface().get_pixel(5, 5), BROWN);

        renderer.show_actor_bboxes = true;
        renderer.draw(0.0);
        let tinted = *renderer.surface().get_pixel(5, 5);
        assert_ne!(tinted, BROWN);
        assert!(tinted.0[0] > BROWN.0[0]);
        assert_eq!(*renderer.surface().get_pixel(1, 1), GRAY);
    }

    #[test]
    fn test_actor_bbox_shows_offset_from_snapped_sprite() {
        let mut level = Level::filled(4, 1, "floor");
        // an eighth of a tile is half a pixel at 4px tiles
        let block = tile("dirt_block").with_motion(Motion::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            0.0,
            8.0,
        ));
        level.place(CellPos::new(1, 0), block);
        let mut renderer = renderer_for(level, 4);
        renderer.show_actor_bboxes = true;
        renderer.draw(1.0);

        let surface = renderer.surface();
        // sprite snapped to pixel 1, box straddles pixels 0 and 4
        let edge = *surface.get_pixel(0, 1);
        assert_ne!(edge, GRAY);
        let inner = *surface.get_pixel(2, 1);
        let trailing = *surface.get_pixel(4, 1);
        assert_ne!(trailing, BROWN);
        assert!(trailing.0[0] < inner.0[0]);
        assert_eq!(*surface.get_pixel(5, 1), GRAY);
        assert!(edge.0[0] - GRAY.0[0] < inner.0[0] - BROWN.0[0]);
    }
}
