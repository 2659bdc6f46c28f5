//! Tileset abstraction and a simple atlas-backed implementation

use std::collections::HashMap;

use bevy::math::UVec2;
use image::{Rgba, RgbaImage};
use puzzle_map_core::{Direction, Tile};

use crate::Perception;

/// One blit request from a tileset, in tile units
///
/// Copies the `mw` × `mh` region at (`mx`, `my`) inside atlas tile (`tx`, `ty`)
/// to (`mdx`, `mdy`) relative to the tile being drawn. `TilePart::whole` covers
/// the common case of drawing an entire atlas tile aligned to the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePart {
    pub tx: f32,
    pub ty: f32,
    pub mx: f32,
    pub my: f32,
    pub mw: f32,
    pub mh: f32,
    pub mdx: f32,
    pub mdy: f32,
}

impl TilePart {
    /// The whole atlas tile at (`tx`, `ty`)
    pub fn whole(tx: f32, ty: f32) -> Self {
        Self::masked(tx, ty, 0.0, 0.0, 1.0, 1.0)
    }

    /// Part of an atlas tile, drawn at the same offset it has in the atlas
    pub fn masked(tx: f32, ty: f32, mx: f32, my: f32, mw: f32, mh: f32) -> Self {
        Self {
            tx,
            ty,
            mx,
            my,
            mw,
            mh,
            mdx: mx,
            mdy: my,
        }
    }

    /// Move the destination of this part
    pub fn at(mut self, mdx: f32, mdy: f32) -> Self {
        self.mdx = mdx;
        self.mdy = mdy;
        self
    }
}

/// Source of tile artwork
///
/// Implementations decide which atlas parts make up a tile and hand each
/// one to `blit`; the caller owns the destination surface and the camera offset.
pub trait Tileset: Send + Sync {
    /// Tile width in pixels
    fn size_x(&self) -> u32;
    /// Tile height in pixels
    fn size_y(&self) -> u32;
    /// The atlas image parts are copied from
    fn image(&self) -> &RgbaImage;

    /// Draw a tile type, optionally with a specific tile's properties
    fn draw_type(
        &self,
        name: &str,
        tile: Option<&Tile>,
        tic: f32,
        perception: Perception,
        blit: &mut dyn FnMut(TilePart),
    );

    /// Draw a placed tile
    fn draw(&self, tile: &Tile, tic: f32, perception: Perception, blit: &mut dyn FnMut(TilePart)) {
        self.draw_type(tile.ty.name, Some(tile), tic, perception, blit);
    }

    fn tile_size(&self) -> UVec2 {
        UVec2::new(self.size_x(), self.size_y())
    }
}

/// How a tile type maps onto atlas tiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileSprite {
    /// A single atlas tile, with an optional alternative shown when perception reveals secrets
    Plain {
        normal: UVec2,
        revealed: Option<UVec2>,
    },
    /// `frames` atlas tiles laid out left to right, one per tic
    Animated { first: UVec2, frames: u32 },
    /// One strip of the atlas tile per edge bit set on the tile
    Edges { tile: UVec2 },
}

impl TileSprite {
    pub fn plain(x: u32, y: u32) -> Self {
        TileSprite::Plain {
            normal: UVec2::new(x, y),
            revealed: None,
        }
    }
}

/// Thickness of a wall edge strip, in tiles
const EDGE_THICKNESS: f32 = 0.25;

/// A tileset backed by a single atlas image
pub struct AtlasTileset {
    image: RgbaImage,
    size_x: u32,
    size_y: u32,
    sprites: HashMap<String, TileSprite>,
}

impl AtlasTileset {
    pub fn new(image: RgbaImage, size_x: u32, size_y: u32) -> Self {
        Self {
            image,
            size_x,
            size_y,
            sprites: HashMap::new(),
        }
    }

    /// Build an atlas with one solid-colour tile per type, in a single row
    pub fn from_colors(tile_px: u32, colors: &[(&str, Rgba<u8>)]) -> Self {
        let width = tile_px * colors.len().max(1) as u32;
        let mut image = RgbaImage::new(width, tile_px);
        for (i, (_, color)) in colors.iter().enumerate() {
            let x0 = i as u32 * tile_px;
            for y in 0..tile_px {
                for x in x0..x0 + tile_px {
                    image.put_pixel(x, y, *color);
                }
            }
        }
        let mut tileset = Self::new(image, tile_px, tile_px);
        for (i, (name, _)) in colors.iter().enumerate() {
            tileset.set_sprite(name, TileSprite::plain(i as u32, 0));
        }
        tileset
    }

    pub fn with_sprite(mut self, name: &str, sprite: TileSprite) -> Self {
        self.set_sprite(name, sprite);
        self
    }

    pub fn set_sprite(&mut self, name: &str, sprite: TileSprite) {
        self.sprites.insert(name.to_string(), sprite);
    }

    pub fn sprite(&self, name: &str) -> Option<&TileSprite> {
        self.sprites.get(name)
    }
}

impl Tileset for AtlasTileset {
    fn size_x(&self) -> u32 {
        self.size_x
    }

    fn size_y(&self) -> u32 {
        self.size_y
    }

    fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn draw_type(
        &self,
        name: &str,
        tile: Option<&Tile>,
        tic: f32,
        perception: Perception,
        blit: &mut dyn FnMut(TilePart),
    ) {
        let Some(sprite) = self.sprites.get(name) else {
            return;
        };
        match *sprite {
            TileSprite::Plain { normal, revealed } => {
                let source = match revealed {
                    Some(revealed) if perception.reveals_hidden() => revealed,
                    _ => normal,
                };
                blit(TilePart::whole(source.x as f32, source.y as f32));
            }
            TileSprite::Animated { first, frames } => {
                let frame = if frames == 0 {
                    0
                } else {
                    tic.max(0.0).floor() as u32 % frames
                };
                blit(TilePart::whole((first.x + frame) as f32, first.y as f32));
            }
            TileSprite::Edges { tile: source } => {
                // A bare type (palette) shows every edge
                let edges = tile.map_or(puzzle_map_core::ALL_EDGES, |t| t.edges);
                let (tx, ty) = (source.x as f32, source.y as f32);
                let far = 1.0 - EDGE_THICKNESS;
                for direction in Direction::from_mask(edges) {
                    let part = match direction {
                        Direction::North => TilePart::masked(tx, ty, 0.0, 0.0, 1.0, EDGE_THICKNESS),
                        Direction::South => TilePart::masked(tx, ty, 0.0, far, 1.0, EDGE_THICKNESS),
                        Direction::West => TilePart::masked(tx, ty, 0.0, 0.0, EDGE_THICKNESS, 1.0),
                        Direction::East => TilePart::masked(tx, ty, far, 0.0, EDGE_THICKNESS, 1.0),
                    };
                    blit(part);
                }
            }
        }
    }
}
