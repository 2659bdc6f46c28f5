//! Level grid, animation clock and camera regions

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::{Cell, CellPos, Tile};

/// Rectangle (in tiles) that confines the camera while its anchor is inside it
///
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraRegion {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl CameraRegion {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Whether a fractional tile position lies inside the region
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left as f32
            && point.x < self.right as f32
            && point.y >= self.top as f32
            && point.y < self.bottom as f32
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// A level: a `size_x` × `size_y` grid of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub size_x: u32,
    pub size_y: u32,
    cells: Vec<Cell>,
    /// Animation clock, in tics
    pub tic_counter: f32,
    /// Cell whose actor is the player
    pub player: Option<CellPos>,
    pub camera_regions: Vec<CameraRegion>,
}

/// Number of cells in a grid, computed in `usize` so large grids cannot overflow
fn cell_count(size_x: u32, size_y: u32) -> usize {
    size_x as usize * size_y as usize
}

/// Row-major index of a cell
fn cell_index(size_x: u32, x: u32, y: u32) -> usize {
    y as usize * size_x as usize + x as usize
}

impl Level {
    /// Create a new level with every cell empty
    pub fn new(size_x: u32, size_y: u32) -> Self {
        Self {
            size_x,
            size_y,
            cells: vec![Cell::default(); cell_count(size_x, size_y)],
            tic_counter: 0.0,
            player: None,
            camera_regions: Vec::new(),
        }
    }

    /// Create a new level with every cell floored
    pub fn filled(size_x: u32, size_y: u32, terrain: &str) -> Self {
        let mut level = Self::new(size_x, size_y);
        if let Some(tile) = Tile::named(terrain) {
            for cell in &mut level.cells {
                cell.put(tile.clone());
            }
        }
        level
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.size_x || y >= self.size_y {
            return None;
        }
        Some(cell_index(self.size_x, x, y))
    }

    /// Get the cell at a position
    pub fn cell(&self, x: u32, y: u32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, x: u32, y: u32) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    pub fn cell_at(&self, pos: CellPos) -> Option<&Cell> {
        self.cell(pos.x, pos.y)
    }

    pub fn cell_at_mut(&mut self, pos: CellPos) -> Option<&mut Cell> {
        self.cell_mut(pos.x, pos.y)
    }

    /// Place a tile into its layer slot, returning the tile it replaced
    pub fn place(&mut self, pos: CellPos, tile: Tile) -> Option<Tile> {
        self.cell_at_mut(pos).and_then(|cell| cell.put(tile))
    }

    /// Place an actor and make it the player
    pub fn place_player(&mut self, pos: CellPos, player: Tile) {
        self.place(pos, player);
        self.player = Some(pos);
    }

    pub fn add_camera_region(&mut self, region: CameraRegion) {
        self.camera_regions.push(region);
    }

    /// Where the player is drawn at `tic_counter + tic_offset`, in fractional tiles
    ///
    /// Falls back to the player's cell when its actor has no motion.
    pub fn player_visual_position(&self, tic_offset: f32) -> Option<Vec2> {
        let pos = self.player?;
        let tic = self.tic_counter + tic_offset;
        let moving = self
            .cell_at(pos)
            .and_then(Cell::get_actor)
            .and_then(|actor| actor.visual_position(tic));
        Some(moving.unwrap_or(Vec2::new(pos.x as f32, pos.y as f32)))
    }

    /// Wrap this level for sharing between the renderer and the editor
    pub fn into_shared(self) -> SharedLevel {
        SharedLevel::new(self)
    }
}

/// A level shared between the renderer and the editor
///
/// Lock poisoning is ignored: a panic mid-edit leaves at worst a stale frame.
#[derive(Debug, Clone)]
pub struct SharedLevel(Arc<RwLock<Level>>);

impl SharedLevel {
    pub fn new(level: Level) -> Self {
        Self(Arc::new(RwLock::new(level)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Level> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Level> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether two handles refer to the same level
    pub fn ptr_eq(&self, other: &SharedLevel) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
