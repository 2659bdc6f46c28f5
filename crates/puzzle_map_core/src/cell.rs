//! Grid cells holding one tile per layer

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::{Layer, Tile, LAYER_COUNT};

/// Position of a cell in the level grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub x: u32,
    pub y: u32,
}

impl CellPos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// One grid cell: a slot per layer, each empty or holding a tile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    layers: [Option<Tile>; LAYER_COUNT],
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tile on the given layer
    pub fn get(&self, layer: Layer) -> Option<&Tile> {
        self.layers[layer.index()].as_ref()
    }

    pub fn get_mut(&mut self, layer: Layer) -> Option<&mut Tile> {
        self.layers[layer.index()].as_mut()
    }

    /// Put a tile into the slot its type claims, returning whatever it replaced
    pub fn put(&mut self, tile: Tile) -> Option<Tile> {
        let layer = tile.ty.layer;
        self.layers[layer.index()].replace(tile)
    }

    /// Overwrite a slot directly
    pub fn set(&mut self, layer: Layer, tile: Option<Tile>) -> Option<Tile> {
        std::mem::replace(&mut self.layers[layer.index()], tile)
    }

    /// Empty a slot
    pub fn take(&mut self, layer: Layer) -> Option<Tile> {
        self.layers[layer.index()].take()
    }

    /// Whether any occupied slot matches the predicate
    pub fn some(&self, mut predicate: impl FnMut(&Tile) -> bool) -> bool {
        self.layers.iter().flatten().any(|tile| predicate(tile))
    }

    /// The actor-layer tile, if present
    pub fn get_actor(&self) -> Option<&Tile> {
        self.get(Layer::Actor)
    }

    /// Occupied slots, lowest layer first
    pub fn iter(&self) -> impl Iterator<Item = (Layer, &Tile)> {
        Layer::ALL
            .into_iter()
            .zip(self.layers.iter())
            .filter_map(|(layer, slot)| slot.as_ref().map(|tile| (layer, tile)))
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(Option::is_none)
    }
}

impl Index<Layer> for Cell {
    type Output = Option<Tile>;

    fn index(&self, layer: Layer) -> &Self::Output {
        &self.layers[layer.index()]
    }
}

impl IndexMut<Layer> for Cell {
    fn index_mut(&mut self, layer: Layer) -> &mut Self::Output {
        &mut self.layers[layer.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_replaces_same_layer() {
        let mut cell = Cell::new();
        assert!(cell.put(Tile::named("floor").unwrap()).is_none());
        let replaced = cell.put(Tile::named("water").unwrap()).unwrap();
        assert_eq!(replaced.ty.name, "floor");
        assert_eq!(cell.get(Layer::Terrain).unwrap().ty.name, "water");
        assert_eq!(cell.iter().count(), 1);
    }

    #[test]
    fn test_some_and_get_actor() {
        let mut cell = Cell::new();
        cell.put(Tile::named("floor").unwrap());
        assert!(cell.get_actor().is_none());
        assert!(!cell.some(|t| t.ty.is_actor));

        cell.put(Tile::named("dirt_block").unwrap());
        assert_eq!(cell.get_actor().unwrap().ty.name, "dirt_block");
        assert!(cell.some(|t| t.ty.is_actor));
    }

    #[test]
    fn test_iter_is_in_layer_order() {
        let mut cell = Cell::new();
        cell.put(Tile::named("canopy").unwrap());
        cell.put(Tile::named("floor").unwrap());
        cell.put(Tile::named("chip").unwrap());
        let layers: Vec<_> = cell.iter().map(|(layer, _)| layer).collect();
        assert_eq!(layers, vec![Layer::Terrain, Layer::Item, Layer::Canopy]);
    }

    #[test]
    fn test_take_and_index() {
        let mut cell = Cell::new();
        cell.put(Tile::named("thin_walls").unwrap());
        assert!(cell[Layer::ThinWall].is_some());
        cell.take(Layer::ThinWall);
        assert!(cell[Layer::ThinWall].is_none());
        assert!(cell.is_empty());
    }
}
