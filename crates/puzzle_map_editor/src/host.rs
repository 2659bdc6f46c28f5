//! The editor surface that tile edit sessions talk to

use puzzle_map_core::{CellPos, Layer, Tile};

/// Operations a tile edit session needs from the editor that owns the level
///
/// Sessions never touch the undo history directly: they stage tile
/// assignments and then ask the host to commit them as one transaction.
pub trait EditorHost {
    /// Tile currently in a cell's layer slot
    fn tile_at(&self, pos: CellPos, layer: Layer) -> Option<Tile>;

    /// Note that a cell's appearance is stale; repainting is up to the host
    fn mark_cell_dirty(&mut self, pos: CellPos);

    /// Overwrite a layer slot without recording anything for undo
    fn store_tile(&mut self, pos: CellPos, layer: Layer, tile: Option<Tile>);

    /// Replace a layer slot, staging `old -> new` in the pending undo transaction
    fn assign_tile(&mut self, pos: CellPos, layer: Layer, new: Option<Tile>, old: Option<Tile>);

    /// Push the staged transaction onto the undo history
    fn commit_undo(&mut self);

    /// Remove the tile on a layer, staging the removal
    fn erase_tile(&mut self, pos: CellPos, layer: Layer) {
        let old = self.tile_at(pos, layer);
        if old.is_some() {
            self.assign_tile(pos, layer, None, old);
        }
    }
}
