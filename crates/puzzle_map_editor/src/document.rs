//! The level being edited, with its undo history and repaint bookkeeping

use std::collections::BTreeSet;

use puzzle_map_core::{tile_type, CellPos, Layer, SharedLevel, Tile};

use crate::commands::{AssignTilesCommand, CommandHistory, TileAssignment};
use crate::overlays::TilePropEditor;
use crate::EditorHost;

/// Concrete [`EditorHost`]: owns the undo history for one shared level
///
/// Assignments are staged until [`EditorHost::commit_undo`] turns them into a
/// single history entry. Cells touched by edits, undo or redo collect in a
/// dirty set that the host drains when it repaints.
pub struct MapDocument {
    level: SharedLevel,
    history: CommandHistory,
    staged: AssignTilesCommand,
    dirty_cells: BTreeSet<CellPos>,
}

impl MapDocument {
    pub fn new(level: SharedLevel) -> Self {
        Self {
            level,
            history: CommandHistory::default(),
            staged: AssignTilesCommand::default(),
            dirty_cells: BTreeSet::new(),
        }
    }

    pub fn level(&self) -> &SharedLevel {
        &self.level
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Whether assignments are waiting for a commit
    pub fn has_staged_changes(&self) -> bool {
        !self.staged.is_empty()
    }

    pub fn dirty_cells(&self) -> &BTreeSet<CellPos> {
        &self.dirty_cells
    }

    /// Drain the set of cells needing a repaint
    pub fn take_dirty_cells(&mut self) -> BTreeSet<CellPos> {
        std::mem::take(&mut self.dirty_cells)
    }

    /// Place a new tile of the named type, staging it for undo
    ///
    /// The tile gets its type's defaults plus any the property editor adds.
    /// Returns `false` for an unknown type or a position outside the level.
    pub fn place_tile(&mut self, pos: CellPos, name: &str) -> bool {
        let Some(ty) = tile_type(name) else {
            bevy::log::warn!("MapDocument::place_tile: unknown tile type {:?}", name);
            return false;
        };
        if self.level.read().cell_at(pos).is_none() {
            return false;
        }
        let mut tile = Tile::new(ty);
        TilePropEditor::configure_tile_defaults(&mut tile);
        let old = self.tile_at(pos, ty.layer);
        self.assign_tile(pos, ty.layer, Some(tile), old);
        true
    }

    /// Revert the last committed transaction
    ///
    /// Anything still staged is committed first so it can be undone too.
    pub fn undo(&mut self) -> bool {
        self.commit_undo();
        let Some(description) = self.history.undo_description() else {
            return false;
        };
        bevy::log::info!("Undo: {}", description);
        let cells = self.history.undo(&mut self.level.write());
        self.dirty_cells.extend(cells);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(description) = self.history.redo_description() else {
            return false;
        };
        bevy::log::info!("Redo: {}", description);
        let cells = self.history.redo(&mut self.level.write());
        self.dirty_cells.extend(cells);
        true
    }
}

impl EditorHost for MapDocument {
    fn tile_at(&self, pos: CellPos, layer: Layer) -> Option<Tile> {
        self.level
            .read()
            .cell_at(pos)
            .and_then(|cell| cell.get(layer).cloned())
    }

    fn mark_cell_dirty(&mut self, pos: CellPos) {
        self.dirty_cells.insert(pos);
    }

    fn store_tile(&mut self, pos: CellPos, layer: Layer, tile: Option<Tile>) {
        if let Some(cell) = self.level.write().cell_at_mut(pos) {
            cell.set(layer, tile);
        }
    }

    fn assign_tile(&mut self, pos: CellPos, layer: Layer, new: Option<Tile>, old: Option<Tile>) {
        self.store_tile(pos, layer, new.clone());
        self.staged.push(TileAssignment {
            pos,
            layer,
            old,
            new,
        });
        self.mark_cell_dirty(pos);
    }

    fn commit_undo(&mut self) {
        if self.staged.is_empty() {
            return;
        }
        let command = std::mem::take(&mut self.staged);
        self.history.push_undo(Box::new(command));
    }
}
