//! Shared copy-on-write and undo protocol for tile property editors

use puzzle_map_core::{CellPos, Layer, Tile};

use crate::EditorHost;

/// Called after a tile has been edited, with the tile and the cell it lives in
pub type ChangeCallback = Box<dyn FnMut(&Tile, Option<CellPos>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Editing,
    /// `committed` is whether an undo transaction was written
    Closed { committed: bool },
}

/// One tile being edited
///
/// The session owns the working copy of the tile. On the first mutation it
/// snapshots the original as the pristine tile and writes the working copy
/// into the cell; on close, a single undo transaction from pristine to final
/// is committed. Change callbacks are queued rather than called inline, and
/// run when the owner calls [`TileEditSession::dispatch_notifications`].
///
/// A session without a cell edits a detached template tile (the palette
/// brush, say): nothing is written to the level and nothing is undoable.
pub struct TileEditSession {
    tile: Tile,
    pristine_tile: Option<Tile>,
    cell: Option<CellPos>,
    needs_undo_entry: bool,
    on_change: Option<ChangeCallback>,
    pending_notifications: usize,
    state: SessionState,
}

impl TileEditSession {
    pub fn edit(tile: Tile, cell: Option<CellPos>, on_change: Option<ChangeCallback>) -> Self {
        Self {
            tile,
            pristine_tile: None,
            cell,
            needs_undo_entry: false,
            on_change,
            pending_notifications: 0,
            state: SessionState::Editing,
        }
    }

    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    /// The tile as it was before the first mutation
    pub fn pristine_tile(&self) -> Option<&Tile> {
        self.pristine_tile.as_ref()
    }

    pub fn cell(&self) -> Option<CellPos> {
        self.cell
    }

    pub fn layer(&self) -> Layer {
        self.tile.ty.layer
    }

    /// Whether this is a detached tile with no cell
    pub fn is_template(&self) -> bool {
        self.cell.is_none()
    }

    pub fn needs_undo_entry(&self) -> bool {
        self.needs_undo_entry
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, SessionState::Closed { .. })
    }

    pub fn pending_notifications(&self) -> usize {
        self.pending_notifications
    }

    /// Announce that the tile is about to change
    ///
    /// Must run before every mutation. The first call captures the pristine
    /// tile and, for an attached tile, puts the working copy in the cell.
    pub fn mark_dirty(&mut self, host: &mut dyn EditorHost) {
        if self.pristine_tile.is_none() {
            self.pristine_tile = Some(self.tile.clone());
            if let Some(pos) = self.cell {
                host.store_tile(pos, self.layer(), Some(self.tile.clone()));
                self.needs_undo_entry = true;
            }
        }
        if let Some(pos) = self.cell {
            host.mark_cell_dirty(pos);
        }
        if self.on_change.is_some() {
            self.pending_notifications += 1;
        }
    }

    /// Mark dirty, apply `change` to the working tile, then write it back to the cell
    pub fn mutate<R>(&mut self, host: &mut dyn EditorHost, change: impl FnOnce(&mut Tile) -> R) -> R {
        self.mark_dirty(host);
        let result = change(&mut self.tile);
        if let Some(pos) = self.cell {
            host.store_tile(pos, self.layer(), Some(self.tile.clone()));
        }
        result
    }

    /// Run the change callback once per queued notification
    ///
    /// Returns how many notifications were delivered.
    pub fn dispatch_notifications(&mut self) -> usize {
        let count = std::mem::take(&mut self.pending_notifications);
        if let Some(callback) = self.on_change.as_mut() {
            for _ in 0..count {
                callback(&self.tile, self.cell);
            }
        }
        count
    }

    /// Finish editing, committing one undo transaction if anything changed
    ///
    /// Closing twice, or closing without a mutation, writes nothing.
    pub fn close(&mut self, host: &mut dyn EditorHost) -> bool {
        if self.is_closed() {
            return false;
        }
        let mut committed = false;
        if self.needs_undo_entry {
            if let Some(pos) = self.cell {
                host.assign_tile(
                    pos,
                    self.layer(),
                    Some(self.tile.clone()),
                    self.pristine_tile.clone(),
                );
                host.commit_undo();
                committed = true;
            }
            self.needs_undo_entry = false;
        }
        self.state = SessionState::Closed { committed };
        committed
    }

    /// Finish editing by erasing the tile from its cell instead of keeping it
    ///
    /// The undo transaction records the deletion, from the pristine tile (or
    /// the current one if it was never mutated) to nothing.
    pub fn close_as_deletion(&mut self, host: &mut dyn EditorHost) -> bool {
        if self.is_closed() {
            return false;
        }
        let Some(pos) = self.cell else {
            return self.close(host);
        };
        let old = self
            .pristine_tile
            .clone()
            .unwrap_or_else(|| self.tile.clone());
        host.assign_tile(pos, self.layer(), None, Some(old));
        host.commit_undo();
        self.needs_undo_entry = false;
        self.state = SessionState::Closed { committed: true };
        true
    }
}
