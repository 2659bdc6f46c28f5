//! Undo/redo history
//!
//! Every committed change to a level is an [`EditorCommand`]. Tile edits are
//! batched into an [`AssignTilesCommand`] while staged and pushed onto the
//! [`CommandHistory`] in one piece when the host commits.

use puzzle_map_core::{CellPos, Layer, Level, Tile};

/// Maximum number of undo steps kept
const MAX_HISTORY: usize = 100;

/// A reversible change to a level
pub trait EditorCommand: Send + Sync {
    /// Apply (or re-apply) the change
    fn execute(&self, level: &mut Level);
    /// Revert the change
    fn undo(&self, level: &mut Level);
    /// Human readable name, for menus
    fn description(&self) -> &str;
    /// Cells whose appearance changes when this command runs either way
    fn affected_cells(&self) -> Vec<CellPos>;
}

/// One layer slot going from `old` to `new`
#[derive(Debug, Clone, PartialEq)]
pub struct TileAssignment {
    pub pos: CellPos,
    pub layer: Layer,
    pub old: Option<Tile>,
    pub new: Option<Tile>,
}

impl TileAssignment {
    fn write(&self, level: &mut Level, tile: &Option<Tile>) {
        if let Some(cell) = level.cell_at_mut(self.pos) {
            cell.set(self.layer, tile.clone());
        }
    }
}

/// A batch of tile assignments undone and redone together
#[derive(Debug, Clone)]
pub struct AssignTilesCommand {
    assignments: Vec<TileAssignment>,
    description: String,
}

impl Default for AssignTilesCommand {
    fn default() -> Self {
        Self::new("Edit Tiles")
    }
}

impl AssignTilesCommand {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            assignments: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an assignment
    ///
    /// A slot assigned twice keeps its first `old` value, so undo restores what
    /// was there before the batch started.
    pub fn push(&mut self, assignment: TileAssignment) {
        if let Some(existing) = self
            .assignments
            .iter_mut()
            .find(|a| a.pos == assignment.pos && a.layer == assignment.layer)
        {
            existing.new = assignment.new;
        } else {
            self.assignments.push(assignment);
        }
    }

    pub fn assignments(&self) -> &[TileAssignment] {
        &self.assignments
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl EditorCommand for AssignTilesCommand {
    fn execute(&self, level: &mut Level) {
        for assignment in &self.assignments {
            assignment.write(level, &assignment.new);
        }
    }

    fn undo(&self, level: &mut Level) {
        for assignment in self.assignments.iter().rev() {
            assignment.write(level, &assignment.old);
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn affected_cells(&self) -> Vec<CellPos> {
        let mut cells: Vec<CellPos> = self.assignments.iter().map(|a| a.pos).collect();
        cells.sort();
        cells.dedup();
        cells
    }
}

/// Undo and redo stacks of committed commands
#[derive(Default)]
pub struct CommandHistory {
    undo_stack: Vec<Box<dyn EditorCommand>>,
    redo_stack: Vec<Box<dyn EditorCommand>>,
}

impl CommandHistory {
    /// Record a command that has already been applied
    pub fn push_undo(&mut self, command: Box<dyn EditorCommand>) {
        self.undo_stack.push(command);
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.description())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.description())
    }

    /// The most recent command, if any
    pub fn last(&self) -> Option<&dyn EditorCommand> {
        self.undo_stack.last().map(|c| c.as_ref())
    }

    /// Revert the most recent command, returning the cells it touched
    pub fn undo(&mut self, level: &mut Level) -> Vec<CellPos> {
        let Some(command) = self.undo_stack.pop() else {
            return Vec::new();
        };
        command.undo(level);
        let cells = command.affected_cells();
        self.redo_stack.push(command);
        cells
    }

    /// Re-apply the most recently undone command, returning the cells it touched
    pub fn redo(&mut self, level: &mut Level) -> Vec<CellPos> {
        let Some(command) = self.redo_stack.pop() else {
            return Vec::new();
        };
        command.execute(level);
        let cells = command.affected_cells();
        self.undo_stack.push(command);
        cells
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
