//! Tile property editors
//!
//! Each editable tile type has a variant editor built on a shared
//! [`TileEditSession`]. [`TilePropEditor`] dispatches on the tile type name.

mod frame_block;
mod hint;
mod letter;
mod railroad;
mod session;
mod thin_wall;

pub use frame_block::FrameBlockTileEditor;
pub use hint::HintTileEditor;
pub use letter::{letter_glyphs, LetterTileEditor, ARROW_GLYPHS};
pub use railroad::{RailroadTileEditor, TRACK_ORDER};
pub use session::{ChangeCallback, SessionState, TileEditSession};
pub use thin_wall::ThinWallTileEditor;

use puzzle_map_core::{CellPos, Tile};

use crate::EditorHost;

/// Which variant editor handles a tile type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilePropKind {
    Letter,
    Hint,
    FrameBlock,
    ThinWall,
    Railroad,
}

impl TilePropKind {
    /// Editor for a tile type name, if the type has editable properties
    pub fn for_type(name: &str) -> Option<Self> {
        match name {
            "floor_letter" => Some(Self::Letter),
            "hint" => Some(Self::Hint),
            "frame_block" => Some(Self::FrameBlock),
            "thin_walls" | "one_way_walls" => Some(Self::ThinWall),
            "railroad" => Some(Self::Railroad),
            _ => None,
        }
    }
}

/// An open property editor of any kind
pub enum TilePropEditor {
    Letter(LetterTileEditor),
    Hint(HintTileEditor),
    FrameBlock(FrameBlockTileEditor),
    ThinWall(ThinWallTileEditor),
    Railroad(RailroadTileEditor),
}

impl TilePropEditor {
    /// Whether tiles of this type have a property editor
    pub fn has_editor(name: &str) -> bool {
        TilePropKind::for_type(name).is_some()
    }

    /// Open the matching editor for a tile, or `None` if its type has no properties
    pub fn open(tile: Tile, cell: Option<CellPos>, on_change: Option<ChangeCallback>) -> Option<Self> {
        let editor = match TilePropKind::for_type(tile.ty.name)? {
            TilePropKind::Letter => Self::Letter(LetterTileEditor::edit(tile, cell, on_change)),
            TilePropKind::Hint => Self::Hint(HintTileEditor::edit(tile, cell, on_change)),
            TilePropKind::FrameBlock => {
                Self::FrameBlock(FrameBlockTileEditor::edit(tile, cell, on_change))
            }
            TilePropKind::ThinWall => {
                Self::ThinWall(ThinWallTileEditor::edit(tile, cell, on_change))
            }
            TilePropKind::Railroad => {
                Self::Railroad(RailroadTileEditor::edit(tile, cell, on_change))
            }
        };
        Some(editor)
    }

    /// Extra defaults a property editor applies to a freshly placed tile
    pub fn configure_tile_defaults(tile: &mut Tile) {
        match TilePropKind::for_type(tile.ty.name) {
            Some(TilePropKind::Letter) => LetterTileEditor::configure_tile_defaults(tile),
            Some(TilePropKind::Hint) => HintTileEditor::configure_tile_defaults(tile),
            Some(TilePropKind::FrameBlock) => FrameBlockTileEditor::configure_tile_defaults(tile),
            Some(TilePropKind::ThinWall) => ThinWallTileEditor::configure_tile_defaults(tile),
            Some(TilePropKind::Railroad) => RailroadTileEditor::configure_tile_defaults(tile),
            None => {}
        }
    }

    pub fn kind(&self) -> TilePropKind {
        match self {
            Self::Letter(_) => TilePropKind::Letter,
            Self::Hint(_) => TilePropKind::Hint,
            Self::FrameBlock(_) => TilePropKind::FrameBlock,
            Self::ThinWall(_) => TilePropKind::ThinWall,
            Self::Railroad(_) => TilePropKind::Railroad,
        }
    }

    pub fn session(&self) -> &TileEditSession {
        match self {
            Self::Letter(e) => e.session(),
            Self::Hint(e) => e.session(),
            Self::FrameBlock(e) => e.session(),
            Self::ThinWall(e) => e.session(),
            Self::Railroad(e) => e.session(),
        }
    }

    pub fn session_mut(&mut self) -> &mut TileEditSession {
        match self {
            Self::Letter(e) => e.session_mut(),
            Self::Hint(e) => e.session_mut(),
            Self::FrameBlock(e) => e.session_mut(),
            Self::ThinWall(e) => e.session_mut(),
            Self::Railroad(e) => e.session_mut(),
        }
    }

    pub fn tile(&self) -> &Tile {
        self.session().tile()
    }

    /// Close the editor, committing its undo transaction
    pub fn close(&mut self, host: &mut dyn EditorHost) -> bool {
        match self {
            Self::ThinWall(e) => e.close(host),
            other => other.session_mut().close(host),
        }
    }
}
