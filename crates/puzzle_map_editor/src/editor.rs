//! The editor resource: document plus the open property overlay

use bevy::math::Rect;
use bevy::prelude::Resource;
use puzzle_map_core::{CellPos, SharedLevel, Tile};

use crate::overlays::{ChangeCallback, TilePropEditor};
use crate::MapDocument;

/// Owns the document being edited and at most one open tile property editor
///
/// Change notifications queued by editors are delivered by [`MapEditor::tick`],
/// which the [`crate::TileEditorPlugin`] runs once per frame. An editor
/// closed with notifications still queued is kept until they are delivered.
#[derive(Resource)]
pub struct MapEditor {
    document: MapDocument,
    overlay: Option<TilePropEditor>,
    overlay_anchor: Option<Rect>,
    retired: Vec<TilePropEditor>,
}

impl MapEditor {
    pub fn new(level: SharedLevel) -> Self {
        Self {
            document: MapDocument::new(level),
            overlay: None,
            overlay_anchor: None,
            retired: Vec::new(),
        }
    }

    pub fn document(&self) -> &MapDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut MapDocument {
        &mut self.document
    }

    pub fn overlay(&self) -> Option<&TilePropEditor> {
        self.overlay.as_ref()
    }

    /// Screen rectangle the open overlay is anchored to
    pub fn overlay_anchor(&self) -> Option<Rect> {
        self.overlay_anchor
    }

    /// Open the property editor for a tile, closing any editor already open
    ///
    /// `cell` is `None` for a template tile such as the current brush. Returns
    /// `false` if the tile's type has no editable properties.
    pub fn open_tile_prop_overlay(
        &mut self,
        tile: Tile,
        cell: Option<CellPos>,
        anchor: Rect,
        on_change: Option<ChangeCallback>,
    ) -> bool {
        self.close_overlay();
        let Some(editor) = TilePropEditor::open(tile, cell, on_change) else {
            return false;
        };
        self.overlay = Some(editor);
        self.overlay_anchor = Some(anchor);
        true
    }

    /// Run `f` against the open editor and the document it edits
    pub fn with_overlay<R>(
        &mut self,
        f: impl FnOnce(&mut TilePropEditor, &mut MapDocument) -> R,
    ) -> Option<R> {
        let editor = self.overlay.as_mut()?;
        Some(f(editor, &mut self.document))
    }

    /// Close the open editor, returning its final tile
    pub fn close_overlay(&mut self) -> Option<Tile> {
        let mut editor = self.overlay.take()?;
        self.overlay_anchor = None;
        editor.close(&mut self.document);
        let tile = editor.tile().clone();
        if editor.session().pending_notifications() > 0 {
            self.retired.push(editor);
        }
        Some(tile)
    }

    /// Deliver queued change notifications
    ///
    /// Returns the number delivered.
    pub fn tick(&mut self) -> usize {
        let mut delivered = 0;
        for mut editor in self.retired.drain(..) {
            delivered += editor.session_mut().dispatch_notifications();
        }
        if let Some(editor) = self.overlay.as_mut() {
            delivered += editor.session_mut().dispatch_notifications();
        }
        delivered
    }

    /// Close any open editor, then undo
    pub fn undo(&mut self) -> bool {
        self.close_overlay();
        self.document.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.close_overlay();
        self.document.redo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlays::TilePropKind;
    use crate::EditorHost;
    use puzzle_map_core::{Direction, Layer, Level};
    use std::sync::{Arc, Mutex};

    fn editor_with(pos: CellPos, name: &str) -> MapEditor {
        let mut level = Level::filled(4, 4, "floor");
        level.place(pos, Tile::named(name).unwrap());
        MapEditor::new(level.into_shared())
    }

    fn anchor() -> Rect {
        Rect::new(0.0, 0.0, 32.0, 32.0)
    }

    #[test]
    fn test_open_requires_editable_type() {
        let mut editor = editor_with(CellPos::new(0, 0), "chip");
        let chip = Tile::named("chip").unwrap();
        assert!(!editor.open_tile_prop_overlay(chip, Some(CellPos::new(0, 0)), anchor(), None));
        assert!(editor.overlay().is_none());
        assert!(editor.overlay_anchor().is_none());
    }

    #[test]
    fn test_edit_and_close_commits_once() {
        let pos = CellPos::new(2, 1);
        let mut editor = editor_with(pos, "hint");
        let tile = editor.document().tile_at(pos, Layer::Terrain).unwrap();
        assert!(editor.open_tile_prop_overlay(tile, Some(pos), anchor(), None));
        assert_eq!(editor.overlay_anchor(), Some(anchor()));

        editor.with_overlay(|overlay, doc| {
            if let TilePropEditor::Hint(hint) = overlay {
                hint.set_text(doc, "one");
                hint.set_text(doc, "two");
            }
        });
        let closed = editor.close_overlay().unwrap();
        assert_eq!(closed.hint_text, "two");

        assert!(editor.undo());
        assert_eq!(editor.document().tile_at(pos, Layer::Terrain).unwrap().hint_text, "");
        assert!(!editor.undo());
        assert!(editor.redo());
        assert_eq!(editor.document().tile_at(pos, Layer::Terrain).unwrap().hint_text, "two");
    }

    #[test]
    fn test_opening_another_overlay_closes_the_first() {
        let pos = CellPos::new(0, 0);
        let mut editor = editor_with(pos, "hint");
        let tile = editor.document().tile_at(pos, Layer::Terrain).unwrap();
        editor.open_tile_prop_overlay(tile, Some(pos), anchor(), None);
        editor.with_overlay(|overlay, doc| {
            overlay.session_mut().mutate(doc, |t| t.hint_text = "edited".into());
        });

        let brush = Tile::named("thin_walls").unwrap();
        assert!(editor.open_tile_prop_overlay(brush, None, anchor(), None));
        assert_eq!(editor.overlay().map(|o| o.kind()), Some(TilePropKind::ThinWall));
        assert!(editor.document().history().can_undo());
    }

    #[test]
    fn test_notifications_wait_for_tick() {
        let pos = CellPos::new(3, 3);
        let mut editor = editor_with(pos, "thin_walls");
        let tile = editor.document().tile_at(pos, Layer::ThinWall).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ChangeCallback = Box::new(move |tile: &Tile, _: Option<CellPos>| {
            sink.lock().unwrap().push(tile.edges);
        });
        editor.open_tile_prop_overlay(tile, Some(pos), anchor(), Some(callback));

        editor.with_overlay(|overlay, doc| {
            if let TilePropEditor::ThinWall(walls) = overlay {
                walls.set_edge(doc, Direction::North, true);
                walls.set_edge(doc, Direction::East, true);
            }
        });
        assert!(seen.lock().unwrap().is_empty());

        // both notifications see the tile as it is when delivered
        assert_eq!(editor.tick(), 2);
        assert_eq!(*seen.lock().unwrap(), vec![0x07, 0x07]);
        assert_eq!(editor.tick(), 0);
    }

    #[test]
    fn test_notifications_survive_close() {
        let pos = CellPos::new(1, 1);
        let mut editor = editor_with(pos, "floor_letter");
        let tile = editor.document().tile_at(pos, Layer::Terrain).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ChangeCallback = Box::new(move |tile: &Tile, cell: Option<CellPos>| {
            sink.lock().unwrap().push((tile.overlaid_glyph.clone(), cell));
        });
        editor.open_tile_prop_overlay(tile, Some(pos), anchor(), Some(callback));
        editor.with_overlay(|overlay, doc| {
            if let TilePropEditor::Letter(letter) = overlay {
                letter.select_glyph(doc, "A");
            }
        });
        editor.close_overlay();
        assert!(seen.lock().unwrap().is_empty());

        assert_eq!(editor.tick(), 1);
        assert_eq!(*seen.lock().unwrap(), vec![("A".to_string(), Some(pos))]);
    }
}
