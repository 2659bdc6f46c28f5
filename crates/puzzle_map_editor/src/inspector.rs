//! Cell inspector: one thumbnail per layer of a cell

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy::math::Rect;
use image::RgbaImage;
use puzzle_map_core::{CellPos, Layer, Tile, SELECTABLE_LAYERS};
use puzzle_map_render::{draw_tile_type, surface, Tileset};

use crate::overlays::{ChangeCallback, TilePropEditor, TilePropKind};
use crate::{EditorHost, MapDocument, MapEditor};

const INSTRUCTIONS: [&str; 2] = ["Primary button: edit complex tile", "Secondary button: delete tile"];

/// Which pointer button clicked a thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// What a click on a thumbnail did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectorAction {
    /// Nothing under the click, or nothing to do with it
    None,
    /// A property editor was opened for the tile
    Opened(TilePropKind),
    /// The tile was erased
    Erased,
}

/// Thumbnail of one layer slot
#[derive(Debug, Clone)]
pub struct LayerThumbnail {
    /// Layer identifier, for labelling the thumbnail
    pub label: &'static str,
    pub image: RgbaImage,
    /// Whether the tile has a property editor
    pub editable: bool,
}

fn lock(thumbnail: &Mutex<LayerThumbnail>) -> MutexGuard<'_, LayerThumbnail> {
    thumbnail.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Inspector for the layers of a single cell
///
/// Thumbnails are shared with the change callbacks of the editors it opens,
/// so an edit repaints its thumbnail when the notification is delivered.
pub struct CellInspector {
    tileset: Arc<dyn Tileset>,
    cell: Option<CellPos>,
    thumbnails: Vec<(Layer, Arc<Mutex<LayerThumbnail>>)>,
}

impl CellInspector {
    pub fn new(tileset: Arc<dyn Tileset>) -> Self {
        let thumbnails = SELECTABLE_LAYERS
            .iter()
            .map(|&layer| {
                let thumbnail = LayerThumbnail {
                    label: layer.ident(),
                    image: RgbaImage::new(tileset.size_x(), tileset.size_y()),
                    editable: false,
                };
                (layer, Arc::new(Mutex::new(thumbnail)))
            })
            .collect();
        Self {
            tileset,
            cell: None,
            thumbnails,
        }
    }

    pub fn cell(&self) -> Option<CellPos> {
        self.cell
    }

    /// Help text shown under the thumbnails, one line per pointer button
    pub fn instructions(&self) -> &'static [&'static str] {
        &INSTRUCTIONS
    }

    fn slot(&self, layer: Layer) -> Option<&Arc<Mutex<LayerThumbnail>>> {
        self.thumbnails
            .iter()
            .find(|(l, _)| *l == layer)
            .map(|(_, thumbnail)| thumbnail)
    }

    /// Copy of a layer's thumbnail
    pub fn thumbnail(&self, layer: Layer) -> Option<LayerThumbnail> {
        self.slot(layer).map(|slot| lock(slot).clone())
    }

    pub fn is_editable(&self, layer: Layer) -> bool {
        self.slot(layer).is_some_and(|slot| lock(slot).editable)
    }

    /// Inspect a cell, repainting every thumbnail
    pub fn edit_cell(&mut self, document: &MapDocument, pos: CellPos) {
        self.cell = Some(pos);
        for (layer, slot) in &self.thumbnails {
            let tile = document.tile_at(pos, *layer);
            let mut thumbnail = lock(slot);
            thumbnail.editable = tile
                .as_ref()
                .is_some_and(|t| TilePropEditor::has_editor(t.ty.name));
            paint(&*self.tileset, &mut thumbnail.image, tile.as_ref());
        }
    }

    /// Handle a click on a layer's thumbnail
    ///
    /// Any open property editor is closed first. The primary button then
    /// opens the tile's property editor, anchored at `anchor`; the secondary
    /// button erases the tile as its own undo step.
    pub fn click(
        &mut self,
        editor: &mut MapEditor,
        layer: Layer,
        button: PointerButton,
        anchor: Rect,
    ) -> InspectorAction {
        let Some(pos) = self.cell else {
            return InspectorAction::None;
        };
        // An open editor commits before the click, so its close cannot undo an
        // erase, and its queued repaints land before this click's own
        if editor.close_overlay().is_some() {
            editor.tick();
        }
        let Some(tile) = editor.document().tile_at(pos, layer) else {
            return InspectorAction::None;
        };
        let Some(slot) = self.slot(layer).cloned() else {
            return InspectorAction::None;
        };

        match button {
            PointerButton::Primary => {
                let Some(kind) = TilePropKind::for_type(tile.ty.name) else {
                    return InspectorAction::None;
                };
                let callback = thumbnail_refresher(Arc::clone(&self.tileset), slot);
                if editor.open_tile_prop_overlay(tile, Some(pos), anchor, Some(callback)) {
                    InspectorAction::Opened(kind)
                } else {
                    InspectorAction::None
                }
            }
            PointerButton::Secondary => {
                let document = editor.document_mut();
                document.erase_tile(pos, layer);
                document.commit_undo();

                let remaining = document.tile_at(pos, layer);
                let mut thumbnail = lock(&slot);
                thumbnail.editable = remaining
                    .as_ref()
                    .is_some_and(|t| TilePropEditor::has_editor(t.ty.name));
                paint(&*self.tileset, &mut thumbnail.image, remaining.as_ref());
                InspectorAction::Erased
            }
        }
    }
}

fn paint(tileset: &dyn Tileset, image: &mut RgbaImage, tile: Option<&Tile>) {
    match tile {
        Some(tile) => draw_tile_type(tileset, tile.ty.name, Some(tile), image),
        None => surface::clear(image),
    }
}

/// Change callback that redraws a thumbnail from the edited tile
///
/// A thin wall with no edges is about to be erased, so it stops counting as editable.
fn thumbnail_refresher(tileset: Arc<dyn Tileset>, slot: Arc<Mutex<LayerThumbnail>>) -> ChangeCallback {
    Box::new(move |tile: &Tile, _cell: Option<CellPos>| {
        let mut thumbnail = lock(&slot);
        draw_tile_type(&*tileset, tile.ty.name, Some(tile), &mut thumbnail.image);
        if TilePropKind::for_type(tile.ty.name) == Some(TilePropKind::ThinWall) {
            thumbnail.editable = tile.edges != 0;
        }
    })
}
