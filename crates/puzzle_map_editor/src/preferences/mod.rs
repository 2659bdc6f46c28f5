//! Editor preferences persisted between sessions

mod file;

pub use file::PreferencesError;

use bevy::prelude::Resource;
use puzzle_map_render::{Perception, ViewportRenderer, DEFAULT_VIEWPORT_SIZE};
use serde::{Deserialize, Serialize};

/// User preferences for the viewport
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Viewport width in tiles
    pub viewport_size_x: u32,
    /// Viewport height in tiles
    pub viewport_size_y: u32,
    pub perception: Perception,
    /// Debug boxes at each moving actor's unsnapped position
    pub show_actor_bboxes: bool,
    pub use_rewind_effect: bool,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            viewport_size_x: DEFAULT_VIEWPORT_SIZE,
            viewport_size_y: DEFAULT_VIEWPORT_SIZE,
            perception: Perception::Normal,
            show_actor_bboxes: false,
            use_rewind_effect: false,
        }
    }
}

impl EditorPreferences {
    /// Push these preferences into a renderer
    ///
    /// A viewport size change takes effect on the renderer's next draw.
    pub fn apply_to(&self, renderer: &mut ViewportRenderer) {
        if renderer.viewport_size() != bevy::math::UVec2::new(self.viewport_size_x, self.viewport_size_y) {
            renderer.set_viewport_size(self.viewport_size_x.max(1), self.viewport_size_y.max(1));
        }
        renderer.perception = self.perception;
        renderer.show_actor_bboxes = self.show_actor_bboxes;
        renderer.use_rewind_effect = self.use_rewind_effect;
    }
}
