use serde::{Deserialize, Serialize};

use crate::app::Vec2;

/// Maps world positions into a camera's normalized viewport space, where
/// `(0, 0)` is the bottom-left corner and `(1, 1)` the top-right corner.
pub trait ViewportProjection {
    fn world_to_viewport(&self, camera_position: Vec2, world: Vec2) -> Vec2;

    /// Visible world extent (full width and height).
    fn visible_extent(&self) -> Vec2;
}

/// Orthographic view centred on the camera position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrthographicViewport {
    pub width: f32,
    pub height: f32,
}

impl OrthographicViewport {
    /// Builds the view from a vertical half-size and a width/height aspect.
    pub fn from_half_height(half_height: f32, aspect: f32) -> Self {
        Self {
            width: half_height * 2.0 * aspect,
            height: half_height * 2.0,
        }
    }
}

impl ViewportProjection for OrthographicViewport {
    fn world_to_viewport(&self, camera_position: Vec2, world: Vec2) -> Vec2 {
        Vec2 {
            x: (world.x - camera_position.x) / self.width + 0.5,
            y: (world.y - camera_position.y) / self.height + 0.5,
        }
    }

    fn visible_extent(&self) -> Vec2 {
        Vec2 {
            x: self.width,
            y: self.height,
        }
    }
}
