//! Basket controller
//!
//! Pointer input sets a clamped target; every tick the rendered position
//! closes a fixed fraction of the remaining gap (exponential smoothing).

use serde::{Deserialize, Serialize};

/// Horizontal basket position (left edge, container pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    /// Where the pointer wants the basket
    pub target_x: f32,
    /// Where the basket is drawn and collides
    pub x: f32,
}

/// Largest left-edge position that keeps the basket fully inside
#[inline]
fn max_left(area_width: f32, basket_width: f32) -> f32 {
    (area_width - basket_width).max(0.0)
}

impl Basket {
    /// Centered, at rest
    pub fn centered(area_width: f32, basket_width: f32) -> Self {
        let x = max_left(area_width, basket_width) / 2.0;
        Self { target_x: x, x }
    }

    /// Aim the basket's center at a container-relative pointer x
    pub fn set_target(&mut self, pointer_x: f32, area_width: f32, basket_width: f32) {
        self.target_x = (pointer_x - basket_width / 2.0).clamp(0.0, max_left(area_width, basket_width));
    }

    /// Move `smoothing` of the remaining distance toward the target
    pub fn step(&mut self, smoothing: f32) {
        self.x += (self.target_x - self.x) * smoothing;
    }

    /// Re-clamp after the container shrinks
    pub fn clamp_to(&mut self, area_width: f32, basket_width: f32) {
        let max = max_left(area_width, basket_width);
        self.target_x = self.target_x.clamp(0.0, max);
        self.x = self.x.clamp(0.0, max);
    }
}
