//! Collision detection between falling entities and the basket
//!
//! Screen-space axis-aligned boxes: y grows downward, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }
}

/// Whether a falling item lands in the basket
///
/// Both axes are checked; an item level with the basket but off to the
/// side is not a catch. Touching the basket's top edge counts.
pub fn basket_overlap(item: &Rect, basket: &Rect) -> bool {
    item.bottom() >= basket.top()
        && item.left() < basket.right()
        && item.right() > basket.left()
        && item.top() < basket.bottom()
}
