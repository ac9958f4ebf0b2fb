//! Collision detection for the ball against axis-aligned paddles
//!
//! The ball is a circle and the paddles are rectangles, so the whole game
//! only needs one test: closest point on the rectangle versus the radius.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Constrain `value` to `[low, high]`
///
/// Unlike `f32::clamp` this never panics; with `low > high` it yields `high`.
#[inline]
pub fn clamp(value: f32, low: f32, high: f32) -> f32 {
    value.max(low).min(high)
}

/// An axis-aligned rectangle in playfield coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Closest point inside the rectangle to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            clamp(point.x, self.x, self.right()),
            clamp(point.y, self.y, self.bottom()),
        )
    }
}

/// Check whether a circle overlaps a rectangle
///
/// Touching counts as overlapping. A circle whose center lies inside the
/// rectangle always hits, since the closest point is the center itself.
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) <= radius * radius
}
