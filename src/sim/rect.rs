//! Axis-aligned rectangle geometry for paddles
//!
//! Screen coordinates: x grows right, y grows down. Edges follow the
//! half-open convention, so a rectangle at `x = 50` with width 10 covers
//! `50 <= x < 60`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Move the rectangle so its top edge sits at `top` (size unchanged)
    #[inline]
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Move the rectangle so its bottom edge sits at `bottom` (size unchanged)
    #[inline]
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    /// Whether a point lies inside (right and bottom edges excluded)
    pub fn contains_point(&self, p: IVec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}
