//! Axis-aligned rectangle collision
//!
//! Everything on the road collides as a box. Edges that merely touch do not
//! count as an overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle described by its center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Box of `width` x `height` shrunk by `inset` on every side
    pub fn inset(center: Vec2, width: u32, height: u32, inset: u32) -> Self {
        let w = width.saturating_sub(inset * 2) as f32;
        let h = height.saturating_sub(inset * 2) as f32;
        Self::new(center, Vec2::new(w, h))
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents()
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents()
    }

    /// Same box moved to a new center
    pub fn centered_at(self, center: Vec2) -> Self {
        Self { center, ..self }
    }

    /// Strict overlap test (shared edges are not a hit)
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}
