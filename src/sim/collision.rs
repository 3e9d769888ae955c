//! Collision detection for axis-aligned boxes
//!
//! Every shape in the game is an axis-aligned box: the player, both trunk
//! barriers and the score trigger. Detection reduces to interval overlap on
//! each axis; the axis of least penetration gives the separation normal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Box shape attached to a body, centred at `offset` from the body origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    pub half_extents: Vec2,
    pub offset: Vec2,
}

impl BoxShape {
    /// Box centred on the body origin
    pub fn centered(half_width: f32, half_height: f32) -> Self {
        Self {
            half_extents: Vec2::new(half_width, half_height),
            offset: Vec2::ZERO,
        }
    }

    /// Box whose centre sits `offset` away from the body origin
    pub fn with_offset(half_width: f32, half_height: f32, offset: Vec2) -> Self {
        Self {
            half_extents: Vec2::new(half_width, half_height),
            offset,
        }
    }

    /// World-space bounds for a body at `position`
    pub fn aabb(&self, position: Vec2) -> Aabb {
        let center = position + self.offset;
        Aabb {
            min: center - self.half_extents,
            max: center + self.half_extents,
        }
    }
}

/// World-space axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap test (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Result of an overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the boxes overlap
    pub hit: bool,
    /// Unit normal pointing from `b` toward `a` (push `a` along it to separate)
    pub normal: Vec2,
    /// Overlap depth along `normal`
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between two boxes
///
/// Returns the minimum translation axis. Ties prefer the vertical axis, since
/// the player mostly meets barriers from above or below.
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> CollisionResult {
    if !a.overlaps(b) {
        return CollisionResult::miss();
    }

    let overlap_x = a.max.x.min(b.max.x) - a.min.x.max(b.min.x);
    let overlap_y = a.max.y.min(b.max.y) - a.min.y.max(b.min.y);
    let delta = a.center() - b.center();

    if overlap_y <= overlap_x {
        let sign = if delta.y < 0.0 { -1.0 } else { 1.0 };
        CollisionResult {
            hit: true,
            normal: Vec2::new(0.0, sign),
            penetration: overlap_y,
        }
    } else {
        let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
        CollisionResult {
            hit: true,
            normal: Vec2::new(sign, 0.0),
            penetration: overlap_x,
        }
    }
}
