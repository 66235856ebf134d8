//! Contact detection and response for circles, screen bounds and goals
//!
//! Everything in the arena is treated as a disc: cars use half their long
//! side, asteroids and the ball their radius. Walls are the screen rectangle
//! inset by a per-body pad.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_H, SCREEN_W};

/// Centers closer than this have no usable contact normal
pub const MIN_CONTACT_DISTANCE: f32 = 0.1;

/// Result of an overlap check between two discs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the other body toward this one
    pub normal: Vec2,
}

/// Check whether disc `a` overlaps disc `b`
///
/// Returns `None` when apart, or when the centers coincide (no normal can be
/// derived, so no impulse is applied).
pub fn circle_contact(a: Vec2, b: Vec2, min_dist: f32) -> Option<Contact> {
    let delta = a - b;
    let distance = delta.length();
    if distance < min_dist && distance > MIN_CONTACT_DISTANCE {
        Some(Contact {
            normal: delta / distance,
        })
    } else {
        None
    }
}

/// Keep a body inside `[pad, dim - pad]` on both axes
///
/// A body past an edge is placed on it and its velocity is pointed back
/// inward with magnitude scaled by `restitution`.
pub fn clamp_to_bounds(pos: &mut Vec2, vel: &mut Vec2, pad: f32, restitution: f32) {
    if pos.x < pad {
        pos.x = pad;
        vel.x = vel.x.abs() * restitution;
    }
    if pos.x > SCREEN_W - pad {
        pos.x = SCREEN_W - pad;
        vel.x = -vel.x.abs() * restitution;
    }
    if pos.y < pad {
        pos.y = pad;
        vel.y = vel.y.abs() * restitution;
    }
    if pos.y > SCREEN_H - pad {
        pos.y = SCREEN_H - pad;
        vel.y = -vel.y.abs() * restitution;
    }
}

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Inclusive on every edge
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }
}
