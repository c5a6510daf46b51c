//! Ball layout shared with the host, and the integrator seam
//!
//! The host writes `Ball` values straight into the ball buffer, so the layout
//! is `#[repr(C)]` and plain-old-data.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GRAVITY;

/// A ball as laid out in the shared ball buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub r: f32,
}

impl Ball {
    pub const fn new(pos: Vec2, velocity: Vec2, r: f32) -> Self {
        Self { pos, velocity, r }
    }

    /// Predicted end-of-step position for the current velocity
    #[inline]
    pub fn swept_position(&self, delta: f32) -> Vec2 {
        self.pos + self.velocity * delta
    }
}

/// Velocity integrator applied to every ball before collision resolution
pub trait Integrator {
    fn accelerate(&self, ball: &mut Ball, delta: f32);
}

/// Constant acceleration field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gravity {
    pub acceleration: Vec2,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            acceleration: Vec2::new(0.0, -GRAVITY),
        }
    }
}

impl Integrator for Gravity {
    #[inline]
    fn accelerate(&self, ball: &mut Ball, delta: f32) {
        ball.velocity += self.acceleration * delta;
    }
}
