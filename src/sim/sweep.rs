//! Exhaustive swept-surface resolver
//!
//! Every live brick is treated as four directed outer surfaces and the ball's
//! leading contact point is swept across each one. More general than the
//! neighborhood resolver (any approach angle reflects about the surface
//! normal) but it tests the whole grid every step, so it is only used as a
//! reference.

use glam::Vec2;

use super::ball::Ball;
use super::layout::BrickBounds;
use super::save::SaveState;

/// Directed line segment; the solid side is on the right when walking start to end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub start: Vec2,
    pub end: Vec2,
}

impl Surface {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Unit normal pointing away from the solid side
    pub fn normal(&self) -> Vec2 {
        (self.end - self.start).perp().normalize_or_zero()
    }

    /// Where a point moving by `motion` crosses this surface from the outside
    pub fn crossing(&self, point: Vec2, motion: Vec2) -> Option<Vec2> {
        if motion.dot(self.normal()) >= 0.0 {
            return None;
        }

        let edge = self.end - self.start;
        let denom = motion.perp_dot(edge);
        if denom.abs() < f32::EPSILON {
            return None;
        }

        let to_start = self.start - point;
        let t = to_start.perp_dot(edge) / denom;
        let u = to_start.perp_dot(motion) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(point + motion * t)
        } else {
            None
        }
    }
}

/// Outer surfaces of a brick: top, bottom, left, right
pub fn brick_surfaces(brick: &BrickBounds) -> [Surface; 4] {
    let top_left = Vec2::new(brick.left, brick.top);
    let top_right = Vec2::new(brick.right, brick.top);
    let bottom_left = Vec2::new(brick.left, brick.bottom);
    let bottom_right = Vec2::new(brick.right, brick.bottom);
    [
        Surface::new(top_left, top_right),
        Surface::new(bottom_right, bottom_left),
        Surface::new(bottom_left, top_left),
        Surface::new(top_right, bottom_right),
    ]
}

/// Bounce the ball off the first surface its contact point crosses this step
pub fn bounce_off_surface(ball: &mut Ball, surface: &Surface, delta: f32) -> bool {
    let normal = surface.normal();
    let contact = ball.pos - normal * ball.r;
    let Some(hit) = surface.crossing(contact, ball.velocity * delta) else {
        return false;
    };

    ball.pos = hit + normal * ball.r;
    ball.velocity = reflect_velocity(ball.velocity, normal);
    true
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Test the ball against every live brick, destroying each one it bounces off
pub fn resolve_exhaustive(state: &mut SaveState, ball: &mut Ball, delta: f32) -> u32 {
    let mut destroyed = 0;
    for col in 0..state.layout.cols {
        for row in 0..state.layout.rows {
            if state.grid.get(col, row).destroyed {
                continue;
            }
            let bounds = state.layout.brick_bounds(col, row);
            let hit = brick_surfaces(&bounds)
                .iter()
                .any(|surface| bounce_off_surface(ball, surface, delta));
            if hit && state.grid.destroy(col, row) {
                destroyed += 1;
            }
        }
    }
    destroyed
}
