//! Per-step ball vs brick collision resolution
//!
//! Each ball only looks at the 3×3 block of cells around its swept position,
//! so a step costs at most nine brick tests per ball whatever the grid size.
//! At most one brick falls per ball per step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, Integrator};
use super::layout::BrickBounds;
use super::save::SaveState;
use super::sweep::resolve_exhaustive;

/// Brick collision strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolver {
    /// Axis-crossing test against the 3×3 neighborhood of the swept position
    #[default]
    Neighborhood,
    /// Swept edge test against every live brick (slow reference baseline)
    Exhaustive,
}

/// What one call to [`step`] did to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// Bricks knocked out this step
    pub destroyed: u32,
    /// The last brick fell and the grid was reset
    pub reset: bool,
}

/// Advance every ball by `delta` seconds and resolve brick hits
///
/// Velocities are integrated and reflected in place. Positions are left to the
/// host, which moves the balls after the step.
pub fn step<I: Integrator + ?Sized>(
    state: &mut SaveState,
    balls: &mut [Ball],
    delta: f32,
    integrator: &I,
    resolver: Resolver,
) -> StepReport {
    let mut report = StepReport::default();

    for ball in balls.iter_mut() {
        integrator.accelerate(ball, delta);
        report.destroyed += match resolver {
            Resolver::Neighborhood => u32::from(resolve_neighborhood(state, ball, delta)),
            Resolver::Exhaustive => resolve_exhaustive(state, ball, delta),
        };
    }

    // Checked once after all balls so simultaneous final hits reset only once
    if state.grid.is_cleared() {
        state.start_next_game();
        report.reset = true;
        log::info!(
            "Grid cleared, starting game {} with {:?} bricks",
            state.game_count,
            state.current_color_func
        );
    }

    if report.destroyed > 0 {
        log::debug!(
            "Step destroyed {} bricks, {} remaining",
            report.destroyed,
            state.bricks_count()
        );
    }

    report
}

/// Resolve at most one brick hit from the cells around the ball's swept position
fn resolve_neighborhood(state: &mut SaveState, ball: &mut Ball, delta: f32) -> bool {
    let final_pos = ball.swept_position(delta);
    let (cols, rows) = state.layout.neighborhood(final_pos);

    for col in cols {
        for row in rows.clone() {
            if state.grid.get(col, row).destroyed {
                continue;
            }
            let bounds = state.layout.brick_bounds(col, row);
            if reflect_off_brick(ball, &bounds, final_pos) {
                state.grid.destroy(col, row);
                return true;
            }
        }
    }
    false
}

/// Reflect the ball off whichever brick edges it crossed between `ball.pos` and `final_pos`
///
/// The ball is inflated by its radius. The horizontal and vertical edges are
/// checked independently, so crossing a corner flips both components. Returns
/// whether any edge was crossed.
pub fn reflect_off_brick(ball: &mut Ball, brick: &BrickBounds, final_pos: Vec2) -> bool {
    let r = ball.r;
    let pos = ball.pos;

    if final_pos.x + r < brick.left || final_pos.x - r > brick.right {
        return false;
    }
    if final_pos.y - r > brick.top || final_pos.y + r < brick.bottom {
        return false;
    }

    let mut hit = false;
    let crossed_top = pos.y - r > brick.top && final_pos.y - r <= brick.top;
    let crossed_bottom = pos.y + r < brick.bottom && final_pos.y + r >= brick.bottom;
    if crossed_top || crossed_bottom {
        ball.velocity.y = -ball.velocity.y;
        hit = true;
    }

    let crossed_left = pos.x + r < brick.left && final_pos.x + r >= brick.left;
    let crossed_right = pos.x - r > brick.right && final_pos.x - r <= brick.right;
    if crossed_left || crossed_right {
        ball.velocity.x = -ball.velocity.x;
        hit = true;
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ColorPattern;
    use crate::sim::ball::Gravity;
    use crate::sim::layout::GridLayout;
    use proptest::prelude::*;

    const NO_GRAVITY: Gravity = Gravity {
        acceleration: Vec2::ZERO,
    };

    fn unit_brick() -> BrickBounds {
        BrickBounds {
            left: 0.4,
            right: 0.5,
            top: 0.4,
            bottom: 0.37,
        }
    }

    /// Ball starting just above `col, row`, moving straight down far enough to cross its top
    fn falling_onto(layout: &GridLayout, col: usize, row: usize) -> Ball {
        let bounds = layout.brick_bounds(col, row);
        let r = 0.005;
        Ball::new(
            Vec2::new((bounds.left + bounds.right) / 2.0, bounds.top + r + 0.005),
            Vec2::new(0.0, -1.0),
            r,
        )
    }

    #[test]
    fn test_top_edge_flips_vertical_only() {
        let mut ball = Ball::new(Vec2::new(0.45, 0.42), Vec2::new(0.3, -1.0), 0.01);
        let final_pos = ball.swept_position(0.02);
        assert!(reflect_off_brick(&mut ball, &unit_brick(), final_pos));
        assert_eq!(ball.velocity, Vec2::new(0.3, 1.0));
    }

    #[test]
    fn test_corner_flips_both() {
        // Approaching the top-left corner diagonally
        let mut ball = Ball::new(Vec2::new(0.38, 0.42), Vec2::new(1.0, -1.0), 0.005);
        let final_pos = ball.swept_position(0.02);
        assert!(reflect_off_brick(&mut ball, &unit_brick(), final_pos));
        assert_eq!(ball.velocity, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_no_overlap_no_hit() {
        let mut ball = Ball::new(Vec2::new(0.2, 0.42), Vec2::new(0.0, -1.0), 0.01);
        let final_pos = ball.swept_position(0.02);
        assert!(!reflect_off_brick(&mut ball, &unit_brick(), final_pos));
        assert_eq!(ball.velocity, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_already_inside_is_not_a_hit() {
        // Overlapping at both ends of the step: no edge was crossed
        let mut ball = Ball::new(Vec2::new(0.45, 0.385), Vec2::new(0.0, -0.1), 0.001);
        let final_pos = ball.swept_position(0.01);
        assert!(!reflect_off_brick(&mut ball, &unit_brick(), final_pos));
    }

    #[test]
    fn test_two_by_two_top_edge_hit() {
        let layout = GridLayout::new(2, 2);
        let mut state = SaveState::new(layout);
        let mut balls = [falling_onto(&layout, 0, 0)];
        balls[0].velocity.x = 0.1;

        let report = step(&mut state, &mut balls, 0.02, &NO_GRAVITY, Resolver::Neighborhood);

        assert_eq!(report.destroyed, 1);
        assert!(!report.reset);
        assert!(state.grid.get(0, 0).destroyed);
        assert!(state.grid.get(0, 0).needs_erasing);
        assert_eq!(state.bricks_count(), 3);
        assert_eq!(balls[0].velocity, Vec2::new(0.1, 1.0));
        for (col, row) in [(1, 0), (0, 1), (1, 1)] {
            assert!(!state.grid.get(col, row).destroyed);
        }
    }

    #[test]
    fn test_destroyed_bricks_are_skipped() {
        let layout = GridLayout::new(2, 2);
        let mut state = SaveState::new(layout);
        state.grid.destroy(0, 0);
        let mut balls = [falling_onto(&layout, 0, 0)];

        let report = step(&mut state, &mut balls, 0.02, &NO_GRAVITY, Resolver::Neighborhood);

        assert_eq!(report.destroyed, 0);
        assert_eq!(balls[0].velocity, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_simultaneous_clear_resets_once() {
        let layout = GridLayout::new(2, 2);
        let mut state = SaveState::new(layout);
        let mut balls = [
            falling_onto(&layout, 0, 0),
            falling_onto(&layout, 1, 0),
        ];
        state.grid.destroy(0, 1);
        state.grid.destroy(1, 1);

        let report = step(&mut state, &mut balls, 0.02, &NO_GRAVITY, Resolver::Neighborhood);

        assert_eq!(report.destroyed, 2);
        assert!(report.reset);
        assert_eq!(state.game_count, 1);
        assert_eq!(state.current_color_func, ColorPattern::default().next());
        assert_eq!(state.bricks_count(), 4);
        assert!(state.grid.iter_cells().all(|(_, _, b)| !b.destroyed));
    }

    #[test]
    fn test_full_clear_by_repeated_steps() {
        let layout = GridLayout::new(3, 3);
        let mut state = SaveState::new(layout);
        let cells: Vec<_> = (0..3).flat_map(|row| (0..3).map(move |col| (col, row))).collect();

        for (i, &(col, row)) in cells.iter().enumerate() {
            // Drop a ball onto the exposed top of each brick, bottom row first
            let (col, row) = (col, 2 - row);
            let mut balls = [falling_onto(&layout, col, row)];
            let report = step(&mut state, &mut balls, 0.02, &NO_GRAVITY, Resolver::Neighborhood);
            assert_eq!(report.destroyed, 1, "brick {col},{row}");
            assert_eq!(report.reset, i == cells.len() - 1);
        }

        assert_eq!(state.game_count, 1);
        assert_eq!(state.bricks_count(), 9);
    }

    #[test]
    fn test_exhaustive_resolver_destroys_brick() {
        let layout = GridLayout::new(2, 2);
        let mut state = SaveState::new(layout);
        let mut balls = [falling_onto(&layout, 1, 0)];

        let report = step(&mut state, &mut balls, 0.02, &NO_GRAVITY, Resolver::Exhaustive);

        assert_eq!(report.destroyed, 1);
        assert!(state.grid.get(1, 0).destroyed);
        assert!(balls[0].velocity.y > 0.0);
    }

    proptest! {
        #[test]
        fn prop_one_hit_per_ball_and_count_conserved(
            balls in proptest::collection::vec(
                (0.0f32..1.0, 0.0f32..0.7, -3.0f32..3.0, -3.0f32..3.0),
                1..12,
            ),
            steps in 1usize..20,
        ) {
            let layout = GridLayout::default();
            let mut state = SaveState::with_pattern(layout, ColorPattern::Zebra);
            let mut balls: Vec<Ball> = balls
                .into_iter()
                .map(|(x, y, vx, vy)| Ball::new(Vec2::new(x, y), Vec2::new(vx, vy), 0.01))
                .collect();
            let gravity = Gravity::default();

            for _ in 0..steps {
                for ball in balls.iter_mut() {
                    let before: Vec<_> =
                        state.grid.iter_cells().map(|(_, _, b)| b.destroyed).collect();
                    let report = step(
                        &mut state,
                        std::slice::from_mut(ball),
                        1.0 / 60.0,
                        &gravity,
                        Resolver::Neighborhood,
                    );
                    prop_assert!(report.destroyed <= 1);

                    let live = state.grid.iter_cells().filter(|(_, _, b)| !b.destroyed).count();
                    prop_assert_eq!(live as u32, state.bricks_count());

                    if !report.reset {
                        // Nothing revives within a game
                        for (was, (_, _, now)) in before.iter().zip(state.grid.iter_cells()) {
                            prop_assert!(!was || now.destroyed);
                        }
                    }
                }

                for ball in balls.iter_mut() {
                    ball.pos += ball.velocity / 60.0;
                }
            }
        }
    }
}
