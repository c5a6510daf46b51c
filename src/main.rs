//! Brick Chamber headless driver
//!
//! Plays the part of the host: one chamber runs physics, a second one renders,
//! and the save blob is copied between them every frame.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use brick_chamber::consts::{CHAMBER_HEIGHT, CHAMBER_WIDTH};
    use brick_chamber::sim::Ball;
    use brick_chamber::{Chamber, ChamberConfig};

    const FRAMES: u32 = 60 * 120;
    const DT: f32 = 1.0 / 60.0;
    const NUM_BALLS: usize = 24;
    const BALL_RADIUS: f32 = 0.006;
    const CANVAS_WIDTH: usize = 640;
    const CANVAS_HEIGHT: usize = 448;

    fn load_config() -> ChamberConfig {
        let Some(path) = std::env::args().nth(1) else {
            return ChamberConfig::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match ChamberConfig::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {path}");
                    config
                }
                Err(e) => {
                    log::warn!("{e}, using defaults");
                    ChamberConfig::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {path}: {e}, using defaults");
                ChamberConfig::default()
            }
        }
    }

    fn spawn_balls(rng: &mut Pcg32) -> Vec<Ball> {
        (0..NUM_BALLS)
            .map(|_| {
                let pos = Vec2::new(rng.random_range(0.05..0.95), rng.random_range(0.02..0.1));
                let angle = rng.random_range(0.3..std::f32::consts::PI - 0.3);
                let speed = rng.random_range(0.8..1.4);
                Ball::new(pos, Vec2::new(angle.cos(), angle.sin()) * speed, BALL_RADIUS)
            })
            .collect()
    }

    /// Move balls to their end-of-step positions and keep them inside the chamber
    fn advance_balls(balls: &mut [Ball], dt: f32) {
        for ball in balls {
            ball.pos += ball.velocity * dt;
            if ball.pos.x - ball.r < 0.0 {
                ball.velocity.x = ball.velocity.x.abs();
            } else if ball.pos.x + ball.r > CHAMBER_WIDTH {
                ball.velocity.x = -ball.velocity.x.abs();
            }
            if ball.pos.y - ball.r < 0.0 {
                ball.velocity.y = ball.velocity.y.abs();
            } else if ball.pos.y + ball.r > CHAMBER_HEIGHT {
                ball.velocity.y = -ball.velocity.y.abs();
            }
        }
    }

    /// Copy the stepped balls back out of the physics chamber
    fn pull_balls(physics: &Chamber, balls: &mut [Ball]) {
        let n = balls.len();
        balls.copy_from_slice(&physics.balls()[..n]);
    }

    pub fn run() {
        let config = load_config();
        let mut physics = Chamber::with_config(NUM_BALLS, 0, config.clone());
        let mut screen = Chamber::with_config(0, CANVAS_WIDTH * CANVAS_HEIGHT, config);

        let mut rng = Pcg32::seed_from_u64(12);
        let mut balls = spawn_balls(&mut rng);

        let mut destroyed = 0u64;
        let mut resets = 0u32;
        let mut full_renders = 0u32;

        for frame in 0..FRAMES {
            physics.balls_mut()[..balls.len()].copy_from_slice(&balls);
            let report = match physics.step(balls.len(), DT) {
                Ok(report) => report,
                Err(e) => {
                    log::error!("Frame {frame}: {e}");
                    return;
                }
            };
            pull_balls(&physics, &mut balls);
            advance_balls(&mut balls, DT);

            destroyed += u64::from(report.destroyed);
            if report.reset {
                resets += 1;
                log::info!("Frame {frame}: grid reset (game {})", physics.state().game_count);
            }

            physics.save();
            screen.save_data_mut().copy_from_slice(physics.save_data());
            if let Err(e) = screen.load() {
                log::warn!("Frame {frame}: {e}");
            }
            match screen.render(CANVAS_WIDTH, CANVAS_HEIGHT) {
                Ok(render) if render.full => full_renders += 1,
                Ok(_) => {}
                Err(e) => log::error!("Frame {frame}: {e}"),
            }
        }

        let checksum = screen
            .canvas()
            .view()
            .iter()
            .fold(0u32, |acc, &px| acc.rotate_left(5) ^ px);
        log::info!(
            "{FRAMES} frames: {destroyed} bricks destroyed, {resets} resets, \
             {full_renders} full renders, {} bricks left, canvas checksum {checksum:08x}",
            physics.state().bricks_count()
        );
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Chamber (native) starting...");
    host::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is driven through the exports in `ffi`
}
