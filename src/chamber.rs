//! The chamber instance behind the exported entry points
//!
//! Owns the three buffers the host reads and writes between calls (balls,
//! canvas, save blob) plus the authoritative state and the render cache. The
//! same type serves both contexts: the physics side steps and saves, the
//! presentation side loads and renders.

use crate::config::ChamberConfig;
use crate::error::ChamberError;
use crate::render::{Canvas, RenderReport, Renderer};
use crate::sim::{Ball, Gravity, GridLayout, SaveState, StepReport, step};

pub struct Chamber {
    config: ChamberConfig,
    integrator: Gravity,
    balls: Vec<Ball>,
    canvas: Canvas,
    state: SaveState,
    save_data: Vec<u8>,
    renderer: Renderer,
}

impl Chamber {
    /// Allocate buffers for up to `max_num_balls` balls and `max_canvas_size` pixels
    ///
    /// Either size may be zero; a zero ball count falls back to the configured default.
    pub fn new(max_num_balls: usize, max_canvas_size: usize) -> Self {
        Self::with_config(max_num_balls, max_canvas_size, ChamberConfig::default())
    }

    pub fn with_config(
        max_num_balls: usize,
        max_canvas_size: usize,
        config: ChamberConfig,
    ) -> Self {
        let max_num_balls = if max_num_balls == 0 {
            config.default_max_balls
        } else {
            max_num_balls
        };

        let layout = GridLayout::default();
        let state = SaveState::with_pattern(layout, config.first_pattern);
        let save_data = vec![0; SaveState::encoded_len(&layout)];

        log::info!(
            "Chamber ready: {} balls, {} canvas pixels, {}x{} bricks, {} byte save blob",
            max_num_balls,
            max_canvas_size,
            layout.cols,
            layout.rows,
            save_data.len()
        );

        let mut chamber = Self {
            integrator: config.integrator(),
            config,
            balls: vec![Ball::default(); max_num_balls],
            canvas: Canvas::new(max_canvas_size),
            state,
            save_data,
            renderer: Renderer::new(),
        };
        // A load before the first transfer sees a fresh game rather than zeroes
        chamber.save();
        chamber
    }

    /// Advance the first `num_balls` balls by `delta` seconds
    pub fn step(&mut self, num_balls: usize, delta: f32) -> Result<StepReport, ChamberError> {
        let capacity = self.balls.len();
        let balls = self
            .balls
            .get_mut(..num_balls)
            .ok_or(ChamberError::TooManyBalls {
                requested: num_balls,
                capacity,
            })?;
        Ok(step(
            &mut self.state,
            balls,
            delta,
            &self.integrator,
            self.config.resolver,
        ))
    }

    /// Paint the bricks into a `canvas_width × canvas_height` view of the canvas
    pub fn render(
        &mut self,
        canvas_width: usize,
        canvas_height: usize,
    ) -> Result<RenderReport, ChamberError> {
        self.renderer
            .render(&mut self.state, &mut self.canvas, canvas_width, canvas_height)
    }

    /// Encode the current state into the save buffer
    ///
    /// Erase requests travel with the blob, so they are dropped here once
    /// written. A brick is therefore flagged in exactly one transfer.
    pub fn save(&mut self) {
        if self.save_data.is_empty() {
            return;
        }
        match self.state.encode_into(&mut self.save_data) {
            Ok(()) => self.state.grid.clear_erase_flags(),
            Err(e) => log::error!("Save failed: {e}"),
        }
    }

    /// Replace the current state with the contents of the save buffer
    pub fn load(&mut self) -> Result<(), ChamberError> {
        if self.save_data.is_empty() {
            return Ok(());
        }
        self.state.load_from(&self.save_data)
    }

    #[inline]
    pub fn config(&self) -> &ChamberConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &SaveState {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut SaveState {
        &mut self.state
    }

    #[inline]
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    #[inline]
    pub fn balls_mut(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    #[inline]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    #[inline]
    pub fn save_data(&self) -> &[u8] {
        &self.save_data
    }

    #[inline]
    pub fn save_data_mut(&mut self) -> &mut [u8] {
        &mut self.save_data
    }

    /// Bytes the host must copy between contexts
    #[inline]
    pub fn save_size(&self) -> usize {
        self.save_data.len()
    }

    pub fn balls_ptr(&mut self) -> *mut Ball {
        self.balls.as_mut_ptr()
    }

    pub fn canvas_ptr(&mut self) -> *mut u32 {
        self.canvas.as_mut_ptr()
    }

    pub fn save_ptr(&mut self) -> *mut u8 {
        self.save_data.as_mut_ptr()
    }
}
