//! Brick Chamber - bouncing balls against a destructible brick grid
//!
//! Core modules:
//! - `sim`: Ball contract, brick grid, packed save state, collision resolvers
//! - `render`: Pixel canvas, coloring patterns, incremental render scheduler
//! - `chamber`: Owner of the shared ball/canvas/save buffers
//! - `ffi`: Exported entry points for the host
//! - `config`: Data-driven chamber configuration

pub mod chamber;
pub mod config;
pub mod error;
pub mod ffi;
pub mod render;
pub mod sim;

pub use chamber::Chamber;
pub use config::ChamberConfig;
pub use error::ChamberError;

/// Chamber configuration constants
pub mod consts {
    /// Bricks in one grid row
    pub const BRICKS_PER_ROW: usize = 9;
    /// Rows of bricks
    pub const BRICK_ROWS: usize = 12;

    /// Chamber extent in simulation units (y axis points up)
    pub const CHAMBER_WIDTH: f32 = 1.0;
    pub const CHAMBER_HEIGHT: f32 = 0.7;

    /// Brick cell size
    pub const BRICK_WIDTH: f32 = 1.0 / 12.0;
    pub const BRICK_HEIGHT: f32 = 0.7 / 25.0;

    /// Space between neighbouring bricks
    pub const BRICK_GAP_X: f32 = 1.0 / 80.0;
    pub const BRICK_GAP_Y: f32 = 0.7 / 70.0;

    /// Ball capacity used when the host asks for zero balls
    pub const DEFAULT_MAX_BALLS: usize = 100;

    /// Downward acceleration applied by the default integrator (units/s²)
    pub const GRAVITY: f32 = 0.4;

    /// Fully transparent pixel, painted over erased bricks
    pub const BLANK_PIXEL: u32 = 0x0000_0000;
}
