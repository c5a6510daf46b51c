//! Software rendering module
//!
//! Paints solid brick rectangles into the shared pixel canvas, repainting
//! only what changed since the previous frame.

pub mod canvas;
pub mod palette;
pub mod scheduler;

pub use canvas::Canvas;
pub use palette::ColorPattern;
pub use scheduler::{RenderMode, RenderReport, Renderer};
