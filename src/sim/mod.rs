//! Authoritative simulation module
//!
//! Owns everything the physics side mutates:
//! - Ball layout and the velocity integrator seam
//! - Brick grid geometry and state
//! - The packed save state that crosses to the presentation side
//! - Collision resolution
//!
//! No rendering or platform dependencies beyond the coloring pattern index.

pub mod ball;
pub mod grid;
pub mod layout;
pub mod packed;
pub mod resolve;
pub mod save;
pub mod sweep;

pub use ball::{Ball, Gravity, Integrator};
pub use grid::{Brick, BrickGrid};
pub use layout::{BrickBounds, GridLayout, PixelRect};
pub use packed::PackedBricks;
pub use resolve::{Resolver, StepReport, reflect_off_brick, step};
pub use save::{SAVE_HEADER_LEN, SaveState};
pub use sweep::{Surface, resolve_exhaustive};
