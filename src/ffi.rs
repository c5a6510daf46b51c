//! Entry points exported to the host
//!
//! On wasm32 these are exported under the names the host expects (`init`,
//! `step`, `render`, `save`, `load`, `ballsMemory`, `canvasMemory`,
//! `saveMemory`, `saveSize`). Elsewhere they are plain functions, which keeps
//! them testable. One chamber instance lives per thread; the wasm host is
//! single-threaded and never calls in concurrently.
//!
//! Calls made before `init` are logged and ignored.

use std::cell::RefCell;
use std::ptr;

use crate::chamber::Chamber;

thread_local! {
    static CHAMBER: RefCell<Option<Chamber>> = const { RefCell::new(None) };
}

fn with_chamber<R>(entry: &str, f: impl FnOnce(&mut Chamber) -> R) -> Option<R> {
    CHAMBER.with_borrow_mut(|chamber| match chamber {
        Some(chamber) => Some(f(chamber)),
        None => {
            log::error!("{entry}() called before init()");
            None
        }
    })
}

#[cfg(target_arch = "wasm32")]
fn install_logger() {
    console_error_panic_hook::set_once();
    // Already installed if init runs twice
    let _ = console_log::init_with_level(log::Level::Info);
}

#[cfg(not(target_arch = "wasm32"))]
fn install_logger() {}

/// One-time setup of the ball, canvas and save buffers
///
/// Either size may be zero depending on which context is calling.
#[cfg_attr(target_arch = "wasm32", unsafe(export_name = "init"))]
pub extern "C" fn init(max_num_balls: usize, max_canvas_size: usize) {
    install_logger();
    let chamber = Chamber::new(max_num_balls, max_canvas_size);
    CHAMBER.with_borrow_mut(|slot| *slot = Some(chamber));
}

/// Run physics for the first `num_balls` balls in the ball buffer
#[cfg_attr(target_arch = "wasm32", unsafe(export_name = "step"))]
pub extern "C" fn step(num_balls: usize, delta: f32) {
    with_chamber("step", |chamber| {
        if let Err(e) = chamber.step(num_balls, delta) {
            log::error!("step: {e}");
        }
    });
}

/// Paint the bricks into the canvas buffer
#[cfg_attr(target_arch = "wasm32", unsafe(export_name = "render"))]
pub extern "C" fn render(canvas_width: usize, canvas_height: usize) {
    with_chamber("render", |chamber| {
        if let Err(e) = chamber.render(canvas_width, canvas_height) {
            log::error!("render: {e}");
        }
    });
}

/// Serialize chamber state into the save buffer
#[cfg_attr(target_arch = "wasm32", unsafe(export_name = "save"))]
pub extern "C" fn save() {
    with_chamber("save", Chamber::save);
}

/// Deserialize chamber state from the save buffer
#[cfg_attr(target_arch = "wasm32", unsafe(export_name = "load"))]
pub extern "C" fn load() {
    with_chamber("load", |chamber| {
        if let Err(e) = chamber.load() {
            log::warn!("load: {e}, keeping previous state");
        }
    });
}

/// Where the host writes up to `max_num_balls` balls before each step
#[cfg_attr(target_arch = "wasm32", unsafe(export_name = "ballsMemory"))]
pub extern "C" fn balls_memory() -> *mut u8 {
    with_chamber("ballsMemory", |chamber| chamber.balls_ptr().cast::<u8>())
        .unwrap_or(ptr::null_mut())
}

/// Where `render` writes pixels, 4 bytes each
#[cfg_attr(target_arch = "wasm32", unsafe(export_name = "canvasMemory"))]
pub extern "C" fn canvas_memory() -> *mut u8 {
    with_chamber("canvasMemory", |chamber| chamber.canvas_ptr().cast::<u8>())
        .unwrap_or(ptr::null_mut())
}

/// Save blob written by `save` and read by `load`
#[cfg_attr(target_arch = "wasm32", unsafe(export_name = "saveMemory"))]
pub extern "C" fn save_memory() -> *mut u8 {
    with_chamber("saveMemory", Chamber::save_ptr).unwrap_or(ptr::null_mut())
}

/// Length of the save blob in bytes
#[cfg_attr(target_arch = "wasm32", unsafe(export_name = "saveSize"))]
pub extern "C" fn save_size() -> usize {
    with_chamber("saveSize", |chamber| chamber.save_size()).unwrap_or(0)
}
