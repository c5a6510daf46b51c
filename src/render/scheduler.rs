//! Full vs incremental brick painting
//!
//! A full pass paints every cell with the current pattern. After that only
//! cells flagged `needs_erasing` are touched, each painted blank once. A
//! change in `game_count` means the grid was reset on the physics side, which
//! forces the next pass to be full again.

use crate::consts::BLANK_PIXEL;
use crate::error::ChamberError;
use crate::sim::SaveState;

use super::canvas::Canvas;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Next pass repaints every cell
    FullPending,
    /// Next pass only blanks dirty cells
    Incremental,
}

/// What one render pass painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    pub full: bool,
    pub cells_painted: usize,
}

/// Presentation-side render cache
#[derive(Debug, Clone)]
pub struct Renderer {
    mode: RenderMode,
    /// Game count seen on the last pass
    game_count: u32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            mode: RenderMode::FullPending,
            game_count: 0,
        }
    }

    #[inline]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Repaint everything on the next pass
    pub fn force_full(&mut self) {
        self.mode = RenderMode::FullPending;
    }

    /// Paint `state` into a `width × height` view of `canvas`
    pub fn render(
        &mut self,
        state: &mut SaveState,
        canvas: &mut Canvas,
        width: usize,
        height: usize,
    ) -> Result<RenderReport, ChamberError> {
        canvas.set_view(width, height)?;

        if self.game_count != state.game_count {
            log::debug!(
                "Game count changed {} -> {}, forcing full render",
                self.game_count,
                state.game_count
            );
            self.game_count = state.game_count;
            self.force_full();
        }

        let report = match self.mode {
            RenderMode::FullPending => {
                let painted = paint_all(state, canvas);
                self.mode = RenderMode::Incremental;
                RenderReport {
                    full: true,
                    cells_painted: painted,
                }
            }
            RenderMode::Incremental => RenderReport {
                full: false,
                cells_painted: erase_dirty(state, canvas),
            },
        };
        Ok(report)
    }
}

fn paint_all(state: &SaveState, canvas: &mut Canvas) -> usize {
    let layout = &state.layout;
    let pattern = state.current_color_func;
    let (width, height) = (canvas.width(), canvas.height());
    for row in 0..layout.rows {
        for col in 0..layout.cols {
            let rect = layout.pixel_rect(col, row, width, height);
            canvas.fill_rect(rect, pattern.color(col, row, layout));
        }
    }
    layout.cells()
}

fn erase_dirty(state: &mut SaveState, canvas: &mut Canvas) -> usize {
    let (width, height) = (canvas.width(), canvas.height());
    let mut painted = 0;
    for row in 0..state.layout.rows {
        for col in 0..state.layout.cols {
            if !state.grid.get(col, row).needs_erasing {
                continue;
            }
            let rect = state.layout.pixel_rect(col, row, width, height);
            canvas.fill_rect(rect, BLANK_PIXEL);
            state.grid.clear_needs_erasing(col, row);
            painted += 1;
        }
    }
    painted
}
