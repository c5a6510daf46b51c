//! Brick grid geometry
//!
//! Cell positions are never stored; they are derived from (col, row), the
//! margins and the gaps every time they are needed. Chamber space has its
//! origin at the bottom-left with y pointing up, while row 0 is the top row.

use std::ops::Range;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned bounds of one brick in chamber space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Pixel rectangle of one brick on a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Dimensions and spacing of the brick grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    pub brick_size: Vec2,
    pub gap: Vec2,
    /// Space between the chamber edge and the outermost bricks
    pub margin: Vec2,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(BRICKS_PER_ROW, BRICK_ROWS)
    }
}

impl GridLayout {
    /// Grid of `cols × rows` standard bricks, centered in the chamber
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::with_geometry(
            cols,
            rows,
            Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            Vec2::new(BRICK_GAP_X, BRICK_GAP_Y),
        )
    }

    pub fn with_geometry(cols: usize, rows: usize, brick_size: Vec2, gap: Vec2) -> Self {
        let counts = Vec2::new(cols as f32, rows as f32);
        let gaps = Vec2::new(cols.saturating_sub(1) as f32, rows.saturating_sub(1) as f32);
        let used = brick_size * counts + gap * gaps;
        let margin = (Vec2::new(CHAMBER_WIDTH, CHAMBER_HEIGHT) - used) / 2.0;
        Self {
            cols,
            rows,
            brick_size,
            gap,
            margin,
        }
    }

    /// Total number of cells
    #[inline]
    pub fn cells(&self) -> usize {
        self.cols * self.rows
    }

    /// Linear cell index, row-major
    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Distance from one brick to the next
    #[inline]
    pub fn pitch(&self) -> Vec2 {
        self.brick_size + self.gap
    }

    /// Top-left corner of a brick in chamber space
    pub fn brick_origin(&self, col: usize, row: usize) -> Vec2 {
        let pitch = self.pitch();
        Vec2::new(
            self.margin.x + col as f32 * pitch.x,
            CHAMBER_HEIGHT - (self.margin.y + row as f32 * pitch.y),
        )
    }

    pub fn brick_bounds(&self, col: usize, row: usize) -> BrickBounds {
        let origin = self.brick_origin(col, row);
        BrickBounds {
            left: origin.x,
            right: origin.x + self.brick_size.x,
            top: origin.y,
            bottom: origin.y - self.brick_size.y,
        }
    }

    /// Cell containing `point`, truncated toward zero and not bounds-checked
    pub fn cell_at(&self, point: Vec2) -> (i64, i64) {
        let pitch = self.pitch();
        let col = (point.x - self.margin.x) / pitch.x;
        let row = (CHAMBER_HEIGHT - point.y - self.margin.y) / pitch.y;
        (col as i64, row as i64)
    }

    /// Column and row ranges of the 3×3 window of candidate bricks around `point`
    pub fn neighborhood(&self, point: Vec2) -> (Range<usize>, Range<usize>) {
        let (col, row) = self.cell_at(point);
        (window(col, self.cols), window(row, self.rows))
    }

    /// Pixel rectangle of a brick on a `canvas_width × canvas_height` canvas
    pub fn pixel_rect(
        &self,
        col: usize,
        row: usize,
        canvas_width: usize,
        canvas_height: usize,
    ) -> PixelRect {
        let pitch = self.pitch();
        let scale = Vec2::new(
            canvas_width as f32 / CHAMBER_WIDTH,
            canvas_height as f32 / CHAMBER_HEIGHT,
        );
        let top_left = Vec2::new(
            self.margin.x + col as f32 * pitch.x,
            self.margin.y + row as f32 * pitch.y,
        ) * scale;
        let size = self.brick_size * scale;
        PixelRect {
            x: top_left.x as usize,
            y: top_left.y as usize,
            width: size.x as usize,
            height: size.y as usize,
        }
    }
}

/// Three-wide index window kept inside `0..dim`
///
/// Axes shorter than three cells are scanned whole.
fn window(center: i64, dim: usize) -> Range<usize> {
    if dim < 3 {
        return 0..dim;
    }
    let center = center.clamp(1, dim as i64 - 2) as usize;
    center - 1..center + 2
}
