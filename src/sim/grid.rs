//! Destructible brick grid
//!
//! Within one game a brick only ever goes from alive to destroyed; the only
//! way back is a whole-grid reset once the last brick falls.

use serde::{Deserialize, Serialize};

use super::layout::GridLayout;
use super::packed::PackedBricks;

/// State of a single brick cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Brick {
    /// No longer collidable or painted
    pub destroyed: bool,
    /// Destroyed since the last paint, blank it on the next incremental render
    pub needs_erasing: bool,
}

impl Brick {
    pub const ALIVE: Brick = Brick {
        destroyed: false,
        needs_erasing: false,
    };

    /// Freshly knocked out, waiting to be erased
    pub const FALLEN: Brick = Brick {
        destroyed: true,
        needs_erasing: true,
    };
}

/// Fixed-size grid of bricks with its live-brick counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickGrid {
    cols: usize,
    rows: usize,
    bricks: PackedBricks,
    bricks_count: u32,
}

impl BrickGrid {
    /// All bricks alive
    pub fn new(layout: &GridLayout) -> Self {
        let cells = layout.cells();
        Self {
            cols: layout.cols,
            rows: layout.rows,
            bricks: PackedBricks::new(cells),
            bricks_count: cells as u32,
        }
    }

    /// Assemble from decoded parts; the caller has checked the count
    pub(crate) fn from_parts(
        layout: &GridLayout,
        bricks: PackedBricks,
        bricks_count: u32,
    ) -> Self {
        Self {
            cols: layout.cols,
            rows: layout.rows,
            bricks,
            bricks_count,
        }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cells(&self) -> usize {
        self.cols * self.rows
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    pub fn get(&self, col: usize, row: usize) -> Brick {
        self.bricks.get(self.index(col, row))
    }

    /// Raise the flags of `brick` on a cell; never revives a destroyed brick
    pub fn set(&mut self, col: usize, row: usize, brick: Brick) {
        let index = self.index(col, row);
        self.bricks.mark(index, brick);
    }

    /// Knock out a live brick. Returns false, changing nothing, if it was already down.
    pub fn destroy(&mut self, col: usize, row: usize) -> bool {
        let index = self.index(col, row);
        if self.bricks.get(index).destroyed {
            return false;
        }
        self.bricks.mark(index, Brick::FALLEN);
        self.bricks_count -= 1;
        true
    }

    pub fn clear_needs_erasing(&mut self, col: usize, row: usize) {
        let index = self.index(col, row);
        self.bricks.clear_needs_erasing(index);
    }

    /// Forget which bricks still need erasing, once they have been handed off for painting
    pub fn clear_erase_flags(&mut self) {
        self.bricks.clear_erase_flags();
    }

    /// Every brick back to alive and the counter back to full
    pub fn reset(&mut self) {
        self.bricks.clear();
        self.bricks_count = self.cells() as u32;
    }

    /// Live bricks remaining
    #[inline]
    pub fn bricks_count(&self) -> u32 {
        self.bricks_count
    }

    #[inline]
    pub fn is_cleared(&self) -> bool {
        self.bricks_count == 0
    }

    /// Cells in row-major order as `(col, row, brick)`
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Brick)> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| (col, row, self.get(col, row))))
    }

    #[inline]
    pub fn packed(&self) -> &PackedBricks {
        &self.bricks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_full() {
        let grid = BrickGrid::new(&GridLayout::default());
        assert_eq!(grid.bricks_count(), 108);
        assert!(grid.iter_cells().all(|(_, _, b)| b == Brick::ALIVE));
    }

    #[test]
    fn test_destroy_decrements_once() {
        let mut grid = BrickGrid::new(&GridLayout::new(3, 2));
        assert!(grid.destroy(2, 1));
        assert!(!grid.destroy(2, 1));
        assert_eq!(grid.bricks_count(), 5);
        assert_eq!(grid.get(2, 1), Brick::FALLEN);
        assert_eq!(grid.packed().live_count(), 5);
    }

    #[test]
    fn test_set_is_monotonic() {
        let mut grid = BrickGrid::new(&GridLayout::new(2, 2));
        grid.set(0, 1, Brick::FALLEN);
        grid.set(0, 1, Brick::ALIVE);
        assert_eq!(grid.get(0, 1), Brick::FALLEN);
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut grid = BrickGrid::new(&GridLayout::new(2, 2));
        for (col, row) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            grid.destroy(col, row);
        }
        assert!(grid.is_cleared());
        grid.reset();
        assert_eq!(grid.bricks_count(), 4);
        assert!(grid.iter_cells().all(|(_, _, b)| b == Brick::ALIVE));
    }

    #[test]
    fn test_clear_erase_flags() {
        let mut grid = BrickGrid::new(&GridLayout::new(3, 3));
        grid.destroy(1, 1);
        grid.destroy(2, 0);
        grid.clear_erase_flags();
        assert_eq!(grid.bricks_count(), 7);
        assert!(grid.iter_cells().all(|(_, _, b)| !b.needs_erasing));
        assert!(grid.get(1, 1).destroyed && grid.get(2, 0).destroyed);
    }

    #[test]
    fn test_iter_cells_row_major() {
        let grid = BrickGrid::new(&GridLayout::new(2, 3));
        let order: Vec<_> = grid.iter_cells().map(|(c, r, _)| (c, r)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]);
    }
}
