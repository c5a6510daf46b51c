//! Two-bit-per-cell brick bitfield
//!
//! Cell `i` lives in byte `i / 4`; bit `2 * (i % 4)` is `destroyed` and the
//! bit above it is `needs_erasing`. Bits past the last cell stay zero. This is
//! the wire format of the save blob, so the layout must not change.

use serde::{Deserialize, Serialize};

use super::grid::Brick;
use crate::error::ChamberError;

const DESTROYED: u8 = 0b01;
const NEEDS_ERASING: u8 = 0b10;
/// Keeps only the `destroyed` bit of each of the four cells in a byte
const ERASE_MASK: u8 = 0b0101_0101;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedBricks {
    cells: usize,
    bytes: Vec<u8>,
}

impl PackedBricks {
    pub const CELLS_PER_BYTE: usize = 4;

    /// All cells alive and clean
    pub fn new(cells: usize) -> Self {
        Self {
            cells,
            bytes: vec![0; Self::byte_len(cells)],
        }
    }

    /// Bytes needed to pack `cells` cells
    #[inline]
    pub const fn byte_len(cells: usize) -> usize {
        cells.div_ceil(Self::CELLS_PER_BYTE)
    }

    /// Rebuild from wire bytes, rejecting bit patterns no game can reach
    pub fn from_bytes(cells: usize, bytes: &[u8]) -> Result<Self, ChamberError> {
        let expected = Self::byte_len(cells);
        if bytes.len() != expected {
            return Err(ChamberError::SaveLengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let tail_cells = cells % Self::CELLS_PER_BYTE;
        if tail_cells != 0 {
            let last = bytes[expected - 1];
            let padding = !((1u8 << (tail_cells * 2)) - 1);
            if last & padding != 0 {
                return Err(ChamberError::PaddingBitsNonZero { byte: last });
            }
        }

        let packed = Self {
            cells,
            bytes: bytes.to_vec(),
        };
        if let Some(index) = (0..cells).find(|&i| {
            let brick = packed.get(i);
            brick.needs_erasing && !brick.destroyed
        }) {
            return Err(ChamberError::ErasingLiveBrick { index });
        }
        Ok(packed)
    }

    #[inline]
    fn slot(index: usize) -> (usize, u32) {
        (
            index / Self::CELLS_PER_BYTE,
            (index % Self::CELLS_PER_BYTE) as u32 * 2,
        )
    }

    /// Number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells == 0
    }

    pub fn get(&self, index: usize) -> Brick {
        let (byte, shift) = Self::slot(index);
        let bits = (self.bytes[byte] >> shift) & (DESTROYED | NEEDS_ERASING);
        Brick {
            destroyed: bits & DESTROYED != 0,
            needs_erasing: bits & NEEDS_ERASING != 0,
        }
    }

    /// Raise the flags set in `brick`; flags already set are never lowered
    pub fn mark(&mut self, index: usize, brick: Brick) {
        let (byte, shift) = Self::slot(index);
        let mut bits = 0;
        if brick.destroyed {
            bits |= DESTROYED;
        }
        if brick.needs_erasing {
            bits |= NEEDS_ERASING;
        }
        self.bytes[byte] |= bits << shift;
    }

    /// Drop the erase request once the cell has been painted blank
    pub fn clear_needs_erasing(&mut self, index: usize) {
        let (byte, shift) = Self::slot(index);
        self.bytes[byte] &= !(NEEDS_ERASING << shift);
    }

    /// Drop every erase request at once, leaving `destroyed` untouched
    pub fn clear_erase_flags(&mut self) {
        for byte in &mut self.bytes {
            *byte &= ERASE_MASK;
        }
    }

    /// Every cell back to alive and clean
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Cells whose `destroyed` bit is clear
    pub fn live_count(&self) -> usize {
        (0..self.cells).filter(|&i| !self.get(i).destroyed).count()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
