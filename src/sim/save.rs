//! Persistent chamber state and its save blob codec
//!
//! Blob layout (little-endian):
//! - `u32` live brick count
//! - `u32` game count (bumped on every full clear)
//! - `u32` coloring pattern index
//! - packed brick bitfield, see [`PackedBricks`]

use serde::{Deserialize, Serialize};

use super::grid::BrickGrid;
use super::layout::GridLayout;
use super::packed::PackedBricks;
use crate::error::ChamberError;
use crate::render::ColorPattern;

/// Bytes taken by the three scalar counters
pub const SAVE_HEADER_LEN: usize = 3 * std::mem::size_of::<u32>();

/// Everything needed to resume a game on the other side of the boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    pub layout: GridLayout,
    pub grid: BrickGrid,
    /// Incremented once per clear-and-reset
    pub game_count: u32,
    /// Pattern used to paint the current game's bricks
    pub current_color_func: ColorPattern,
}

impl SaveState {
    pub fn new(layout: GridLayout) -> Self {
        Self::with_pattern(layout, ColorPattern::default())
    }

    pub fn with_pattern(layout: GridLayout, pattern: ColorPattern) -> Self {
        Self {
            grid: BrickGrid::new(&layout),
            layout,
            game_count: 0,
            current_color_func: pattern,
        }
    }

    /// Exact blob size for `layout`
    pub const fn encoded_len(layout: &GridLayout) -> usize {
        SAVE_HEADER_LEN + PackedBricks::byte_len(layout.cols * layout.rows)
    }

    #[inline]
    pub fn bricks_count(&self) -> u32 {
        self.grid.bricks_count()
    }

    /// Reset the grid and move on to the next game and coloring pattern
    pub fn start_next_game(&mut self) {
        self.grid.reset();
        self.current_color_func = self.current_color_func.next();
        self.game_count = self.game_count.wrapping_add(1);
    }

    /// Write the blob into `out`, which must be exactly [`Self::encoded_len`] bytes
    pub fn encode_into(&self, out: &mut [u8]) -> Result<(), ChamberError> {
        let expected = Self::encoded_len(&self.layout);
        if out.len() != expected {
            return Err(ChamberError::SaveLengthMismatch {
                expected,
                actual: out.len(),
            });
        }

        self.write_blob(out);
        Ok(())
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![0; Self::encoded_len(&self.layout)];
        self.write_blob(&mut out);
        out
    }

    /// `out` is exactly [`Self::encoded_len`] bytes
    fn write_blob(&self, out: &mut [u8]) {
        let (header, bits) = out.split_at_mut(SAVE_HEADER_LEN);
        header[0..4].copy_from_slice(&self.grid.bricks_count().to_le_bytes());
        header[4..8].copy_from_slice(&self.game_count.to_le_bytes());
        header[8..12].copy_from_slice(&self.current_color_func.index().to_le_bytes());
        bits.copy_from_slice(self.grid.packed().as_bytes());
    }

    /// Parse a blob produced by [`Self::encode`] for the same layout
    pub fn decode(layout: GridLayout, bytes: &[u8]) -> Result<Self, ChamberError> {
        let expected = Self::encoded_len(&layout);
        if bytes.len() != expected {
            return Err(ChamberError::SaveLengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let (header, bits) = bytes.split_at(SAVE_HEADER_LEN);
        let read_u32 = |at: usize| {
            u32::from_le_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]])
        };
        let bricks_count = read_u32(0);
        let game_count = read_u32(4);
        let pattern_index = read_u32(8);

        let current_color_func = ColorPattern::from_index(pattern_index)
            .ok_or(ChamberError::UnknownColorPattern {
                index: pattern_index,
            })?;
        let packed = PackedBricks::from_bytes(layout.cells(), bits)?;
        let counted = packed.live_count() as u32;
        if counted != bricks_count {
            return Err(ChamberError::BrickCountMismatch {
                stored: bricks_count,
                counted,
            });
        }

        Ok(Self {
            grid: BrickGrid::from_parts(&layout, packed, bricks_count),
            layout,
            game_count,
            current_color_func,
        })
    }

    /// Replace this state with a decoded blob, leaving it untouched on error
    pub fn load_from(&mut self, bytes: &[u8]) -> Result<(), ChamberError> {
        *self = Self::decode(self.layout, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encoded_len() {
        assert_eq!(SaveState::encoded_len(&GridLayout::default()), 12 + 27);
        assert_eq!(SaveState::encoded_len(&GridLayout::new(2, 2)), 12 + 1);
    }

    #[test]
    fn test_fresh_state_blob() {
        let state = SaveState::new(GridLayout::default());
        let blob = state.encode();
        assert_eq!(&blob[0..4], &108u32.to_le_bytes());
        assert_eq!(&blob[4..12], &[0; 8]);
        assert!(blob[12..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_start_next_game() {
        let mut state = SaveState::new(GridLayout::new(2, 2));
        state.grid.destroy(1, 1);
        state.start_next_game();
        assert_eq!(state.bricks_count(), 4);
        assert_eq!(state.game_count, 1);
        assert_eq!(state.current_color_func, ColorPattern::default().next());
    }

    #[test]
    fn test_decode_rejects_bad_count() {
        let mut blob = SaveState::new(GridLayout::new(2, 2)).encode();
        blob[0] = 3;
        assert_eq!(
            SaveState::decode(GridLayout::new(2, 2), &blob),
            Err(ChamberError::BrickCountMismatch {
                stored: 3,
                counted: 4
            })
        );
    }

    #[test]
    fn test_decode_rejects_unknown_pattern() {
        let mut blob = SaveState::new(GridLayout::new(2, 2)).encode();
        blob[8] = 200;
        assert_eq!(
            SaveState::decode(GridLayout::new(2, 2), &blob),
            Err(ChamberError::UnknownColorPattern { index: 200 })
        );
    }

    #[test]
    fn test_load_from_keeps_state_on_error() {
        let mut state = SaveState::new(GridLayout::new(3, 3));
        state.grid.destroy(0, 0);
        let before = state.clone();
        assert!(state.load_from(&[0; 4]).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_encode_into_wrong_size() {
        let state = SaveState::new(GridLayout::default());
        let mut out = [0u8; 10];
        assert_eq!(
            state.encode_into(&mut out),
            Err(ChamberError::SaveLengthMismatch {
                expected: 39,
                actual: 10
            })
        );
    }

    #[test]
    fn test_encode_matches_encode_into() {
        let mut state = SaveState::new(GridLayout::default());
        state.grid.destroy(3, 7);
        state.start_next_game();
        state.grid.destroy(8, 11);

        let mut out = vec![0xaa; SaveState::encoded_len(&state.layout)];
        state.encode_into(&mut out).unwrap();
        assert_eq!(state.encode(), out);
        assert_eq!(&out[0..4], &107u32.to_le_bytes());
        assert_eq!(&out[4..8], &1u32.to_le_bytes());
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(
            kills in proptest::collection::vec((0usize..9, 0usize..12, any::<bool>()), 0..60),
            games in 0u32..1000,
            pattern in 0u32..ColorPattern::COUNT as u32,
        ) {
            let layout = GridLayout::default();
            let mut state = SaveState::new(layout);
            state.game_count = games;
            state.current_color_func = ColorPattern::from_index(pattern).unwrap();
            for (col, row, erased) in kills {
                if state.grid.destroy(col, row) && erased {
                    state.grid.clear_needs_erasing(col, row);
                }
            }
            let decoded = SaveState::decode(layout, &state.encode()).unwrap();
            prop_assert_eq!(decoded, state);
        }
    }
}
