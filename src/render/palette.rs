//! Brick coloring patterns
//!
//! Colors are packed `0xAABBGGRR`, so the little-endian bytes of a pixel read
//! R, G, B, A in memory order.

use serde::{Deserialize, Serialize};

use crate::sim::GridLayout;

pub const OPAQUE_WHITE: u32 = 0xffff_ffff;
pub const OPAQUE_BLACK: u32 = 0xff00_0000;
pub const OPAQUE_RED: u32 = 0xff00_00ff;
pub const OPAQUE_BLUE: u32 = 0xffff_0000;

/// gist_rainbow sampled at 13 evenly spaced points
const RAINBOW: [u32; 13] = [
    0xff2800ff, 0xff0048ff, 0xff00b9ff, 0xff00ffd2, 0xff00ff5b, 0xff15ff00, 0xff86ff00,
    0xfffcff00, 0xffff8f00, 0xffff1d00, 0xffff005a, 0xffff00cc, 0xffbf00ff,
];

/// Fixed, ordered set of brick coloring patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorPattern {
    /// One rainbow hue per row
    #[default]
    Rainbow,
    /// Blue/red checkerboard
    Alternating,
    /// White and black rows
    Zebra,
    /// Red disc with a black rim on white
    Sphere,
    /// Blue, white and red thirds
    France,
}

impl ColorPattern {
    pub const ALL: [ColorPattern; 5] = [
        ColorPattern::Rainbow,
        ColorPattern::Alternating,
        ColorPattern::Zebra,
        ColorPattern::Sphere,
        ColorPattern::France,
    ];
    pub const COUNT: usize = Self::ALL.len();

    /// Position in the pattern table, as stored in the save blob
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Pattern at `index`, wrapping past the end of the table
    pub fn wrapping(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    /// Pattern used after the next full clear
    pub fn next(self) -> Self {
        Self::wrapping(self as usize + 1)
    }

    pub fn color(self, col: usize, row: usize, layout: &GridLayout) -> u32 {
        match self {
            ColorPattern::Rainbow => RAINBOW[row % RAINBOW.len()],
            ColorPattern::Alternating => {
                if (col + row) % 2 == 0 {
                    OPAQUE_BLUE
                } else {
                    OPAQUE_RED
                }
            }
            ColorPattern::Zebra => {
                if row % 2 == 0 {
                    OPAQUE_WHITE
                } else {
                    OPAQUE_BLACK
                }
            }
            ColorPattern::Sphere => {
                let dx = col as f64 - (layout.cols / 2) as f64;
                let dy = row as f64 - (layout.rows / 2) as f64;
                let radius = (dx * dx + dy * dy).sqrt() as usize;
                match radius {
                    0..4 => OPAQUE_RED,
                    4 => OPAQUE_BLACK,
                    _ => OPAQUE_WHITE,
                }
            }
            ColorPattern::France => {
                if col < layout.cols / 3 {
                    OPAQUE_BLUE
                } else if col < 2 * layout.cols / 3 {
                    OPAQUE_WHITE
                } else {
                    OPAQUE_RED
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps() {
        assert_eq!(ColorPattern::Rainbow.next(), ColorPattern::Alternating);
        assert_eq!(ColorPattern::France.next(), ColorPattern::Rainbow);
        assert_eq!(ColorPattern::wrapping(7), ColorPattern::Zebra);
    }

    #[test]
    fn test_index_round_trip() {
        for pattern in ColorPattern::ALL {
            assert_eq!(ColorPattern::from_index(pattern.index()), Some(pattern));
        }
        assert_eq!(ColorPattern::from_index(5), None);
    }

    #[test]
    fn test_sphere_rings() {
        let layout = GridLayout::default();
        assert_eq!(ColorPattern::Sphere.color(4, 6, &layout), OPAQUE_RED);
        assert_eq!(ColorPattern::Sphere.color(0, 6, &layout), OPAQUE_BLACK);
        assert_eq!(ColorPattern::Sphere.color(0, 0, &layout), OPAQUE_WHITE);
    }

    #[test]
    fn test_france_thirds() {
        let layout = GridLayout::default();
        let colors: Vec<_> = (0..9)
            .map(|col| ColorPattern::France.color(col, 0, &layout))
            .collect();
        assert_eq!(&colors[0..3], &[OPAQUE_BLUE; 3]);
        assert_eq!(&colors[3..6], &[OPAQUE_WHITE; 3]);
        assert_eq!(&colors[6..9], &[OPAQUE_RED; 3]);
    }

    #[test]
    fn test_rainbow_by_row() {
        let layout = GridLayout::default();
        assert_eq!(ColorPattern::Rainbow.color(3, 0, &layout), 0xff2800ff);
        assert_eq!(
            ColorPattern::Rainbow.color(0, 11, &layout),
            ColorPattern::Rainbow.color(8, 11, &layout)
        );
    }
}
