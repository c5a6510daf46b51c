//! Errors reported by the chamber
//!
//! Grid indices are never checked here; only inputs that cross the host
//! boundary (save blobs, canvas sizes, config documents) are validated.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChamberError {
    /// Save blob is not exactly the size this grid layout encodes to
    SaveLengthMismatch { expected: usize, actual: usize },
    /// Coloring pattern index outside the pattern table
    UnknownColorPattern { index: u32 },
    /// Bits beyond the last cell of the packed bitfield are set
    PaddingBitsNonZero { byte: u8 },
    /// A cell is flagged for erasing without being destroyed
    ErasingLiveBrick { index: usize },
    /// Stored live count disagrees with the bitfield
    BrickCountMismatch { stored: u32, counted: u32 },
    /// Requested canvas view does not fit the allocated canvas
    CanvasTooSmall { requested: usize, capacity: usize },
    /// `step` asked for more balls than the ball buffer holds
    TooManyBalls { requested: usize, capacity: usize },
    /// Configuration document could not be parsed
    InvalidConfig(String),
}

impl fmt::Display for ChamberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SaveLengthMismatch { expected, actual } => write!(
                f,
                "save blob length mismatch: expected {expected} bytes, got {actual}"
            ),
            Self::UnknownColorPattern { index } => {
                write!(f, "unknown coloring pattern index: {index}")
            }
            Self::PaddingBitsNonZero { byte } => {
                write!(f, "packed brick padding bits set: 0x{byte:02x}")
            }
            Self::ErasingLiveBrick { index } => {
                write!(f, "brick {index} needs erasing but is not destroyed")
            }
            Self::BrickCountMismatch { stored, counted } => write!(
                f,
                "brick count mismatch: header says {stored}, bitfield has {counted} live"
            ),
            Self::CanvasTooSmall {
                requested,
                capacity,
            } => write!(
                f,
                "canvas view of {requested} pixels exceeds capacity of {capacity}"
            ),
            Self::TooManyBalls {
                requested,
                capacity,
            } => write!(
                f,
                "asked to step {requested} balls but the buffer holds {capacity}"
            ),
            Self::InvalidConfig(reason) => write!(f, "invalid chamber config: {reason}"),
        }
    }
}

impl std::error::Error for ChamberError {}
