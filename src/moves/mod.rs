//! The closed move vocabulary and its canonical text encoding
//!
//! Moves are immutable value objects: a strategy produces them, the canvas
//! engine consumes them, and `to_text` renders the positional wire form read
//! by external submission tooling. The text forms must match that move
//! language byte for byte.

use crate::geometry::{BlockId, Color};
use std::fmt;

/// Cut axis for a line cut
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Vertical line at a fixed x coordinate
    Vertical,
    /// Horizontal line at a fixed y coordinate
    Horizontal,
}

impl Orientation {
    /// Single-letter axis tag used by the text encoding
    pub const fn axis_tag(self) -> char {
        match self {
            Self::Vertical => 'x',
            Self::Horizontal => 'y',
        }
    }
}

/// One editing operation against a canvas
///
/// Moves carry no canvas reference; validation happens at application time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Move {
    /// Split a block in two along an axis-aligned line
    LineCut {
        /// Target block
        block: BlockId,
        /// Cut axis
        orientation: Orientation,
        /// Canvas coordinate of the cut line, strictly interior to the block
        line: u32,
    },
    /// Split a block into four quadrants around an interior point
    PointCut {
        /// Target block
        block: BlockId,
        /// X coordinate of the cut point
        x: u32,
        /// Y coordinate of the cut point
        y: u32,
    },
    /// Paint every pixel of a block with one color
    Color {
        /// Target block
        block: BlockId,
        /// Fill color
        color: Color,
    },
    /// Exchange the pixel contents and origins of two same-shaped blocks
    Swap {
        /// First block
        block1: BlockId,
        /// Second block
        block2: BlockId,
    },
    /// Replace two edge-adjacent blocks with their union
    Merge {
        /// First block
        block1: BlockId,
        /// Second block
        block2: BlockId,
    },
}

impl Move {
    /// Render the canonical positional text form
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineCut {
                block,
                orientation,
                line,
            } => {
                write!(f, "cut [{block}] [{}] [{line}]", orientation.axis_tag())
            }
            Self::PointCut { block, x, y } => write!(f, "cut [{block}] [{x}, {y}]"),
            Self::Color { block, color } => {
                write!(
                    f,
                    "color [{block}] [{}, {}, {}, {}]",
                    color.r, color.g, color.b, color.a
                )
            }
            Self::Swap { block1, block2 } => write!(f, "swap [{block1}] [{block2}]"),
            Self::Merge { block1, block2 } => write!(f, "merge [{block1}] [{block2}]"),
        }
    }
}
