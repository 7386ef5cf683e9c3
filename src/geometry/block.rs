//! Block identity and rectangle data for the canvas partition

use std::fmt;
use std::str::FromStr;

/// Structured identity of a block
///
/// Ids form a hierarchy: cut children extend their parent's path with a
/// digit, while configuration presets and merge results are plain numeric
/// roots. The canonical text form joins root and path with dots, e.g.
/// `"0"` or `"0.1.3"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockId {
    root: u32,
    path: Vec<u8>,
}

impl BlockId {
    /// Create a root id with an empty path
    pub const fn root(root: u32) -> Self {
        Self {
            root,
            path: Vec::new(),
        }
    }

    /// Numeric root of this id, ignoring any cut path
    pub const fn root_value(&self) -> u32 {
        self.root
    }

    /// Derive the id of the `index`-th cut child
    #[must_use]
    pub fn child(&self, index: u8) -> Self {
        let mut path = self.path.clone();
        path.push(index);
        Self {
            root: self.root,
            path,
        }
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for segment in &self.path {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

/// Error returned when a block id token cannot be parsed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseBlockIdError {
    token: String,
}

impl fmt::Display for ParseBlockIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid block id token '{}'", self.token)
    }
}

impl std::error::Error for ParseBlockIdError {}

impl FromStr for BlockId {
    type Err = ParseBlockIdError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut segments = token.split('.');

        let root = segments
            .next()
            .and_then(|segment| segment.parse().ok())
            .ok_or_else(|| ParseBlockIdError {
                token: token.to_string(),
            })?;

        let mut path = Vec::new();
        for segment in segments {
            let index = segment.parse().ok().ok_or_else(|| ParseBlockIdError {
                token: token.to_string(),
            })?;
            path.push(index);
        }

        Ok(Self { root, path })
    }
}

/// A named axis-aligned rectangle in the canvas partition
///
/// Coordinates are bottom-left origin, x rightward, y upward; width and
/// height are always positive. A block is immutable except its origin,
/// which a swap relocates in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Identity within the owning canvas
    pub id: BlockId,
    /// Left edge
    pub x: u32,
    /// Bottom edge
    pub y: u32,
    /// Horizontal extent
    pub width: u32,
    /// Vertical extent
    pub height: u32,
    /// Derived pixel count, `width * height`
    pub size: u32,
}

impl Block {
    /// Create a block, deriving its size from the extents
    pub const fn new(id: BlockId, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            size: width * height,
        }
    }

    /// One past the right edge
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the top edge
    pub const fn top(&self) -> u32 {
        self.y + self.height
    }

    /// Whether a canvas point falls inside this block
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_text_round_trip() {
        let id: BlockId = "7.0.3.1".parse().unwrap();
        assert_eq!(id, BlockId::root(7).child(0).child(3).child(1));
        assert_eq!(id.to_string(), "7.0.3.1");

        let plain: BlockId = "12".parse().unwrap();
        assert_eq!(plain, BlockId::root(12));
        assert_eq!(plain.to_string(), "12");
    }

    #[test]
    fn test_id_rejects_malformed_tokens() {
        assert!("".parse::<BlockId>().is_err());
        assert!("x".parse::<BlockId>().is_err());
        assert!("0.".parse::<BlockId>().is_err());
        assert!("0..1".parse::<BlockId>().is_err());
        assert!("-1".parse::<BlockId>().is_err());
    }

    #[test]
    fn test_block_containment_is_half_open() {
        let block = Block::new(BlockId::root(0), 2, 3, 4, 5);
        assert_eq!(block.size, 20);
        assert!(block.contains(2, 3));
        assert!(block.contains(5, 7));
        assert!(!block.contains(6, 3));
        assert!(!block.contains(2, 8));
        assert!(!block.contains(1, 3));
    }
}
