//! Error types for canvas, scoring, and i/o operations

use crate::geometry::BlockId;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all canvas and scoring operations
///
/// Every engine failure is a precondition violation detected before any
/// mutation is committed; there are no transient conditions and no retries.
#[derive(Debug)]
pub enum CanvasError {
    /// Referenced block id is absent from the current partition
    BlockNotFound {
        /// The missing id
        id: BlockId,
    },

    /// Cut coordinates are not strictly interior to the target block
    OutOfBoundsCut {
        /// Target block id
        id: BlockId,
    },

    /// Swap between blocks of different shapes
    ShapeMismatch {
        /// First block id
        id1: BlockId,
        /// Second block id
        id2: BlockId,
    },

    /// Merge between blocks that do not share a full edge
    NotAdjoint {
        /// First block id
        id1: BlockId,
        /// Second block id
        id2: BlockId,
    },

    /// Point query outside the canvas bounds
    OutOfCanvas {
        /// Queried x coordinate
        x: u32,
        /// Queried y coordinate
        y: u32,
    },

    /// Malformed initial configuration
    ConfigError {
        /// Description of what is wrong with the configuration
        reason: String,
    },

    /// Internal consistency fault: the partition invariant no longer holds
    ///
    /// Never produced by valid move sequences. Observing this means a bug
    /// upstream has broken the tiling invariant.
    Unreachable {
        /// Description of the observed inconsistency
        detail: String,
    },

    /// A move in a scored sequence could not be applied
    MoveFailed {
        /// 1-based position of the move in the sequence
        index: usize,
        /// Canonical text form of the offending move
        text: String,
        /// Underlying validation failure
        source: Box<CanvasError>,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered canvas to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockNotFound { id } => {
                write!(f, "Block {id} does not exist")
            }
            Self::OutOfBoundsCut { id } => {
                write!(f, "Cut coordinates are outside block {id}")
            }
            Self::ShapeMismatch { id1, id2 } => {
                write!(f, "Blocks {id1} and {id2} have different shapes")
            }
            Self::NotAdjoint { id1, id2 } => {
                write!(
                    f,
                    "Blocks {id1} and {id2} are not adjoint, or their touching sides differ in length"
                )
            }
            Self::OutOfCanvas { x, y } => {
                write!(f, "Point ({x}, {y}) is outside the canvas")
            }
            Self::ConfigError { reason } => {
                write!(f, "Invalid initial configuration: {reason}")
            }
            Self::Unreachable { detail } => {
                write!(f, "Partition invariant violated: {detail}")
            }
            Self::MoveFailed {
                index,
                text,
                source,
            } => {
                write!(f, "Could not apply move {index}: {text}: {source}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CanvasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MoveFailed { source, .. } => Some(source.as_ref()),
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for canvas results
pub type Result<T> = std::result::Result<T, CanvasError>;

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> CanvasError {
    CanvasError::ConfigError {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_failed_carries_index_and_text() {
        let failure = CanvasError::MoveFailed {
            index: 4,
            text: "swap [0.0] [0.1]".to_string(),
            source: Box::new(CanvasError::BlockNotFound {
                id: BlockId::root(0).child(1),
            }),
        };

        let message = failure.to_string();
        assert!(message.contains("move 4"));
        assert!(message.contains("swap [0.0] [0.1]"));
        assert!(message.contains("Block 0.1 does not exist"));

        let source = std::error::Error::source(&failure);
        assert!(source.is_some_and(|inner| inner.to_string().contains("0.1")));
    }
}
