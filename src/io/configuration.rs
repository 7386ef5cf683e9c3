//! Cost constants and the initial-configuration wire format

use crate::io::error::{CanvasError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// Cost factors shared with the external scoring authority
/// Cost factor for a line cut
pub const LINE_CUT_COST: u32 = 7;
/// Cost factor for a point cut
pub const POINT_CUT_COST: u32 = 10;
/// Cost factor for a recolor
pub const COLOR_COST: u32 = 5;
/// Cost factor for a swap
pub const SWAP_COST: u32 = 3;
/// Cost factor for a merge
pub const MERGE_COST: u32 = 1;

/// Weight applied to the summed pixel distance in the similarity penalty
pub const SIMILARITY_WEIGHT: f64 = 0.005;

/// A preset rectangle in the initial configuration
///
/// Corners are integer canvas coordinates with the top-right strictly
/// greater than the bottom-left on both axes.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetBlock {
    /// Block id token, e.g. `"0"`
    pub block_id: String,
    /// Bottom-left corner as `[x, y]`
    pub bottom_left: [u32; 2],
    /// Top-right corner as `[x, y]`
    pub top_right: [u32; 2],
    /// RGBA fill applied at construction
    pub color: [u8; 4],
}

/// Canvas dimensions and preset blocks consumed at construction
///
/// The wire form is JSON with camelCase keys:
/// `{"width": …, "height": …, "blocks": [{"blockId": …, "bottomLeft": [x, y],
/// "topRight": [x, y], "color": [r, g, b, a]}, …]}`.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Preset rectangles; must exactly tile the canvas
    #[serde(default)]
    pub blocks: Vec<PresetBlock>,
}

impl InitialConfig {
    /// The common configuration: a single white block `"0"` covering everything
    pub fn full_canvas(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            blocks: vec![PresetBlock {
                block_id: "0".to_string(),
                bottom_left: [0, 0],
                top_right: [width, height],
                color: [255, 255, 255, 255],
            }],
        }
    }

    /// Parse a configuration from its JSON wire form
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the text is not valid configuration JSON.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| CanvasError::ConfigError {
            reason: e.to_string(),
        })
    }

    /// Load a configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` when the file cannot be read and `ConfigError`
    /// when its contents are not valid configuration JSON.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CanvasError::FileSystem {
            path: path.to_path_buf(),
            operation: "read configuration",
            source: e,
        })?;
        Self::from_json_str(&text)
    }
}
