//! Canvas engine owning the pixel buffer and the block partition
//!
//! A canvas is constructed from an initial configuration and mutated move by
//! move through [`Canvas::apply`]. Every application validates its
//! preconditions completely before touching any state and returns the integer
//! cost of the move. The live blocks exactly tile the canvas rectangle at all
//! times; search-style callers clone the whole canvas to explore alternative
//! futures in isolation.

mod coverage;

use crate::geometry::{Block, BlockId, Color};
use crate::io::configuration::{
    COLOR_COST, InitialConfig, LINE_CUT_COST, MERGE_COST, POINT_CUT_COST, SWAP_COST,
};
use crate::io::error::{CanvasError, Result, config_error};
use crate::moves::{Move, Orientation};
use ndarray::{Array3, ArrayView3, ArrayViewMut3, Axis, s};
use std::collections::HashMap;

/// The mutable raster target and its current partition into blocks
///
/// Owns its pixel buffer and block map exclusively; cloning produces a fully
/// independent deep copy.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    size: u32,
    /// RGBA values in `(height, width, 4)` layout, bottom-left origin
    pixels: Array3<u8>,
    blocks: HashMap<BlockId, Block>,
    next_merge_id: u32,
}

impl Canvas {
    /// Build a canvas from an initial configuration
    ///
    /// The buffer starts fully opaque white. Preset rectangles are inserted
    /// and then painted through the normal move path, so the initial pixel
    /// state matches later recoloring exactly. After all presets the merge
    /// counter is seeded past every block created, keeping merge ids unique
    /// for the lifetime of the canvas.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a dimension is zero, an id token is
    /// malformed or duplicated, a rectangle is degenerate or exceeds the
    /// canvas, or the presets do not exactly tile the canvas.
    pub fn new(config: &InitialConfig) -> Result<Self> {
        let size = config
            .width
            .checked_mul(config.height)
            .filter(|&pixels| pixels > 0)
            .ok_or_else(|| {
                config_error(format!(
                    "canvas dimensions {}x{} are invalid",
                    config.width, config.height
                ))
            })?;

        let mut canvas = Self {
            width: config.width,
            height: config.height,
            size,
            pixels: Array3::from_elem(
                (config.height as usize, config.width as usize, 4),
                255u8,
            ),
            blocks: HashMap::with_capacity(config.blocks.len()),
            next_merge_id: 0,
        };

        for preset in &config.blocks {
            let id: BlockId = preset
                .block_id
                .parse()
                .map_err(|e| config_error(format!("{e}")))?;

            let [x0, y0] = preset.bottom_left;
            let [x1, y1] = preset.top_right;
            if x1 <= x0 || y1 <= y0 {
                return Err(config_error(format!("block {id} rectangle is degenerate")));
            }
            if x1 > canvas.width || y1 > canvas.height {
                return Err(config_error(format!("block {id} exceeds the canvas bounds")));
            }
            if canvas.blocks.contains_key(&id) {
                return Err(config_error(format!("duplicate block id {id}")));
            }

            canvas.insert_block(Block::new(id.clone(), x0, y0, x1 - x0, y1 - y0));
            canvas.apply(&Move::Color {
                block: id,
                color: Color::from(preset.color),
            })?;
        }

        // Seed past both the block count and the highest preset root, so
        // merge ids can never collide with a live block for the lifetime
        // of this canvas
        let highest_root = canvas
            .blocks
            .keys()
            .map(BlockId::root_value)
            .max()
            .unwrap_or(0);
        canvas.next_merge_id = (canvas.blocks.len() as u32).max(highest_root.saturating_add(1));

        if let Some(defect) = coverage::coverage_defect(&canvas) {
            return Err(config_error(format!(
                "presets do not tile the canvas: {defect}"
            )));
        }

        Ok(canvas)
    }

    /// Canvas width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count, `width * height`
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Read-only view of the RGBA pixel buffer, bottom-left origin
    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    /// Iterate over the live blocks of the current partition
    ///
    /// Iteration order is unspecified; the partition invariant guarantees
    /// the rectangles tile the canvas.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Number of live blocks
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Look up a live block by id
    ///
    /// # Errors
    ///
    /// Returns `BlockNotFound` when the id is absent from the partition.
    pub fn block_by_id(&self, id: &BlockId) -> Result<&Block> {
        self.blocks
            .get(id)
            .ok_or_else(|| CanvasError::BlockNotFound { id: id.clone() })
    }

    /// Find the block containing a canvas point
    ///
    /// # Errors
    ///
    /// Returns `OutOfCanvas` when the point lies outside
    /// `[0, width) × [0, height)`, and `Unreachable` when no live block
    /// covers an in-bounds point — the partition invariant has been broken
    /// and the canvas can no longer be trusted.
    pub fn block_by_point(&self, x: u32, y: u32) -> Result<&Block> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfCanvas { x, y });
        }

        self.blocks
            .values()
            .find(|block| block.contains(x, y))
            .ok_or_else(|| CanvasError::Unreachable {
                detail: format!("no block covers the in-bounds point ({x}, {y})"),
            })
    }

    /// Verify that the live blocks exactly tile the canvas
    ///
    /// Rasterizes the partition pixel by pixel. Intended as a debugging aid
    /// and test oracle; valid move sequences can never make it fail.
    ///
    /// # Errors
    ///
    /// Returns `Unreachable` describing the first gap or overlap found.
    pub fn check_coverage(&self) -> Result<()> {
        match coverage::coverage_defect(self) {
            Some(detail) => Err(CanvasError::Unreachable { detail }),
            None => Ok(()),
        }
    }

    /// Apply one move, mutating the canvas and returning its cost
    ///
    /// Validation happens before any mutation: a failed application leaves
    /// the partition and the pixel buffer exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns `BlockNotFound` for an absent id, `OutOfBoundsCut` for a cut
    /// not strictly interior to its block, `ShapeMismatch` for a swap of
    /// differently-sized blocks, and `NotAdjoint` for a merge of blocks that
    /// do not share a full edge.
    pub fn apply(&mut self, mv: &Move) -> Result<u64> {
        match mv {
            Move::LineCut {
                block,
                orientation,
                line,
            } => self.apply_line_cut(block, *orientation, *line),
            Move::PointCut { block, x, y } => self.apply_point_cut(block, *x, *y),
            Move::Color { block, color } => self.apply_color(block, *color),
            Move::Swap { block1, block2 } => self.apply_swap(block1, block2),
            Move::Merge { block1, block2 } => self.apply_merge(block1, block2),
        }
    }

    fn apply_line_cut(&mut self, id: &BlockId, orientation: Orientation, line: u32) -> Result<u64> {
        let block = self.block_by_id(id)?.clone();

        let (low, high) = match orientation {
            Orientation::Vertical => {
                if line <= block.x || line >= block.right() {
                    return Err(CanvasError::OutOfBoundsCut { id: id.clone() });
                }
                (
                    Block::new(block.id.child(0), block.x, block.y, line - block.x, block.height),
                    Block::new(block.id.child(1), line, block.y, block.right() - line, block.height),
                )
            }
            Orientation::Horizontal => {
                if line <= block.y || line >= block.top() {
                    return Err(CanvasError::OutOfBoundsCut { id: id.clone() });
                }
                (
                    Block::new(block.id.child(0), block.x, block.y, block.width, line - block.y),
                    Block::new(block.id.child(1), block.x, line, block.width, block.top() - line),
                )
            }
        };

        self.blocks.remove(id);
        self.insert_block(low);
        self.insert_block(high);

        Ok(self.move_cost(LINE_CUT_COST, block.size))
    }

    fn apply_point_cut(&mut self, id: &BlockId, x: u32, y: u32) -> Result<u64> {
        let block = self.block_by_id(id)?.clone();

        if x <= block.x || x >= block.right() || y <= block.y || y >= block.top() {
            return Err(CanvasError::OutOfBoundsCut { id: id.clone() });
        }

        // Quadrants in canonical order: bottom-left, bottom-right, top-right, top-left
        let children = [
            Block::new(block.id.child(0), block.x, block.y, x - block.x, y - block.y),
            Block::new(block.id.child(1), x, block.y, block.right() - x, y - block.y),
            Block::new(block.id.child(2), x, y, block.right() - x, block.top() - y),
            Block::new(block.id.child(3), block.x, y, x - block.x, block.top() - y),
        ];

        self.blocks.remove(id);
        for child in children {
            self.insert_block(child);
        }

        Ok(self.move_cost(POINT_CUT_COST, block.size))
    }

    fn apply_color(&mut self, id: &BlockId, color: Color) -> Result<u64> {
        let block = self.block_by_id(id)?.clone();

        let mut region = self.region_mut(&block);
        for (channel, value) in color.channels().into_iter().enumerate() {
            region.index_axis_mut(Axis(2), channel).fill(value);
        }

        Ok(self.move_cost(COLOR_COST, block.size))
    }

    fn apply_swap(&mut self, id1: &BlockId, id2: &BlockId) -> Result<u64> {
        let block1 = self.block_by_id(id1)?.clone();
        let block2 = self.block_by_id(id2)?.clone();

        if block1.width != block2.width || block1.height != block2.height {
            return Err(CanvasError::ShapeMismatch {
                id1: id1.clone(),
                id2: id2.clone(),
            });
        }

        let pixels1 = self.region(&block1).to_owned();
        let pixels2 = self.region(&block2).to_owned();
        self.region_mut(&block1).assign(&pixels2);
        self.region_mut(&block2).assign(&pixels1);

        if let Some(entry) = self.blocks.get_mut(id1) {
            entry.x = block2.x;
            entry.y = block2.y;
        }
        if let Some(entry) = self.blocks.get_mut(id2) {
            entry.x = block1.x;
            entry.y = block1.y;
        }

        Ok(self.move_cost(SWAP_COST, block1.size))
    }

    fn apply_merge(&mut self, id1: &BlockId, id2: &BlockId) -> Result<u64> {
        let block1 = self.block_by_id(id1)?.clone();
        let block2 = self.block_by_id(id2)?.clone();

        let stacked = block1.x == block2.x && block1.width == block2.width;
        let in_a_row = block1.y == block2.y && block1.height == block2.height;

        let merged_id = BlockId::root(self.next_merge_id);
        let merged = if stacked && block1.top() == block2.y {
            Block::new(
                merged_id,
                block1.x,
                block1.y,
                block1.width,
                block1.height + block2.height,
            )
        } else if stacked && block2.top() == block1.y {
            Block::new(
                merged_id,
                block2.x,
                block2.y,
                block1.width,
                block1.height + block2.height,
            )
        } else if in_a_row && block1.right() == block2.x {
            Block::new(
                merged_id,
                block1.x,
                block1.y,
                block1.width + block2.width,
                block1.height,
            )
        } else if in_a_row && block2.right() == block1.x {
            Block::new(
                merged_id,
                block2.x,
                block2.y,
                block1.width + block2.width,
                block1.height,
            )
        } else {
            return Err(CanvasError::NotAdjoint {
                id1: id1.clone(),
                id2: id2.clone(),
            });
        };

        self.blocks.remove(id1);
        self.blocks.remove(id2);
        self.insert_block(merged);
        self.next_merge_id += 1;

        Ok(self.move_cost(MERGE_COST, block1.size.max(block2.size)))
    }

    /// Cost of a move: `factor * canvas_size / base_size`, rounded half to even
    ///
    /// Candidate sequences are compared by these integers, so the rounding
    /// mode is an exactness requirement shared with the external scoring
    /// authority, not an approximation.
    fn move_cost(&self, factor: u32, base_size: u32) -> u64 {
        (f64::from(factor) * f64::from(self.size) / f64::from(base_size)).round_ties_even() as u64
    }

    fn insert_block(&mut self, block: Block) {
        self.blocks.insert(block.id.clone(), block);
    }

    fn region(&self, block: &Block) -> ArrayView3<'_, u8> {
        self.pixels.slice(s![
            block.y as usize..block.top() as usize,
            block.x as usize..block.right() as usize,
            ..
        ])
    }

    fn region_mut(&mut self, block: &Block) -> ArrayViewMut3<'_, u8> {
        self.pixels.slice_mut(s![
            block.y as usize..block.top() as usize,
            block.x as usize..block.right() as usize,
            ..
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::configuration::PresetBlock;

    fn preset(id: &str, bottom_left: [u32; 2], top_right: [u32; 2], color: [u8; 4]) -> PresetBlock {
        PresetBlock {
            block_id: id.to_string(),
            bottom_left,
            top_right,
            color,
        }
    }

    #[test]
    fn test_construction_paints_presets() {
        let config = InitialConfig {
            width: 4,
            height: 2,
            blocks: vec![
                preset("0", [0, 0], [2, 2], [10, 20, 30, 255]),
                preset("1", [2, 0], [4, 2], [40, 50, 60, 255]),
            ],
        };

        let canvas = Canvas::new(&config).unwrap();
        assert_eq!(canvas.block_count(), 2);
        assert_eq!(canvas.pixels().get([0, 0, 0]).copied(), Some(10));
        assert_eq!(canvas.pixels().get([1, 3, 2]).copied(), Some(60));
        assert!(canvas.check_coverage().is_ok());
    }

    #[test]
    fn test_construction_rejects_duplicate_ids() {
        let config = InitialConfig {
            width: 4,
            height: 2,
            blocks: vec![
                preset("0", [0, 0], [2, 2], [0, 0, 0, 255]),
                preset("0", [2, 0], [4, 2], [0, 0, 0, 255]),
            ],
        };

        assert!(matches!(
            Canvas::new(&config),
            Err(CanvasError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_construction_rejects_degenerate_rectangles() {
        let config = InitialConfig {
            width: 4,
            height: 2,
            blocks: vec![preset("0", [2, 0], [2, 2], [0, 0, 0, 255])],
        };

        assert!(matches!(
            Canvas::new(&config),
            Err(CanvasError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_construction_rejects_gaps_and_overlaps() {
        let gap = InitialConfig {
            width: 4,
            height: 2,
            blocks: vec![preset("0", [0, 0], [2, 2], [0, 0, 0, 255])],
        };
        assert!(matches!(
            Canvas::new(&gap),
            Err(CanvasError::ConfigError { .. })
        ));

        let overlap = InitialConfig {
            width: 4,
            height: 2,
            blocks: vec![
                preset("0", [0, 0], [3, 2], [0, 0, 0, 255]),
                preset("1", [2, 0], [4, 2], [0, 0, 0, 255]),
            ],
        };
        assert!(matches!(
            Canvas::new(&overlap),
            Err(CanvasError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_construction_rejects_empty_and_zero_sized() {
        let empty = InitialConfig {
            width: 4,
            height: 2,
            blocks: Vec::new(),
        };
        assert!(matches!(
            Canvas::new(&empty),
            Err(CanvasError::ConfigError { .. })
        ));

        let zero = InitialConfig::full_canvas(0, 5);
        assert!(matches!(
            Canvas::new(&zero),
            Err(CanvasError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_construction_rejects_malformed_id_tokens() {
        let config = InitialConfig {
            width: 4,
            height: 2,
            blocks: vec![preset("first", [0, 0], [4, 2], [0, 0, 0, 255])],
        };

        assert!(matches!(
            Canvas::new(&config),
            Err(CanvasError::ConfigError { .. })
        ));
    }
}
