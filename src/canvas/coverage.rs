//! Partition coverage verification by pixel rasterization

use super::Canvas;
use bitvec::bitvec;
use bitvec::vec::BitVec;

/// Describe the first defect in the partition's pixel coverage, if any
///
/// Rasterizes every live block into a per-pixel bit set. Returns a
/// description of the first overlap or gap found, or `None` when the blocks
/// tile the canvas exactly once per pixel.
pub(crate) fn coverage_defect(canvas: &Canvas) -> Option<String> {
    let width = canvas.width() as usize;
    let mut covered: BitVec = bitvec![0; width * canvas.height() as usize];

    for block in canvas.blocks() {
        for y in block.y..block.top() {
            for x in block.x..block.right() {
                let index = y as usize * width + x as usize;
                if covered.replace(index, true) {
                    return Some(format!("pixel ({x}, {y}) is covered by more than one block"));
                }
            }
        }
    }

    covered.iter_zeros().next().map(|index| {
        format!(
            "pixel ({}, {}) is not covered by any block",
            index % width,
            index / width
        )
    })
}
