//! Move-sequence scoring against a target raster
//!
//! Replays a sequence on a fresh canvas and combines the accumulated move
//! cost with a pixel-distance penalty against the target. Scores from this
//! module are the sole basis on which competing sequences are compared, so
//! every rounding step must match the external scoring authority exactly.

use crate::canvas::Canvas;
use crate::io::configuration::{InitialConfig, SIMILARITY_WEIGHT};
use crate::io::error::{CanvasError, Result};
use crate::moves::Move;
use ndarray::{ArrayView3, Axis};

/// Score a move sequence against a target image
///
/// Builds a fresh canvas from `config`, applies each move in order, then
/// adds the similarity penalty between the finished canvas and `target`.
/// The target uses the same bottom-left-origin `(height, width, 4)` layout
/// as the canvas buffer. Pure: repeated calls with identical inputs always
/// produce identical scores.
///
/// # Errors
///
/// Returns `ConfigError` when the configuration is invalid or the target
/// shape does not match it, and `MoveFailed` carrying the 1-based index and
/// canonical text of the first move that cannot be applied.
pub fn score(target: ArrayView3<'_, u8>, config: &InitialConfig, moves: &[Move]) -> Result<u64> {
    let mut canvas = Canvas::new(config)?;

    let expected = (canvas.height() as usize, canvas.width() as usize, 4);
    if target.dim() != expected {
        return Err(CanvasError::ConfigError {
            reason: format!(
                "target raster has shape {:?}, configuration expects {expected:?}",
                target.dim()
            ),
        });
    }

    let mut total_cost = 0u64;
    for (index, mv) in moves.iter().enumerate() {
        total_cost += canvas.apply(mv).map_err(|source| CanvasError::MoveFailed {
            index: index + 1,
            text: mv.to_text(),
            source: Box::new(source),
        })?;
    }

    Ok(total_cost + similarity_penalty(canvas.pixels(), target))
}

/// Pixel-distance penalty between two equally-shaped rasters
///
/// Per pixel, the Euclidean distance between the RGBA channel vectors, with
/// channels promoted to signed integers before subtraction. Distances are
/// summed over the whole raster, weighted by [`SIMILARITY_WEIGHT`], and
/// rounded half to even. Both views must have the same shape.
pub fn similarity_penalty(pixels: ArrayView3<'_, u8>, target: ArrayView3<'_, u8>) -> u64 {
    let mut distance_sum = 0.0f64;

    for (own, other) in pixels
        .lanes(Axis(2))
        .into_iter()
        .zip(target.lanes(Axis(2)))
    {
        let squared: i64 = own
            .iter()
            .zip(other.iter())
            .map(|(&a, &b)| {
                let diff = i64::from(a) - i64::from(b);
                diff * diff
            })
            .sum();
        distance_sum += (squared as f64).sqrt();
    }

    (distance_sum * SIMILARITY_WEIGHT).round_ties_even() as u64
}
