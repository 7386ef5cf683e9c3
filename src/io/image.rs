//! Target loading and canvas rendering via standard image formats
//!
//! Canvas storage is bottom-left origin; image files are top-left origin.
//! Conversion in either direction flips the vertical axis.

use crate::canvas::Canvas;
use crate::io::error::{CanvasError, Result};
use image::{ImageBuffer, Rgba, RgbaImage};
use ndarray::Array3;
use std::path::Path;

/// Load a target image as a bottom-left-origin RGBA raster
///
/// Decodes any format the `image` crate supports, forces RGBA, and flips
/// the rows into the canvas's `(height, width, 4)` layout.
///
/// # Errors
///
/// Returns `ImageLoad` when the file cannot be read or decoded.
pub fn load_target(path: &Path) -> Result<Array3<u8>> {
    let decoded = image::open(path).map_err(|e| CanvasError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(image_to_raster(&decoded.to_rgba8()))
}

/// Convert a top-left-origin RGBA image into canvas raster layout
pub fn image_to_raster(img: &RgbaImage) -> Array3<u8> {
    let (width, height) = img.dimensions();
    let mut raster = Array3::zeros((height as usize, width as usize, 4));

    for (x, y, pixel) in img.enumerate_pixels() {
        let row = (height - 1 - y) as usize;
        for (channel, &value) in pixel.0.iter().enumerate() {
            if let Some(slot) = raster.get_mut([row, x as usize, channel]) {
                *slot = value;
            }
        }
    }

    raster
}

/// Render the canvas as a top-left-origin RGBA image
pub fn canvas_to_image(canvas: &Canvas) -> RgbaImage {
    let pixels = canvas.pixels();
    let height = canvas.height();

    ImageBuffer::from_fn(canvas.width(), height, |x, y| {
        let row = (height - 1 - y) as usize;
        let mut channels = [0u8; 4];
        for (channel, slot) in channels.iter_mut().enumerate() {
            *slot = pixels.get([row, x as usize, channel]).copied().unwrap_or(0);
        }
        Rgba(channels)
    })
}

/// Save the rendered canvas as a PNG file
///
/// Creates missing parent directories first, then writes the image with the
/// vertical axis flipped to the top-left-origin file convention.
///
/// # Errors
///
/// Returns `FileSystem` when the parent directory cannot be created and
/// `ImageExport` when encoding or writing fails.
pub fn save_canvas_png(canvas: &Canvas, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CanvasError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    canvas_to_image(canvas)
        .save(path)
        .map_err(|e| CanvasError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })
}
