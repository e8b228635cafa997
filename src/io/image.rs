//! Grayscale image loading, brush directory loading and PNG export

use crate::algorithm::brush::BrushSet;
use crate::io::error::{PaintError, Result, invalid_input};
use image::{GrayImage, Luma};
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// File extensions tried, in order, for each numbered brush stamp
pub const BRUSH_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Convert a grayscale image into a `(rows, cols)` array
pub fn gray_to_array(image: &GrayImage) -> Array2<u8> {
    let (width, height) = image.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(r, c)| {
        image.get_pixel(c as u32, r as u32).0[0]
    })
}

/// Convert a `(rows, cols)` array into a grayscale image
pub fn array_to_gray(array: &Array2<u8>) -> GrayImage {
    let (rows, cols) = array.dim();
    GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        Luma([array.get([y as usize, x as usize]).copied().unwrap_or(0)])
    })
}

/// Load any supported image file as 8-bit grayscale
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_grayscale_image(path: &Path) -> Result<GrayImage> {
    let img = image::open(path).map_err(|e| PaintError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_luma8())
}

/// Load a target or mask image as a grayscale array
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_grayscale(path: &Path) -> Result<Array2<u8>> {
    load_grayscale_image(path).map(|img| gray_to_array(&img))
}

/// Path of brush `index` inside `directory`, if any supported file exists
pub fn brush_path(directory: &Path, index: usize) -> Option<PathBuf> {
    BRUSH_EXTENSIONS
        .iter()
        .map(|ext| directory.join(format!("{index}.{ext}")))
        .find(|path| path.is_file())
}

/// Load brushes `0..count` from numbered files in `directory`
///
/// # Errors
///
/// Returns an error if:
/// - `directory` is not a directory
/// - A numbered brush file is missing
/// - A brush file cannot be decoded
/// - `count` is zero
pub fn load_brushes(directory: &Path, count: usize) -> Result<BrushSet> {
    if !directory.is_dir() {
        return Err(invalid_input(
            "brushes",
            &directory.display(),
            &"brush location must be a directory",
        ));
    }

    let mut stamps = Vec::with_capacity(count);
    for index in 0..count {
        let path = brush_path(directory, index).ok_or_else(|| {
            invalid_input(
                "brushes",
                &directory.join(format!("{index}.png")).display(),
                &format!("missing brush {index} (tried {})", BRUSH_EXTENSIONS.join(", ")),
            )
        })?;
        tracing::debug!(path = %path.display(), "loading brush");
        stamps.push(load_grayscale_image(&path)?);
    }
    BrushSet::new(stamps)
}

/// Save a grayscale array as a PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_png(image: &Array2<u8>, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| PaintError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    array_to_gray(image)
        .save(output_path)
        .map_err(|e| PaintError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
