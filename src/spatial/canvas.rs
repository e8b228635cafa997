//! Padded grayscale canvas and stamp placement geometry
//!
//! Strokes are positioned in target-image coordinates but composited into a
//! canvas with a black border wide enough that any rotated, scaled stamp
//! centered inside the image stays within the buffer.

use crate::io::configuration::PADDING_MARGIN;
use crate::io::error::{PaintError, Result};
use ndarray::{Array2, ArrayView2, ArrayViewMut2, Zip, s};

/// Border width that keeps stamps of up to `max_scale` inside the canvas
pub fn padding_for(stamp_side: u32, max_scale: f64) -> usize {
    let half = (f64::from(stamp_side) * max_scale.max(0.0) / 2.0).floor();
    half as usize + PADDING_MARGIN
}

/// Half-open rectangle `[top, bottom) x [left, right)` in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// First row
    pub top: i64,
    /// First column
    pub left: i64,
    /// One past the last row
    pub bottom: i64,
    /// One past the last column
    pub right: i64,
}

impl Rect {
    /// Rectangle of `rows x cols` centered on `(center_row, center_col)`
    ///
    /// Odd extents put the extra pixel after the center, matching a
    /// `floor(n / 2)` split above and `n - floor(n / 2)` below.
    pub const fn centered(center_row: i64, center_col: i64, rows: usize, cols: usize) -> Self {
        let (rows, cols) = (rows as i64, cols as i64);
        let top = center_row - rows / 2;
        let left = center_col - cols / 2;
        Self {
            top,
            left,
            bottom: top + rows,
            right: left + cols,
        }
    }

    /// Whether the rectangle lies entirely within a `rows x cols` buffer
    pub const fn fits_within(&self, rows: usize, cols: usize) -> bool {
        self.top >= 0
            && self.left >= 0
            && self.bottom <= rows as i64
            && self.right <= cols as i64
    }

    /// Corners as `[top, left, bottom, right]`
    pub const fn as_array(&self) -> [i64; 4] {
        [self.top, self.left, self.bottom, self.right]
    }
}

/// Grayscale canvas with a constant black border of `padding` pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Array2<u8>,
    padding: usize,
}

impl Canvas {
    /// Black canvas for an image of `rows x cols`
    pub fn blank(rows: usize, cols: usize, padding: usize) -> Self {
        Self {
            pixels: Array2::zeros((rows + 2 * padding, cols + 2 * padding)),
            padding,
        }
    }

    /// Embed an image into a padded canvas
    pub fn from_image(image: &Array2<u8>, padding: usize) -> Self {
        let (rows, cols) = image.dim();
        let mut canvas = Self::blank(rows, cols, padding);
        canvas.image_view_mut().assign(image);
        canvas
    }

    /// Border width in pixels
    pub const fn padding(&self) -> usize {
        self.padding
    }

    /// Full buffer dimensions including the border (rows, cols)
    pub fn padded_dimensions(&self) -> (usize, usize) {
        self.pixels.dim()
    }

    /// Dimensions of the image area (rows, cols)
    pub fn image_dimensions(&self) -> (usize, usize) {
        let (rows, cols) = self.pixels.dim();
        (rows - 2 * self.padding, cols - 2 * self.padding)
    }

    /// Whole padded buffer
    pub const fn pixels(&self) -> &Array2<u8> {
        &self.pixels
    }

    /// Image area without the border
    pub fn image_view(&self) -> ArrayView2<'_, u8> {
        let (rows, cols) = self.image_dimensions();
        let p = self.padding;
        self.pixels.slice(s![p..p + rows, p..p + cols])
    }

    fn image_view_mut(&mut self) -> ArrayViewMut2<'_, u8> {
        let (rows, cols) = self.image_dimensions();
        let p = self.padding;
        self.pixels.slice_mut(s![p..p + rows, p..p + cols])
    }

    /// Copy of the image area
    pub fn to_image(&self) -> Array2<u8> {
        self.image_view().to_owned()
    }

    /// Mutable view of `rect`, or `GeometryOutOfBounds` if it leaves the buffer
    ///
    /// # Errors
    ///
    /// Returns `GeometryOutOfBounds` if any part of `rect` is outside the
    /// padded buffer; nothing is borrowed or written in that case.
    pub fn region_mut(&mut self, rect: Rect) -> Result<ArrayViewMut2<'_, u8>> {
        let (rows, cols) = self.pixels.dim();
        if !rect.fits_within(rows, cols) {
            return Err(PaintError::GeometryOutOfBounds {
                rect: rect.as_array(),
                canvas: (rows, cols),
                stroke_index: None,
                stage: None,
            });
        }
        Ok(self.pixels.slice_mut(s![
            rect.top as usize..rect.bottom as usize,
            rect.left as usize..rect.right as usize
        ]))
    }
}

/// Sum of absolute per-pixel differences between two equally sized images
pub fn absolute_error(rendered: ArrayView2<'_, u8>, target: &Array2<u8>) -> u64 {
    Zip::from(&rendered)
        .and(target)
        .fold(0_u64, |acc, &a, &b| acc + u64::from(a.abs_diff(b)))
}
