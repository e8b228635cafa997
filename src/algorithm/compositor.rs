//! Alpha compositing of brush stamps onto a padded canvas
//!
//! A stamp is prepared once per (brush, size, rotation) and can then be
//! composited at any position and color. Compositing checks the placement
//! rectangle before touching any pixel, so a failed stroke leaves the canvas
//! exactly as it was.

use crate::algorithm::brush::BrushSet;
use crate::algorithm::stroke::Stroke;
use crate::io::error::{Result, invalid_input};
use crate::math::interpolation::{resize_cubic, rotate_about_center, to_alpha};
use crate::spatial::canvas::{Canvas, Rect};
use image::GrayImage;
use ndarray::{Array2, Zip};

/// Scaled and rotated brush opacity, values in `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    alpha: Array2<f32>,
}

impl Stamp {
    /// Scale `brush` by `size`, rotate it by `rotation` degrees about its
    /// center and turn its brightness into opacity
    pub fn prepare(brush: &GrayImage, size: f64, rotation: f64) -> Self {
        let scaled = resize_cubic(brush, size);
        let alpha = to_alpha(&rotate_about_center(&scaled, rotation));
        Self { alpha }
    }

    /// Stamp for `stroke` drawn from `brushes`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the stroke's brush index is not in the set
    pub fn for_stroke(stroke: &Stroke, brushes: &BrushSet) -> Result<Self> {
        let brush = brushes.get(stroke.brush).ok_or_else(|| {
            invalid_input(
                "brush",
                &stroke.brush,
                &format!("brush set holds {} stamps", brushes.len()),
            )
        })?;
        Ok(Self::prepare(brush, stroke.size, stroke.rotation))
    }

    /// Stamp extent (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.alpha.dim()
    }

    /// Opacity values
    pub const fn alpha(&self) -> &Array2<f32> {
        &self.alpha
    }
}

/// Canvas rectangle covered by `stamp` when painted for `stroke`
pub fn placement(canvas: &Canvas, stroke: &Stroke, stamp: &Stamp) -> Rect {
    let padding = canvas.padding() as i64;
    let (rows, cols) = stamp.dimensions();
    Rect::centered(
        stroke.position[0] as i64 + padding,
        stroke.position[1] as i64 + padding,
        rows,
        cols,
    )
}

/// Blend `stamp` in `stroke.color` over `canvas` in place
///
/// `out = alpha * color + (1 - alpha) * background`, clamped to `[0, 255]`
/// and truncated to 8 bits.
///
/// # Errors
///
/// Returns `GeometryOutOfBounds` if the placement rectangle leaves the padded
/// canvas; the canvas is not modified in that case.
pub fn composite(canvas: &mut Canvas, stroke: &Stroke, stamp: &Stamp) -> Result<()> {
    let rect = placement(canvas, stroke, stamp);
    let mut region = canvas.region_mut(rect)?;
    let color = f32::from(stroke.color);

    Zip::from(&mut region)
        .and(&stamp.alpha)
        .for_each(|pixel, &alpha| {
            let alpha = num_traits::clamp(alpha, 0.0, 1.0);
            let blended = alpha.mul_add(color, (1.0 - alpha) * f32::from(*pixel));
            *pixel = num_traits::clamp(blended, 0.0, 255.0) as u8;
        });
    Ok(())
}

/// Render one stroke onto a copy of `canvas`
///
/// # Errors
///
/// Returns `GeometryOutOfBounds` if the stamp does not fit the padded canvas
pub fn render(canvas: &Canvas, stroke: &Stroke, brush: &GrayImage) -> Result<Canvas> {
    let stamp = Stamp::prepare(brush, stroke.size, stroke.rotation);
    let mut out = canvas.clone();
    composite(&mut out, stroke, &stamp)?;
    Ok(out)
}
