//! Edge strength and direction of the target image
//!
//! Strokes are steered along edges: where the gradient is strong the stroke
//! rotation follows the edge tangent, where it is weak the rotation is mostly
//! random. The field is computed once per target and never changes.

use crate::io::configuration::GRADIENT_GAMMA;
use crate::math::filter::central_difference;
use ndarray::{Array2, Zip};

/// Per-pixel gradient magnitude (normalized, gamma-compressed) and angle
#[derive(Debug, Clone)]
pub struct GradientField {
    magnitude: Array2<f64>,
    angle: Array2<f64>,
}

impl GradientField {
    /// Compute the field of an 8-bit grayscale target
    ///
    /// Intensities are scaled to `[0, 1]` first. The magnitude is divided by
    /// its global maximum and raised to [`GRADIENT_GAMMA`]; a flat target
    /// yields an all-zero magnitude.
    pub fn from_image(target: &Array2<u8>) -> Self {
        let unit = target.mapv(|v| f64::from(v) / 255.0);
        let (magnitude, angle) = polar_gradient(&unit);

        let max = magnitude.iter().copied().fold(0.0_f64, f64::max);
        let magnitude = if max > 0.0 {
            magnitude.mapv(|m| (m / max).powf(GRADIENT_GAMMA))
        } else {
            magnitude
        };

        Self { magnitude, angle }
    }

    /// Normalized magnitude map in `[0, 1]`
    pub const fn magnitude(&self) -> &Array2<f64> {
        &self.magnitude
    }

    /// Angle map in degrees, `[0, 360)`
    pub const fn angle(&self) -> &Array2<f64> {
        &self.angle
    }

    /// Field dimensions (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.magnitude.dim()
    }

    /// Magnitude and angle at `[row, col]`, zero outside the field
    pub fn at(&self, position: [usize; 2]) -> (f64, f64) {
        (
            self.magnitude.get(position).copied().unwrap_or(0.0),
            self.angle.get(position).copied().unwrap_or(0.0),
        )
    }
}

/// Unnormalized gradient magnitude of an 8-bit image in intensity units
pub fn raw_magnitude(target: &Array2<u8>) -> Array2<f64> {
    let intensity = target.mapv(f64::from);
    polar_gradient(&intensity).0
}

fn polar_gradient(image: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
    let (dx, dy) = central_difference(image);

    let magnitude = Zip::from(&dx).and(&dy).map_collect(|&gx, &gy| gx.hypot(gy));
    let angle = Zip::from(&dx).and(&dy).map_collect(|&gx, &gy| {
        let degrees = gy.atan2(gx).to_degrees();
        if degrees < 0.0 { degrees + 360.0 } else { degrees }
    });

    (magnitude, angle)
}
