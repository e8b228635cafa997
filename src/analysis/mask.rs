//! Edge-weighted sampling densities for stroke placement

use crate::analysis::gradient::raw_magnitude;
use crate::io::configuration::MASK_CEILING;
use crate::io::error::{Result, invalid_input};
use crate::math::filter::gaussian_blur;
use crate::math::probability::WeightedPositionSampler;
use ndarray::Array2;

/// Non-negative density biasing where strokes are placed
#[derive(Debug, Clone)]
pub struct SamplingMask {
    density: Array2<f64>,
}

impl SamplingMask {
    /// Build the automatic mask for a blur fraction `t`
    ///
    /// The raw gradient magnitude is blurred with `sigma = t * rows` (skipped
    /// when `sigma <= 1`) and rescaled so its peak equals [`MASK_CEILING`].
    /// Returns `None` when `t` is not positive or the target is flat, in which
    /// case placement falls back to uniform sampling.
    pub fn from_gradient(target: &Array2<u8>, blur_fraction: f64) -> Option<Self> {
        if !blur_fraction.is_finite() || blur_fraction <= 0.0 {
            return None;
        }

        let mut magnitude = raw_magnitude(target);
        let sigma = target.nrows() as f64 * blur_fraction;
        if sigma > 1.0 {
            magnitude = gaussian_blur(&magnitude, sigma);
        }

        let max = magnitude.iter().copied().fold(0.0_f64, f64::max);
        if !(max.is_finite() && max > 0.0) {
            return None;
        }
        let scale = MASK_CEILING / max;
        Some(Self {
            density: magnitude.mapv(|m| m * scale),
        })
    }

    /// Wrap a user-supplied grayscale mask that replaces the automatic one
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the mask dimensions differ from `dimensions`
    pub fn from_image(mask: &Array2<u8>, dimensions: (usize, usize)) -> Result<Self> {
        if mask.dim() != dimensions {
            return Err(invalid_input(
                "sampling_mask",
                &format!("{}x{}", mask.nrows(), mask.ncols()),
                &format!(
                    "mask must match the target size {}x{}",
                    dimensions.0, dimensions.1
                ),
            ));
        }
        Ok(Self {
            density: mask.mapv(f64::from),
        })
    }

    /// Density values
    pub const fn density(&self) -> &Array2<f64> {
        &self.density
    }

    /// Position sampler weighted by this mask
    ///
    /// # Errors
    ///
    /// Returns `SamplingDensityInvalid` if the mask has no positive weight
    pub fn sampler(&self) -> Result<WeightedPositionSampler> {
        WeightedPositionSampler::weighted(&self.density)
    }
}
