//! Seeded random selection and density-weighted position sampling

use crate::io::error::{Result, sampling_density_invalid};
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Mix a base seed with a salt into an independent child seed
///
/// `SplitMix64` finalizer: nearby `(base, salt)` pairs produce unrelated
/// streams, so per-stage, per-generation and per-trial generators never
/// overlap in practice.
pub const fn derive_seed(base: u64, salt: u64) -> u64 {
    let mut z = base ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seeded random selector for reproducible stochastic choices
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a selector for a sub-task identified by `salt`
    pub fn derived(base_seed: u64, salt: u64) -> Self {
        Self::new(derive_seed(base_seed, salt))
    }

    /// Uniform value in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform value in `[low, high)`, or `low` when the range is empty
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.unit().mul_add(high - low, low)
    }

    /// Uniform index in `[0, upper)`; `upper` must be non-zero
    pub fn index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper.max(1))
    }

    /// Uniform 8-bit intensity
    pub fn intensity(&mut self) -> u8 {
        self.rng.random::<u8>()
    }

    /// Draw `count` distinct indices from `0..len` (partial Fisher-Yates)
    ///
    /// `count` is clamped to `len`. Order of the result follows draw order.
    pub fn distinct_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let count = count.min(len);
        for i in 0..count {
            let j = self.rng.random_range(i..len);
            pool.swap(i, j);
        }
        pool.truncate(count);
        pool
    }
}

/// Draws pixel coordinates from a 2D density, or uniformly when none is given
#[derive(Debug, Clone)]
pub struct WeightedPositionSampler {
    dimensions: (usize, usize),
    /// Row-major running sums of the clipped density
    cumulative: Option<Vec<f64>>,
    /// Last flat index carrying positive weight
    last_positive: usize,
}

impl WeightedPositionSampler {
    /// Uniform sampler over a `rows x cols` grid
    pub const fn uniform(rows: usize, cols: usize) -> Self {
        Self {
            dimensions: (rows, cols),
            cumulative: None,
            last_positive: 0,
        }
    }

    /// Sampler weighted by `density`
    ///
    /// Negative and non-finite weights are clipped to zero before
    /// normalization.
    ///
    /// # Errors
    ///
    /// Returns `SamplingDensityInvalid` if the clipped density is empty, sums
    /// to zero, or its sum overflows to infinity.
    pub fn weighted(density: &Array2<f64>) -> Result<Self> {
        let (rows, cols) = density.dim();
        if rows == 0 || cols == 0 {
            return Err(sampling_density_invalid(&"density has no pixels"));
        }

        let mut cumulative = Vec::with_capacity(rows * cols);
        let mut total = 0.0_f64;
        let mut last_positive = None;
        for (flat, &weight) in density.iter().enumerate() {
            let weight = if weight.is_finite() && weight > 0.0 {
                last_positive = Some(flat);
                weight
            } else {
                0.0
            };
            total += weight;
            cumulative.push(total);
        }

        let Some(last_positive) = last_positive else {
            return Err(sampling_density_invalid(
                &"density has no positive finite weight",
            ));
        };
        if !total.is_finite() {
            return Err(sampling_density_invalid(&"density sum is not finite"));
        }

        Ok(Self {
            dimensions: (rows, cols),
            cumulative: Some(cumulative),
            last_positive,
        })
    }

    /// Sampler for an optional density
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::weighted`]
    pub fn from_density(rows: usize, cols: usize, density: Option<&Array2<f64>>) -> Result<Self> {
        density.map_or_else(|| Ok(Self::uniform(rows, cols)), Self::weighted)
    }

    /// Grid dimensions (rows, cols)
    pub const fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    /// Whether draws are density weighted
    pub const fn is_weighted(&self) -> bool {
        self.cumulative.is_some()
    }

    /// Draw one `[row, col]` position
    pub fn sample(&self, selector: &mut RandomSelector) -> [usize; 2] {
        let (rows, cols) = self.dimensions;
        match &self.cumulative {
            None => [selector.index(rows), selector.index(cols)],
            Some(cumulative) => {
                let total = cumulative.last().copied().unwrap_or(0.0);
                let target = selector.unit() * total;
                let flat = cumulative.partition_point(|&c| c <= target);
                let flat = if flat < cumulative.len() {
                    flat
                } else {
                    self.last_positive
                };
                [flat / cols.max(1), flat % cols.max(1)]
            }
        }
    }
}
