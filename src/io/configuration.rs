//! Algorithm constants and runtime configuration defaults

use crate::io::error::{Result, invalid_input};

// Gradient and sampling-mask shaping
/// Exponent applied to the normalized gradient magnitude
pub const GRADIENT_GAMMA: f64 = 0.3;
/// Fraction of leading stages that sample positions uniformly
pub const UNMASKED_STAGE_FRACTION: f64 = 0.2;
/// Blur fraction span covered between the first masked stage and the last stage
pub const MASK_BLUR_SPAN: f64 = 0.25;
/// Blur fraction reached at the last stage
pub const MASK_BLUR_FLOOR: f64 = 0.005;
/// Value the largest sampling-mask weight is rescaled to
pub const MASK_CEILING: f64 = 255.0;
/// Sigma multiplier used to size Gaussian kernels
pub const GAUSSIAN_RADIUS_SIGMAS: f64 = 4.0;

// Canvas geometry
/// Extra pixels of padding beyond half the largest stamp
pub const PADDING_MARGIN: usize = 5;

/// Number of brush assets expected by default
pub const DEFAULT_BRUSH_COUNT: usize = 4;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default number of stages
pub const DEFAULT_STAGES: usize = 10;
/// Default number of generations per stage
pub const DEFAULT_GENERATIONS: usize = 20;
/// Default number of strokes added per stage
pub const DEFAULT_STROKES: usize = 10;
/// Default stroke scale range at the last stage (min, max) as a fraction of the stamp side
pub const DEFAULT_MIN_SIZE_RANGE: [f64; 2] = [0.1, 0.3];
/// Default stroke scale range at the first stage (min, max) as a fraction of the stamp side
pub const DEFAULT_MAX_SIZE_RANGE: [f64; 2] = [0.3, 0.7];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_painted";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 80;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;

/// Parameters of a complete painting run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunConfig {
    /// Number of stages, each with its own brush sizes and sampling bias
    pub stages: usize,
    /// Mutation passes over every stroke per stage
    pub generations_per_stage: usize,
    /// Strokes painted by each stage
    pub strokes_per_stage: usize,
    /// Two `[min, max]` scale ranges
    ///
    /// The first range is swept by the stage minimum size and the second by the
    /// stage maximum size, each moving from its `max` towards its `min` as
    /// stages progress.
    pub brush_size_ranges: [[f64; 2]; 2],
    /// Seed from which every random draw of the run is derived
    pub seed: u64,
    /// Whether observers should display progress (no algorithmic effect)
    pub show_progress: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            stages: DEFAULT_STAGES,
            generations_per_stage: DEFAULT_GENERATIONS,
            strokes_per_stage: DEFAULT_STROKES,
            brush_size_ranges: [DEFAULT_MIN_SIZE_RANGE, DEFAULT_MAX_SIZE_RANGE],
            seed: DEFAULT_SEED,
            show_progress: true,
        }
    }
}

impl RunConfig {
    /// Check counts and brush ranges before any stage executes
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if:
    /// - Any of the stage, generation or stroke counts is zero
    /// - A brush range bound is not a positive finite number
    /// - A brush range has `min > max`
    /// - The first range exceeds the second at either end, which would let a
    ///   stage minimum size overtake its maximum size
    pub fn validate(&self) -> Result<()> {
        if self.stages == 0 {
            return Err(invalid_input("stages", &self.stages, &"must be at least 1"));
        }
        if self.generations_per_stage == 0 {
            return Err(invalid_input(
                "generations_per_stage",
                &self.generations_per_stage,
                &"must be at least 1",
            ));
        }
        if self.strokes_per_stage == 0 {
            return Err(invalid_input(
                "strokes_per_stage",
                &self.strokes_per_stage,
                &"must be at least 1",
            ));
        }

        let [small, large] = self.brush_size_ranges;
        for range in [small, large] {
            let [min, max] = range;
            if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0) {
                return Err(invalid_input(
                    "brush_size_ranges",
                    &format!("{range:?}"),
                    &"bounds must be positive finite numbers",
                ));
            }
            if min > max {
                return Err(invalid_input(
                    "brush_size_ranges",
                    &format!("{range:?}"),
                    &"min must not exceed max",
                ));
            }
        }
        if small[0] > large[0] || small[1] > large[1] {
            return Err(invalid_input(
                "brush_size_ranges",
                &format!("{:?}", self.brush_size_ranges),
                &"minimum-size range must not exceed maximum-size range",
            ));
        }

        Ok(())
    }
}
