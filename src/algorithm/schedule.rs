//! Per-stage brush sizes and sampling-mask blur
//!
//! Early stages paint large strokes anywhere on the canvas; later stages paint
//! smaller, more uniform strokes concentrated ever closer to edges.

use crate::io::configuration::{
    MASK_BLUR_FLOOR, MASK_BLUR_SPAN, RunConfig, UNMASKED_STAGE_FRACTION,
};

/// Inclusive range of stroke scale factors for one stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRange {
    /// Smallest scale factor
    pub min: f64,
    /// Largest scale factor
    pub max: f64,
}

/// Everything a stage needs to know about its place in the run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagePlan {
    /// Zero-based stage index
    pub stage: usize,
    /// Total number of stages
    pub stages: usize,
    /// Stroke scale range of this stage
    pub sizes: SizeRange,
    /// Blur fraction of the automatic mask, `None` for uniform placement
    pub blur_fraction: Option<f64>,
}

/// Stage progress in `[0, 1]`
pub fn stage_progress(stage: usize, stages: usize) -> f64 {
    stage as f64 / stages.saturating_sub(1).max(1) as f64
}

/// Sweep `range` from its upper bound to its lower bound along `1 - t²`
pub fn interpolate_size(range: [f64; 2], stage: usize, stages: usize) -> f64 {
    let [low, high] = range;
    let t = stage_progress(stage, stages);
    (high - low).mul_add(t.mul_add(-t, 1.0), low)
}

/// Stroke scale range for `stage`
///
/// The stage minimum comes from the first range and the stage maximum from
/// the second.
pub fn stage_size_range(ranges: [[f64; 2]; 2], stage: usize, stages: usize) -> SizeRange {
    SizeRange {
        min: interpolate_size(ranges[0], stage, stages),
        max: interpolate_size(ranges[1], stage, stages),
    }
}

/// Blur fraction of the automatic sampling mask for `stage`
///
/// The leading [`UNMASKED_STAGE_FRACTION`] of stages sample uniformly; later
/// stages decay linearly from `MASK_BLUR_SPAN + MASK_BLUR_FLOOR` down to
/// `MASK_BLUR_FLOOR` at the last stage.
pub fn mask_blur_fraction(stage: usize, stages: usize) -> Option<f64> {
    let start = (stages as f64 * UNMASKED_STAGE_FRACTION) as usize;
    if stage < start {
        return None;
    }
    let span = stages.saturating_sub(start).saturating_sub(1).max(1) as f64;
    let t = 1.0 - (stage - start) as f64 / span;
    Some(t.mul_add(MASK_BLUR_SPAN, MASK_BLUR_FLOOR))
}

/// Full plan for `stage` under `config`
pub fn plan_stage(config: &RunConfig, stage: usize) -> StagePlan {
    StagePlan {
        stage,
        stages: config.stages,
        sizes: stage_size_range(config.brush_size_ranges, stage, config.stages),
        blur_fraction: mask_blur_fraction(stage, config.stages),
    }
}
