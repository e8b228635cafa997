//! Read-only hooks for progress display and frame capture

use crate::algorithm::genome::GenerationReport;
use crate::algorithm::schedule::StagePlan;
use ndarray::{Array2, ArrayView2};

/// Snapshot handed to observers after every generation
pub struct GenerationProgress<'a> {
    /// Zero-based stage index
    pub stage: usize,
    /// Total number of stages
    pub stages: usize,
    /// One-based generation number within the stage
    pub generation: usize,
    /// Generations per stage
    pub generations: usize,
    /// Cached rendering after the generation
    pub image: ArrayView2<'a, u8>,
    /// Error and acceptance counts of the generation
    pub report: GenerationReport,
}

/// Receives run events; only shared references are passed, so observers
/// cannot change the outcome of a run
pub trait GenerationObserver {
    /// A stage is about to initialize its genome
    fn on_stage_start(&mut self, _plan: &StagePlan) {}

    /// A generation finished
    fn on_generation(&mut self, _progress: &GenerationProgress<'_>) {}

    /// A stage finished with its final rendering and error
    fn on_stage_end(&mut self, _plan: &StagePlan, _image: &Array2<u8>, _error: u64) {}

    /// The whole run finished
    fn on_run_end(&mut self) {}
}

impl GenerationObserver for () {}

impl<T: GenerationObserver> GenerationObserver for Option<T> {
    fn on_stage_start(&mut self, plan: &StagePlan) {
        if let Some(inner) = self {
            inner.on_stage_start(plan);
        }
    }

    fn on_generation(&mut self, progress: &GenerationProgress<'_>) {
        if let Some(inner) = self {
            inner.on_generation(progress);
        }
    }

    fn on_stage_end(&mut self, plan: &StagePlan, image: &Array2<u8>, error: u64) {
        if let Some(inner) = self {
            inner.on_stage_end(plan, image, error);
        }
    }

    fn on_run_end(&mut self) {
        if let Some(inner) = self {
            inner.on_run_end();
        }
    }
}

impl<A: GenerationObserver, B: GenerationObserver> GenerationObserver for (A, B) {
    fn on_stage_start(&mut self, plan: &StagePlan) {
        self.0.on_stage_start(plan);
        self.1.on_stage_start(plan);
    }

    fn on_generation(&mut self, progress: &GenerationProgress<'_>) {
        self.0.on_generation(progress);
        self.1.on_generation(progress);
    }

    fn on_stage_end(&mut self, plan: &StagePlan, image: &Array2<u8>, error: u64) {
        self.0.on_stage_end(plan, image, error);
        self.1.on_stage_end(plan, image, error);
    }

    fn on_run_end(&mut self) {
        self.0.on_run_end();
        self.1.on_run_end();
    }
}
