//! Stage and generation progress bars for a painting run

use crate::algorithm::observer::{GenerationObserver, GenerationProgress};
use crate::algorithm::schedule::StagePlan;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use ndarray::Array2;
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Stages:      [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

static GENERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} Generations: [{{bar:{PROGRESS_BAR_WIDTH}.green/white}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Two-level progress display: one bar over stages, one over the
/// generations of the current stage
pub struct ProgressManager {
    multi_progress: MultiProgress,
    stage_bar: ProgressBar,
    generation_bar: ProgressBar,
    /// Latest error shown next to the bars
    last_error: Option<u64>,
}

impl ProgressManager {
    /// Create bars for a run of `stages` stages
    pub fn new(stages: usize) -> Self {
        let multi_progress = MultiProgress::new();
        let stage_bar = multi_progress.add(ProgressBar::new(stages as u64));
        stage_bar.set_style(STAGE_STYLE.clone());
        let generation_bar = multi_progress.add(ProgressBar::new(0));
        generation_bar.set_style(GENERATION_STYLE.clone());

        Self {
            multi_progress,
            stage_bar,
            generation_bar,
            last_error: None,
        }
    }

    /// Error reported by the most recent event
    pub const fn last_error(&self) -> Option<u64> {
        self.last_error
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        self.generation_bar.finish_and_clear();
        self.stage_bar.finish_with_message("done");
        let _ = self.multi_progress.clear();
    }
}

impl GenerationObserver for ProgressManager {
    fn on_stage_start(&mut self, plan: &StagePlan) {
        self.generation_bar.reset();
        self.generation_bar.set_prefix(format!("stage {}", plan.stage + 1));
        self.generation_bar
            .set_message(format!("size {:.3}..{:.3}", plan.sizes.min, plan.sizes.max));
    }

    fn on_generation(&mut self, progress: &GenerationProgress<'_>) {
        self.last_error = Some(progress.report.error_after);
        self.generation_bar.set_length(progress.generations as u64);
        self.generation_bar.set_position(progress.generation as u64);
        self.generation_bar.set_message(format!(
            "error {} (+{} kept)",
            progress.report.error_after, progress.report.accepted
        ));
    }

    fn on_stage_end(&mut self, _plan: &StagePlan, _image: &Array2<u8>, error: u64) {
        self.last_error = Some(error);
        self.stage_bar.inc(1);
        self.stage_bar.set_message(format!("error {error}"));
    }

    fn on_run_end(&mut self) {
        self.finish();
    }
}
