//! Multi-stage painting run: brush schedule, sampling masks and genome driving

use crate::algorithm::brush::BrushSet;
use crate::algorithm::genome::Genome;
use crate::algorithm::observer::{GenerationObserver, GenerationProgress};
use crate::algorithm::schedule::{StagePlan, plan_stage};
use crate::analysis::gradient::GradientField;
use crate::analysis::mask::SamplingMask;
use crate::io::configuration::RunConfig;
use crate::io::error::{Result, WithContext, invalid_input};
use crate::math::probability::{WeightedPositionSampler, derive_seed};
use ndarray::Array2;

/// Salt of the genome initialization seed within a stage
const INIT_SALT: u64 = 0;

/// Error bookkeeping of one finished stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageReport {
    /// Plan the stage ran with
    pub plan: StagePlan,
    /// Error right after the random initialization
    pub initial_error: u64,
    /// Error after the last generation
    pub final_error: u64,
    /// Mutations accepted over all generations
    pub accepted: usize,
}

/// Drives the stages of a painting run over one target image
///
/// Each stage paints a new genome on top of the previous stage's output. The
/// history starts with the black starting canvas and gains one image per
/// stage.
pub struct StageScheduler {
    target: Array2<u8>,
    gradient: GradientField,
    brushes: BrushSet,
    config: RunConfig,
    mask_override: Option<SamplingMask>,
    history: Vec<Array2<u8>>,
    reports: Vec<StageReport>,
}

impl StageScheduler {
    /// Prepare a run; the gradient field is computed here once
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the target has no pixels or the
    /// configuration fails [`RunConfig::validate`]
    pub fn new(target: Array2<u8>, brushes: BrushSet, config: RunConfig) -> Result<Self> {
        if target.is_empty() {
            return Err(invalid_input(
                "target",
                &format!("{}x{}", target.nrows(), target.ncols()),
                &"target image has no pixels",
            ));
        }
        config.validate()?;

        let gradient = GradientField::from_image(&target);
        Ok(Self {
            target,
            gradient,
            brushes,
            config,
            mask_override: None,
            history: Vec::new(),
            reports: Vec::new(),
        })
    }

    /// Replace the brush size ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the new ranges fail validation; the previous
    /// ranges are kept in that case
    pub fn set_brush_ranges(&mut self, ranges: [[f64; 2]; 2]) -> Result<()> {
        let config = RunConfig {
            brush_size_ranges: ranges,
            ..self.config
        };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Use `mask` as the sampling density of every stage
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the mask size differs from the target, and
    /// `SamplingDensityInvalid` if it has no positive weight
    pub fn set_sampling_mask(&mut self, mask: &Array2<u8>) -> Result<()> {
        let mask = SamplingMask::from_image(mask, self.target.dim())?;
        mask.sampler()?;
        self.mask_override = Some(mask);
        Ok(())
    }

    /// Run every stage and return the final rendering
    ///
    /// Previous history and reports are discarded first. Given the same
    /// target, brushes and configuration the output is bit-identical.
    ///
    /// # Errors
    ///
    /// Returns `SamplingDensityInvalid` before any stage runs if the override
    /// mask admits no draw, and `GeometryOutOfBounds` if a stage cannot place
    /// its initial strokes
    pub fn generate(&mut self, observer: &mut impl GenerationObserver) -> Result<Array2<u8>> {
        let override_sampler = self
            .mask_override
            .as_ref()
            .map(SamplingMask::sampler)
            .transpose()?;

        let (rows, cols) = self.target.dim();
        self.history = vec![Array2::zeros((rows, cols))];
        self.reports = Vec::with_capacity(self.config.stages);

        for stage in 0..self.config.stages {
            let plan = plan_stage(&self.config, stage);
            let positions = match &override_sampler {
                Some(sampler) => sampler.clone(),
                None => self.stage_sampler(&plan),
            };

            tracing::info!(
                stage = stage + 1,
                stages = plan.stages,
                min_size = plan.sizes.min,
                max_size = plan.sizes.max,
                blur = ?plan.blur_fraction,
                weighted = positions.is_weighted(),
                "starting stage"
            );
            observer.on_stage_start(&plan);

            let base = self.history.last().cloned().unwrap_or_else(|| Array2::zeros((rows, cols)));
            let (image, report) = self.run_stage(&plan, &base, positions, observer).with_stage(stage)?;

            tracing::info!(
                stage = stage + 1,
                initial_error = report.initial_error,
                final_error = report.final_error,
                accepted = report.accepted,
                "finished stage"
            );
            observer.on_stage_end(&plan, &image, report.final_error);

            self.history.push(image);
            self.reports.push(report);
        }
        observer.on_run_end();

        Ok(self.history.last().cloned().unwrap_or_else(|| Array2::zeros((rows, cols))))
    }

    /// Automatic sampler of a stage, uniform when no usable mask exists
    fn stage_sampler(&self, plan: &StagePlan) -> WeightedPositionSampler {
        let (rows, cols) = self.target.dim();
        let mask = plan
            .blur_fraction
            .and_then(|t| SamplingMask::from_gradient(&self.target, t));

        match mask.map(|m| m.sampler()) {
            Some(Ok(sampler)) => sampler,
            Some(Err(error)) => {
                tracing::warn!(%error, "automatic sampling mask unusable, sampling uniformly");
                WeightedPositionSampler::uniform(rows, cols)
            }
            None => {
                if plan.blur_fraction.is_some() {
                    tracing::warn!(
                        stage = plan.stage + 1,
                        "target has no gradient, sampling uniformly"
                    );
                }
                WeightedPositionSampler::uniform(rows, cols)
            }
        }
    }

    /// Initialize and evolve one genome over `base`
    ///
    /// # Errors
    ///
    /// Propagates genome construction and initialization errors
    pub fn run_stage(
        &self,
        plan: &StagePlan,
        base: &Array2<u8>,
        positions: WeightedPositionSampler,
        observer: &mut impl GenerationObserver,
    ) -> Result<(Array2<u8>, StageReport)> {
        let stage_seed = derive_seed(self.config.seed, plan.stage as u64);
        let mut genome = Genome::new(base, &self.gradient, &self.brushes, positions, plan.sizes)?;
        genome.init(
            &self.target,
            self.config.strokes_per_stage,
            derive_seed(stage_seed, INIT_SALT),
        )?;

        let initial_error = genome.cached_error();
        let mut accepted = 0;
        let generations = self.config.generations_per_stage;
        for generation in 1..=generations {
            let report =
                genome.evolve_generation(&self.target, derive_seed(stage_seed, generation as u64))?;
            accepted += report.accepted;

            tracing::debug!(
                stage = plan.stage + 1,
                generation,
                error = report.error_after,
                accepted = report.accepted,
                out_of_bounds = report.out_of_bounds,
                "generation finished"
            );
            observer.on_generation(&GenerationProgress {
                stage: plan.stage,
                stages: plan.stages,
                generation,
                generations,
                image: genome.cached_canvas().image_view(),
                report,
            });
        }

        let final_error = genome.cached_error();
        Ok((
            genome.into_image(),
            StageReport {
                plan: *plan,
                initial_error,
                final_error,
                accepted,
            },
        ))
    }

    /// Target image
    pub const fn target(&self) -> &Array2<u8> {
        &self.target
    }

    /// Gradient field of the target
    pub const fn gradient(&self) -> &GradientField {
        &self.gradient
    }

    /// Current configuration
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Black starting canvas followed by each finished stage's rendering
    pub fn history(&self) -> &[Array2<u8>] {
        &self.history
    }

    /// Reports of finished stages
    pub fn reports(&self) -> &[StageReport] {
        &self.reports
    }
}
