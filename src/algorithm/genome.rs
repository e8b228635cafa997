//! Stroke genome with cached rendering and greedy per-stroke hill climbing
//!
//! A genome holds the strokes of one stage, painted in order over the canvas
//! handed down from the previous stage. Evolution tries one mutation per stroke
//! and keeps it only if the whole rendering gets strictly closer to the target.
//! Each accepted mutation is visible to the trials that follow it.

use crate::algorithm::brush::BrushSet;
use crate::algorithm::compositor::{Stamp, composite};
use crate::algorithm::schedule::SizeRange;
use crate::algorithm::stroke::{MutationTarget, Stroke, StrokeSampler, reshapes_stamp};
use crate::analysis::gradient::GradientField;
use crate::io::error::{ErrorContext, PaintError, Result, WithContext, invalid_input};
use crate::math::probability::{RandomSelector, WeightedPositionSampler};
use crate::spatial::canvas::{Canvas, absolute_error, padding_for};
use ndarray::Array2;

/// Outcome of one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    /// Cached error before the generation
    pub error_before: u64,
    /// Cached error after the generation
    pub error_after: u64,
    /// Trials whose candidate replaced the stroke
    pub accepted: usize,
    /// Trials rejected because the candidate stamp left the canvas
    pub out_of_bounds: usize,
}

/// Strokes of one stage plus their cached rendering and error
pub struct Genome<'a> {
    strokes: Vec<Stroke>,
    /// Prepared stamp for each stroke, same order
    stamps: Vec<Stamp>,
    base: Canvas,
    cached_canvas: Canvas,
    cached_error: u64,
    gradient: &'a GradientField,
    brushes: &'a BrushSet,
    positions: WeightedPositionSampler,
    sizes: SizeRange,
}

impl<'a> Genome<'a> {
    /// Empty genome painting over `base`
    ///
    /// The canvas padding is derived from the largest stamp side and
    /// `sizes.max`, which keeps every stroke of the stage inside the buffer.
    /// Until [`Self::init`] runs, the cached canvas is the base itself.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `base` and the gradient field differ in size
    /// or the sampler does not cover the same grid
    pub fn new(
        base: &Array2<u8>,
        gradient: &'a GradientField,
        brushes: &'a BrushSet,
        positions: WeightedPositionSampler,
        sizes: SizeRange,
    ) -> Result<Self> {
        let padding = padding_for(brushes.stamp_side(), sizes.max);
        Self::with_padding(base, gradient, brushes, positions, sizes, padding)
    }

    /// Empty genome over a canvas with an explicit `padding`
    ///
    /// Strokes that do not fit the padded canvas fail in [`Self::init`] and
    /// are rejected in [`Self::evolve_generation`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`]
    pub fn with_padding(
        base: &Array2<u8>,
        gradient: &'a GradientField,
        brushes: &'a BrushSet,
        positions: WeightedPositionSampler,
        sizes: SizeRange,
        padding: usize,
    ) -> Result<Self> {
        if base.dim() != gradient.dimensions() || positions.dimensions() != base.dim() {
            return Err(invalid_input(
                "canvas",
                &format!("{}x{}", base.nrows(), base.ncols()),
                &"base canvas, gradient field and sampler must share dimensions",
            ));
        }

        let base = Canvas::from_image(base, padding);
        Ok(Self {
            strokes: Vec::new(),
            stamps: Vec::new(),
            cached_canvas: base.clone(),
            base,
            cached_error: u64::MAX,
            gradient,
            brushes,
            positions,
            sizes,
        })
    }

    fn sampler(&self) -> StrokeSampler<'_> {
        StrokeSampler::new(
            self.gradient,
            &self.positions,
            self.sizes,
            self.brushes.len(),
        )
    }

    /// Append `count` random strokes and render the initial cache
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `target` does not match the canvas size, and
    /// `GeometryOutOfBounds` if a stroke cannot be placed
    pub fn init(&mut self, target: &Array2<u8>, count: usize, seed: u64) -> Result<()> {
        self.check_target(target)?;

        let mut selector = RandomSelector::new(seed);
        let mut strokes = Vec::with_capacity(count);
        let mut stamps = Vec::with_capacity(count);
        {
            let sampler = self.sampler();
            for _ in 0..count {
                let stroke = sampler.random_stroke(&mut selector);
                stamps.push(Stamp::for_stroke(&stroke, self.brushes)?);
                strokes.push(stroke);
            }
        }
        self.strokes.extend(strokes);
        self.stamps.extend(stamps);

        let canvas = self.render_with(None)?;
        self.cached_error = absolute_error(canvas.image_view(), target);
        self.cached_canvas = canvas;
        Ok(())
    }

    /// Try one mutation per stroke, keeping strict improvements
    ///
    /// Trial `i` draws from a generator seeded by `seed` and `i`. A candidate
    /// that cannot be placed on the canvas counts as rejected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `target` does not match the canvas size or a
    /// candidate names a brush outside the set
    pub fn evolve_generation(&mut self, target: &Array2<u8>, seed: u64) -> Result<GenerationReport> {
        self.check_target(target)?;

        let mut report = GenerationReport {
            error_before: self.cached_error,
            error_after: self.cached_error,
            accepted: 0,
            out_of_bounds: 0,
        };

        for index in 0..self.strokes.len() {
            let mut selector = RandomSelector::derived(seed, index as u64);
            let Some(current) = self.strokes.get(index).copied() else {
                continue;
            };
            let (candidate, targets) = self.sampler().mutate(&current, &mut selector);

            match self.trial(target, index, &candidate, &targets) {
                Ok(Some((canvas, error, stamp))) => {
                    if let Some(slot) = self.strokes.get_mut(index) {
                        *slot = candidate;
                    }
                    if let (Some(new_stamp), Some(slot)) = (stamp, self.stamps.get_mut(index)) {
                        *slot = new_stamp;
                    }
                    self.cached_canvas = canvas;
                    self.cached_error = error;
                    report.accepted += 1;
                }
                Ok(None) => {}
                Err(PaintError::GeometryOutOfBounds { rect, canvas, .. }) => {
                    tracing::debug!(
                        stroke = index,
                        ?rect,
                        ?canvas,
                        "candidate stamp leaves the canvas, rejected"
                    );
                    report.out_of_bounds += 1;
                }
                Err(error) => return Err(error),
            }
        }

        report.error_after = self.cached_error;
        Ok(report)
    }

    /// Render a candidate and return it when it beats the cached error
    fn trial(
        &self,
        target: &Array2<u8>,
        index: usize,
        candidate: &Stroke,
        targets: &[MutationTarget],
    ) -> Result<Option<(Canvas, u64, Option<Stamp>)>> {
        let new_stamp = if reshapes_stamp(targets) {
            Some(Stamp::for_stroke(candidate, self.brushes)?)
        } else {
            None
        };
        let Some(stamp) = new_stamp.as_ref().or_else(|| self.stamps.get(index)) else {
            return Ok(None);
        };

        let canvas = self.render_with(Some((index, candidate, stamp)))?;
        let error = absolute_error(canvas.image_view(), target);
        Ok((error < self.cached_error).then_some((canvas, error, new_stamp)))
    }

    /// Paint every stroke over a fresh copy of the base, optionally
    /// substituting one stroke
    fn render_with(&self, replacement: Option<(usize, &Stroke, &Stamp)>) -> Result<Canvas> {
        let mut canvas = self.base.clone();
        for (index, (stroke, stamp)) in self.strokes.iter().zip(&self.stamps).enumerate() {
            let (stroke, stamp) = match replacement {
                Some((replaced, candidate, candidate_stamp)) if replaced == index => {
                    (candidate, candidate_stamp)
                }
                _ => (stroke, stamp),
            };
            composite(&mut canvas, stroke, stamp).with_context(ErrorContext {
                stroke_index: Some(index),
                ..Default::default()
            })?;
        }
        Ok(canvas)
    }

    fn check_target(&self, target: &Array2<u8>) -> Result<()> {
        let expected = self.base.image_dimensions();
        if target.dim() == expected {
            Ok(())
        } else {
            Err(invalid_input(
                "target",
                &format!("{}x{}", target.nrows(), target.ncols()),
                &format!("target must match the canvas size {}x{}", expected.0, expected.1),
            ))
        }
    }

    /// Strokes in paint order
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Sum of absolute differences between the cached rendering and the target
    ///
    /// `u64::MAX` before [`Self::init`].
    pub const fn cached_error(&self) -> u64 {
        self.cached_error
    }

    /// Cached rendering cropped to the image area
    pub fn cached_image(&self) -> Array2<u8> {
        self.cached_canvas.to_image()
    }

    /// Cached padded canvas
    pub const fn cached_canvas(&self) -> &Canvas {
        &self.cached_canvas
    }

    /// Stage size range
    pub const fn sizes(&self) -> SizeRange {
        self.sizes
    }

    /// Consume the genome and return its rendering
    pub fn into_image(self) -> Array2<u8> {
        self.cached_canvas.to_image()
    }
}
