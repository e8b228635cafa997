//! Stroke records and their random initialization and mutation

use crate::algorithm::schedule::SizeRange;
use crate::analysis::gradient::GradientField;
use crate::math::probability::{RandomSelector, WeightedPositionSampler};

/// One brush-stamp placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Paint intensity
    pub color: u8,
    /// Stamp center `[row, col]` in target-image coordinates
    pub position: [usize; 2],
    /// Scale factor applied to the brush stamp
    pub size: f64,
    /// Rotation in degrees, counter-clockwise as displayed
    pub rotation: f64,
    /// Index into the brush set
    pub brush: usize,
}

/// Stroke attributes that a mutation trial can redraw
///
/// Row and column move together as [`MutationTarget::Position`]. Variants are
/// declared in application order: position precedes rotation so a redrawn
/// rotation reads the gradient at the redrawn position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MutationTarget {
    /// Paint intensity
    Color,
    /// Stamp center
    Position,
    /// Scale factor
    Size,
    /// Rotation angle
    Rotation,
    /// Brush index
    Brush,
}

impl MutationTarget {
    /// Every target, in application order
    pub const ALL: [Self; 5] = [
        Self::Color,
        Self::Position,
        Self::Size,
        Self::Rotation,
        Self::Brush,
    ];
}

/// Draws stroke attributes from the distributions of one stage
pub struct StrokeSampler<'a> {
    gradient: &'a GradientField,
    positions: &'a WeightedPositionSampler,
    sizes: SizeRange,
    brush_count: usize,
}

impl<'a> StrokeSampler<'a> {
    /// Sampler over `brush_count` brushes and the given stage distributions
    pub const fn new(
        gradient: &'a GradientField,
        positions: &'a WeightedPositionSampler,
        sizes: SizeRange,
        brush_count: usize,
    ) -> Self {
        Self {
            gradient,
            positions,
            sizes,
            brush_count,
        }
    }

    /// Stage size range
    pub const fn sizes(&self) -> SizeRange {
        self.sizes
    }

    /// Uniform paint intensity
    pub fn color(&self, selector: &mut RandomSelector) -> u8 {
        selector.intensity()
    }

    /// Uniform scale in the stage range
    pub fn size(&self, selector: &mut RandomSelector) -> f64 {
        selector.uniform(self.sizes.min, self.sizes.max)
    }

    /// Position from the stage sampler
    pub fn position(&self, selector: &mut RandomSelector) -> [usize; 2] {
        self.positions.sample(selector)
    }

    /// Rotation pulled towards the edge tangent at `position`
    ///
    /// A uniform angle in `[-180, 180)` is damped by the local gradient
    /// magnitude and offset by the gradient angle plus 90 degrees, so strong
    /// edges get strokes running along them.
    pub fn rotation(&self, selector: &mut RandomSelector, position: [usize; 2]) -> f64 {
        let (magnitude, angle) = self.gradient.at(position);
        selector
            .uniform(-180.0, 180.0)
            .mul_add(1.0 - magnitude, angle + 90.0)
    }

    /// Uniform brush index over the whole set
    pub fn brush(&self, selector: &mut RandomSelector) -> usize {
        selector.index(self.brush_count)
    }

    /// Fresh random stroke
    pub fn random_stroke(&self, selector: &mut RandomSelector) -> Stroke {
        let color = self.color(selector);
        let size = self.size(selector);
        let position = self.position(selector);
        let rotation = self.rotation(selector, position);
        let brush = self.brush(selector);
        Stroke {
            color,
            position,
            size,
            rotation,
            brush,
        }
    }

    /// Random non-empty subset of mutation targets, in application order
    pub fn choose_targets(&self, selector: &mut RandomSelector) -> Vec<MutationTarget> {
        let count = 1 + selector.index(MutationTarget::ALL.len());
        choose_targets_with_count(selector, count)
    }

    /// Candidate copy of `stroke` with a random subset of attributes redrawn
    ///
    /// The original is left untouched; the caller decides whether the
    /// candidate replaces it.
    pub fn mutate(
        &self,
        stroke: &Stroke,
        selector: &mut RandomSelector,
    ) -> (Stroke, Vec<MutationTarget>) {
        let targets = self.choose_targets(selector);
        let mut candidate = *stroke;
        for &target in &targets {
            match target {
                MutationTarget::Color => candidate.color = self.color(selector),
                MutationTarget::Position => candidate.position = self.position(selector),
                MutationTarget::Size => candidate.size = self.size(selector),
                MutationTarget::Rotation => {
                    candidate.rotation = self.rotation(selector, candidate.position);
                }
                MutationTarget::Brush => candidate.brush = self.brush(selector),
            }
        }
        (candidate, targets)
    }
}

/// `count` distinct mutation targets drawn without replacement
///
/// `count` is clamped to the number of targets. The result is sorted into
/// application order.
pub fn choose_targets_with_count(
    selector: &mut RandomSelector,
    count: usize,
) -> Vec<MutationTarget> {
    let mut targets: Vec<MutationTarget> = selector
        .distinct_indices(MutationTarget::ALL.len(), count)
        .into_iter()
        .filter_map(|i| MutationTarget::ALL.get(i).copied())
        .collect();
    targets.sort_unstable();
    targets
}

/// Whether a mutation changes the prepared stamp (scale, rotation or brush)
pub fn reshapes_stamp(targets: &[MutationTarget]) -> bool {
    targets.iter().any(|target| {
        matches!(
            target,
            MutationTarget::Size | MutationTarget::Rotation | MutationTarget::Brush
        )
    })
}
