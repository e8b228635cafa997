//! Brushstroke image approximation by staged per-stroke hill climbing
//!
//! A grayscale target is approximated by semi-transparent brush stamps. Each
//! stage adds a set of randomly initialized strokes guided by the target's
//! gradient field, then repeatedly mutates every stroke and keeps only
//! mutations that reduce the pixel difference to the target. Stages move from
//! large strokes placed anywhere to small strokes concentrated near edges.

#![deny(unsafe_code)]

/// Stroke genome, compositing and stage orchestration
pub mod algorithm;
/// Gradient analysis and sampling masks of the target image
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Mathematical utilities for sampling, resampling and filtering
pub mod math;
/// Padded canvas and placement geometry
pub mod spatial;

pub use io::error::{PaintError, Result};
