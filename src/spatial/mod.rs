//! Spatial data structures for compositing
//!
//! This module contains the padded canvas, placement rectangles and the
//! pixel-difference error metric.

/// Padded canvas, placement geometry and error metric
pub mod canvas;

pub use canvas::Canvas;
