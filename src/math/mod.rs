//! Mathematical utilities for sampling, resampling and filtering

/// Separable Gaussian and derivative filters with mirrored borders
pub mod filter;
/// Cubic scaling and bilinear rotation of stamp images
pub mod interpolation;
/// Seeded selection and density-weighted position sampling
pub mod probability;
