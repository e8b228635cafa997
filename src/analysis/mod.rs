//! Target image analysis driving stroke orientation and placement

/// Gradient magnitude and direction of the target image
pub mod gradient;
/// Sampling densities derived from gradient magnitude
pub mod mask;
