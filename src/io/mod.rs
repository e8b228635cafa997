//! Input/output operations, configuration and error handling

/// Command-line interface and run front end
pub mod cli;
/// Constants and run configuration
pub mod configuration;
/// Error types and context propagation
pub mod error;
/// Image loading and export
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Terminal progress bars
pub mod progress;
/// Animated GIF capture of run progress
pub mod visualization;
