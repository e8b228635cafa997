//! Error types and context management for painting runs

use std::fmt;
use std::path::PathBuf;

/// Main error type for all painting operations
#[derive(Debug)]
pub enum PaintError {
    /// Failed to load an image (target, mask or brush) from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered canvas or animation to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Run configuration or input data rejected before any stage executes
    InvalidInput {
        /// Name of the offending parameter or input
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A stamp placement rectangle would leave the padded canvas
    ///
    /// Only reachable when a canvas was built with a padding smaller than the
    /// one derived from the stage's maximum stroke size.
    GeometryOutOfBounds {
        /// Placement rectangle as `[top, left, bottom, right)` in canvas pixels
        rect: [i64; 4],
        /// Padded canvas dimensions (rows, cols)
        canvas: (usize, usize),
        /// Index of the stroke being composited, when known
        stroke_index: Option<usize>,
        /// Stage in which the failure happened, when known
        stage: Option<usize>,
    },

    /// A sampling density admits no valid draw
    SamplingDensityInvalid {
        /// Description of what is wrong with the density
        reason: String,
    },
}

impl fmt::Display for PaintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidInput {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid input '{parameter}' = '{value}': {reason}")
            }
            Self::GeometryOutOfBounds {
                rect,
                canvas,
                stroke_index,
                stage,
            } => {
                write!(
                    f,
                    "Stamp rectangle rows {}..{} cols {}..{} exceeds canvas {}x{}",
                    rect[0], rect[2], rect[1], rect[3], canvas.0, canvas.1
                )?;
                if let Some(index) = stroke_index {
                    write!(f, " (stroke {index})")?;
                }
                if let Some(stage) = stage {
                    write!(f, " (stage {stage})")?;
                }
                Ok(())
            }
            Self::SamplingDensityInvalid { reason } => {
                write!(f, "Invalid sampling density: {reason}")
            }
        }
    }
}

impl std::error::Error for PaintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for painting results
pub type Result<T> = std::result::Result<T, PaintError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorContext {
    /// Stage being executed
    pub stage: Option<usize>,
    /// Stroke being composited
    pub stroke_index: Option<usize>,
}

/// Enriches error messages with run state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the stage context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the stage context applied
    fn with_stage(self, stage: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<PaintError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only geometry failures carry positional context
            if let PaintError::GeometryOutOfBounds {
                stroke_index,
                stage,
                ..
            } = &mut error
            {
                if context.stroke_index.is_some() {
                    *stroke_index = context.stroke_index;
                }
                if context.stage.is_some() {
                    *stage = context.stage;
                }
            }
            error
        })
    }

    fn with_stage(self, stage: usize) -> Result<T> {
        self.with_context(ErrorContext {
            stage: Some(stage),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for PaintError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for PaintError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid input error
pub fn invalid_input(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PaintError {
    PaintError::InvalidInput {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a sampling density error
pub fn sampling_density_invalid(reason: &impl ToString) -> PaintError {
    PaintError::SamplingDensityInvalid {
        reason: reason.to_string(),
    }
}
