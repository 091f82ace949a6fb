//! Error types for mosaic generation operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum MosaicError {
    /// Settings validation or unit conversion failed
    InvalidSettings {
        /// Name of the offending setting
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// The target photograph could not be decoded
    TargetImageUnreadable {
        /// Path to the target image
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// No candidate photo survived decoding
    ///
    /// Per-candidate decode failures are non-fatal and recorded on the
    /// photo library; this error is raised only when the surviving pool
    /// is empty.
    EmptyCellPool {
        /// Number of candidate paths that were attempted
        attempted: usize,
    },

    /// A generation run is already in flight on this engine
    Busy,

    /// Failed to encode or save the composed mosaic
    ImageExport {
        /// Path where the export was attempted
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
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSettings {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid setting '{parameter}' = '{value}': {reason}")
            }
            Self::TargetImageUnreadable { path, source } => {
                write!(
                    f,
                    "Failed to decode target image '{}': {source}",
                    path.display()
                )
            }
            Self::EmptyCellPool { attempted } => {
                write!(
                    f,
                    "No usable cell photos ({attempted} candidate(s) attempted, none decoded)"
                )
            }
            Self::Busy => {
                write!(f, "A generation run is already in progress")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export mosaic to '{}': {source}",
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
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TargetImageUnreadable { source, .. } | Self::ImageExport { source, .. } => {
                Some(source)
            }
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Create an invalid settings error
pub fn invalid_settings(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidSettings {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
