//! Error types for level loading, pattern sheets and grid access

use std::fmt;
use std::path::PathBuf;

/// Main error type for all engine operations
#[derive(Debug)]
pub enum GameError {
    /// Failed to read a level file from disk
    LevelRead {
        /// Path to the level file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Level file is not valid level JSON
    LevelParse {
        /// Path to the level file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Level data doesn't meet the engine's requirements
    InvalidLevel {
        /// Description of what's wrong with the level
        reason: String,
    },

    /// Failed to load the reference pattern image
    PatternLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Grid position outside the level bounds
    OutOfBounds {
        /// Requested (row, col)
        position: (usize, usize),
        /// Grid dimensions (rows, cols)
        dimensions: (usize, usize),
    },

    /// Failed to save a rendered image to disk
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

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelRead { path, source } => {
                write!(f, "Failed to read level '{}': {source}", path.display())
            }
            Self::LevelParse { path, source } => {
                write!(f, "Failed to parse level '{}': {source}", path.display())
            }
            Self::InvalidLevel { reason } => {
                write!(f, "Invalid level: {reason}")
            }
            Self::PatternLoad { path, source } => {
                write!(
                    f,
                    "Failed to load pattern image '{}': {source}",
                    path.display()
                )
            }
            Self::OutOfBounds {
                position,
                dimensions,
            } => {
                write!(
                    f,
                    "Position ({}, {}) is outside the grid (size {}x{})",
                    position.0, position.1, dimensions.0, dimensions.1
                )
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
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PatternLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::LevelRead { source, .. } | Self::FileSystem { source, .. } => Some(source),
            Self::LevelParse { source, .. } => Some(source),
            Self::InvalidLevel { .. } | Self::OutOfBounds { .. } | Self::InvalidParameter { .. } => {
                None
            }
        }
    }
}

/// Convenience type alias for engine results
pub type Result<T> = std::result::Result<T, GameError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GameError {
    GameError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid level error
pub fn invalid_level(reason: &impl ToString) -> GameError {
    GameError::InvalidLevel {
        reason: reason.to_string(),
    }
}
