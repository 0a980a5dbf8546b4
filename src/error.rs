//! Unified error handling for the bikeway-stats library.
//!
//! Sparse or irregular data (empty collections, short segments, zero totals)
//! is handled with fallback values. Errors are reserved for contract
//! violations and for input that cannot be decoded at all.

use std::fmt;

/// Unified error type for bikeway-stats operations.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Length was requested for a feature whose geometry is not a LineString
    InvalidGeometry {
        feature_id: Option<String>,
        kind: String,
    },
    /// GeoJSON text could not be decoded
    Parse { message: String },
    /// A dataset file could not be read
    Io { path: String, message: String },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::InvalidGeometry { feature_id, kind } => match feature_id {
                Some(id) => write!(
                    f,
                    "Feature '{}' must be a LineString, got '{}'",
                    id, kind
                ),
                None => write!(f, "Feature must be a LineString, got '{}'", kind),
            },
            StatsError::Parse { message } => {
                write!(f, "Invalid GeoJSON: {}", message)
            }
            StatsError::Io { path, message } => {
                write!(f, "Cannot read '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for StatsError {}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        StatsError::Parse {
            message: err.to_string(),
        }
    }
}

/// Result type alias for bikeway-stats operations.
pub type Result<T> = std::result::Result<T, StatsError>;
