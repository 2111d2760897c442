//! Shared error types for the rating engine

use std::path::PathBuf;
use thiserror::Error;

use super::Dimension;

/// Main error type for carescore operations
#[derive(Debug, Error)]
pub enum Error {
    /// Facility snapshot loading errors
    #[error("Supplier error: {message}")]
    Supplier {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Raw dimension scoring errors, isolated per facility
    #[error("Scoring error for facility {facility} ({dimension}): {message}")]
    Scoring {
        facility: String,
        dimension: Dimension,
        message: String,
    },

    /// Rating sink errors
    #[error("Sink error: {0}")]
    Sink(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a supplier error with path context
    pub fn supplier(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Supplier {
            message: message.into(),
            path: Some(path.into()),
            source: None,
        }
    }

    /// Create a per-facility scoring error
    pub fn scoring(
        facility: impl Into<String>,
        dimension: Dimension,
        message: impl Into<String>,
    ) -> Self {
        Self::Scoring {
            facility: facility.into(),
            dimension,
            message: message.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
