//! Core error types for Concert

use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Concert
#[derive(Error, Debug)]
pub enum CoreError {
    /// A catalog record cannot be played
    #[error("Invalid track {id}: {reason}")]
    InvalidTrack {
        /// Catalog id of the offending record
        id: String,
        /// Why the record was rejected
        reason: String,
    },

    /// Catalog payload could not be decoded
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an invalid track error
    pub fn invalid_track(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTrack {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
