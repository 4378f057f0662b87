//! Error types for playback management

use std::fmt;
use thiserror::Error;

/// Cause of a media failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaErrorKind {
    /// Resource could not be fetched
    Network,

    /// Resource was fetched but could not be decoded
    Decode,

    /// The backend cannot play this kind of source
    UnsupportedSource,

    /// A transport command (play, pause, seek, volume) was rejected
    Transport,
}

impl fmt::Display for MediaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MediaErrorKind::Network => "network",
            MediaErrorKind::Decode => "decode",
            MediaErrorKind::UnsupportedSource => "unsupported source",
            MediaErrorKind::Transport => "transport",
        };
        f.write_str(label)
    }
}

/// Failure reported by a media backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error: {message}")]
pub struct MediaError {
    /// Classified cause
    pub kind: MediaErrorKind,

    /// Backend-provided detail
    pub message: String,
}

impl MediaError {
    /// Create a media error of the given kind
    pub fn new(kind: MediaErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(MediaErrorKind::Network, message)
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(MediaErrorKind::Decode, message)
    }

    /// Create an unsupported-source error
    pub fn unsupported_source(message: impl Into<String>) -> Self {
        Self::new(MediaErrorKind::UnsupportedSource, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(MediaErrorKind::Transport, message)
    }

    /// Whether retrying the same URL later might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, MediaErrorKind::Network)
    }
}

/// Playback errors
///
/// None of these abort playback. The engine reports them on the listener
/// error channel and keeps going.
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    /// A track's media resource failed to load
    #[error("Failed to load track: {0}")]
    Load(MediaError),

    /// A transport command on a loaded resource failed
    #[error("Transport command failed: {0}")]
    Transport(MediaError),

    /// The session gate refused playback
    #[error("Playback unavailable: session is not valid")]
    SessionUnavailable,

    /// Engine configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
