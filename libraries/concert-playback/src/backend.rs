//! Media backend capability traits
//!
//! The engine never touches a concrete media element. It asks a
//! [`MediaBackend`] for handles and receives [`MediaEvent`]s back from the
//! host, which forwards whatever the platform reports (element events,
//! decoder callbacks) into [`crate::PlaybackEngine::handle_media_event`].

use crate::error::MediaError;
use crate::slots::SlotId;
use serde::{Deserialize, Serialize};

/// Identity of one audio unit instance
///
/// A slot is reused many times; the generation tells apart successive units
/// living in the same slot, so late events from a discarded unit can be
/// recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitToken {
    /// Slot the unit lives in
    pub slot: SlotId,

    /// Monotonic per-engine counter
    pub generation: u64,
}

/// Terminal or lifecycle event reported for a media handle
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// Enough of the resource is available to start playback
    Loaded,

    /// Playback reached the end of the resource (not emitted while looping)
    Ended,

    /// The resource failed to load or decode
    Failed(MediaError),
}

/// Event addressed to a specific audio unit
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    /// Unit the event belongs to
    pub token: UnitToken,

    /// What happened
    pub kind: MediaEventKind,
}

impl MediaEvent {
    /// Loaded event
    pub fn loaded(token: UnitToken) -> Self {
        Self {
            token,
            kind: MediaEventKind::Loaded,
        }
    }

    /// Ended event
    pub fn ended(token: UnitToken) -> Self {
        Self {
            token,
            kind: MediaEventKind::Ended,
        }
    }

    /// Failed event
    pub fn failed(token: UnitToken, error: MediaError) -> Self {
        Self {
            token,
            kind: MediaEventKind::Failed(error),
        }
    }
}

/// A single loaded (or loading) media resource
///
/// Transport commands may fail; the engine routes failures to its error
/// channel. Callers only invoke them once the resource reported `Loaded`.
pub trait MediaHandle {
    /// Start or resume playback
    fn play(&mut self) -> Result<(), MediaError>;

    /// Pause playback
    fn pause(&mut self) -> Result<(), MediaError>;

    /// Jump to a position in seconds
    fn seek(&mut self, position: f64) -> Result<(), MediaError>;

    /// Set output gain (0.0 - 1.0)
    fn set_volume(&mut self, gain: f32) -> Result<(), MediaError>;

    /// Enable or disable native looping
    fn set_looping(&mut self, looping: bool);

    /// Current position in seconds
    fn position(&self) -> f64;

    /// Media duration in seconds, if known
    fn duration(&self) -> Option<f64>;

    /// Release the resource
    ///
    /// Must be safe to call more than once and before playback ever started.
    fn release(&mut self);
}

/// Factory for media handles
pub trait MediaBackend {
    /// Begin loading `url`
    ///
    /// The backend must later report `Loaded` or `Failed` for `token`. An
    /// immediate `Err` means the source was rejected outright.
    fn create(&mut self, url: &str, token: UnitToken) -> Result<Box<dyn MediaHandle>, MediaError>;
}

impl<B: MediaBackend + ?Sized> MediaBackend for Box<B> {
    fn create(&mut self, url: &str, token: UnitToken) -> Result<Box<dyn MediaHandle>, MediaError> {
        (**self).create(url, token)
    }
}
