//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Playback status derived from engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No track loaded
    Stopped,

    /// Active resource still loading
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Advance to the next track on natural end
    #[default]
    Off,

    /// Replay the current track once, then fall back to `Off`
    Once,

    /// Loop the current track indefinitely
    Full,
}

/// Shuffle algorithm used when shuffle is enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShuffleMode {
    /// Uniform Fisher-Yates permutation
    #[default]
    Random,

    /// Spread artists apart
    Smart,
}

/// What to do when a track cannot be loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadErrorPolicy {
    /// Drop the track and continue with the next one
    #[default]
    Skip,

    /// Stop playback and wait for the user
    Halt,
}

/// Mapping from volume percent to output gain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeCurve {
    /// Gain is percent / 100
    #[default]
    Linear,

    /// 0-100% mapped onto -60 dB..0 dB
    Logarithmic,
}
