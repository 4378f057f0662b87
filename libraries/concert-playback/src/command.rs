//! Command interface
//!
//! Every user-facing operation as a value, applied through a single entry
//! point. Hosts that receive commands over a bridge (web view, IPC, remote
//! control) can deserialize them straight into [`Command`].

use crate::backend::MediaBackend;
use crate::engine::PlaybackEngine;
use crate::types::RepeatMode;
use concert_core::{Track, UniqueId};
use serde::{Deserialize, Serialize};

/// Playback command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Resume, or start the next track
    Play,

    /// Pause
    Pause,

    /// Pause when playing, play otherwise
    TogglePlayback,

    /// Seek to an absolute position in seconds
    Seek {
        /// Target position
        position: f64,
    },

    /// Seek relative to the current position
    SeekBy {
        /// Offset in seconds (may be negative)
        delta: f64,
    },

    /// Set volume in percent
    SetVolume {
        /// 0-100; `<= 0` mutes
        percent: f32,
    },

    /// Mute output
    Mute,

    /// Unmute output
    Unmute,

    /// Toggle mute
    ToggleMute,

    /// Skip to the next track
    NextTrack,

    /// Restart or go back
    PreviousTrack,

    /// Append to the priority tier
    #[serde(rename_all = "camelCase")]
    QueuePriorityTracks {
        /// Tracks to queue
        tracks: Vec<Track>,
    },

    /// Remove one priority track by enqueue identity
    #[serde(rename_all = "camelCase")]
    RemovePriorityTrack {
        /// Identity of the queued instance
        unique_id: UniqueId,
    },

    /// Drop all priority tracks
    ClearPriorityTracks,

    /// Replace the queue and start playing
    #[serde(rename_all = "camelCase")]
    PlayTracks {
        /// New queue
        tracks: Vec<Track>,
        /// Index of the track to start with
        #[serde(default)]
        start_index: usize,
    },

    /// Shuffle the continuation
    EnableShuffle,

    /// Restore the original order
    DisableShuffle,

    /// Change repeat behaviour
    SetRepeatMode {
        /// New mode
        mode: RepeatMode,
    },
}

/// Result of applying a command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandOutcome {
    /// The command ran; observe effects through listeners
    Applied,

    /// A seek ran; carries the clamped position
    Position(f64),
}

impl<B: MediaBackend> PlaybackEngine<B> {
    /// Apply a command
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        tracing::trace!(?command, "Applying command");

        match command {
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::TogglePlayback => {
                if self.is_paused() {
                    self.play();
                } else {
                    self.pause();
                }
            }
            Command::Seek { position } => return CommandOutcome::Position(self.seek(position)),
            Command::SeekBy { delta } => return CommandOutcome::Position(self.seek_by(delta)),
            Command::SetVolume { percent } => self.set_volume(percent),
            Command::Mute => self.mute(),
            Command::Unmute => self.unmute(),
            Command::ToggleMute => self.toggle_mute(),
            Command::NextTrack => self.next_track(),
            Command::PreviousTrack => self.previous_track(),
            Command::QueuePriorityTracks { tracks } => self.queue_priority_tracks(tracks),
            Command::RemovePriorityTrack { unique_id } => self.remove_priority_track(&unique_id),
            Command::ClearPriorityTracks => self.clear_priority_tracks(),
            Command::PlayTracks {
                tracks,
                start_index,
            } => self.play_tracks(tracks, start_index),
            Command::EnableShuffle => self.enable_shuffle(),
            Command::DisableShuffle => self.disable_shuffle(),
            Command::SetRepeatMode { mode } => self.set_repeat_mode(mode),
        }

        CommandOutcome::Applied
    }
}
