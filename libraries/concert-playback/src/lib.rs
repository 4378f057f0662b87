//! Concert - Playback Engine
//!
//! Gapless dual-buffer playback over a mutable queue of streamed tracks.
//!
//! This crate provides:
//! - Two audio slots (active + standby) with look-ahead buffering
//! - Gapless transitions: the next track starts inside a small window
//!   before the current one ends
//! - Priority queue, continuation queue and bounded history
//! - Shuffle (Random + Smart, or a custom policy) and repeat (Off, Once, Full)
//! - Volume with mute, on a linear or logarithmic curve
//! - Snapshot notifications for UI layers and a media-control surface
//!
//! # Architecture
//!
//! `concert-playback` never touches a real media element. Platform code
//! implements [`MediaBackend`] / [`MediaHandle`] and forwards the backend's
//! lifecycle events into [`PlaybackEngine::handle_media_event`]. Progress is
//! polled with [`PlaybackEngine::tick`]. There is no global state and no
//! threading; the host owns the engine and drives it from its event loop.
//!
//! [`SimulatedBackend`] is a headless backend with a virtual clock, used by
//! the tests and usable by any host without an audio device.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use concert_core::Track;
//! use concert_playback::{EventLog, PlaybackEngine, PlaybackEvent, SimulatedBackend};
//!
//! let mut engine = PlaybackEngine::new(SimulatedBackend::new());
//! let log = EventLog::new();
//! engine.subscribe(log.clone());
//!
//! let tracks = vec![
//!     Track::new("a", "Prelude", "https://cdn.example/a.mp3", 120.0),
//!     Track::new("b", "Fugue", "https://cdn.example/b.mp3", 240.0),
//!     Track::new("c", "Coda", "https://cdn.example/c.mp3", 60.0),
//! ];
//! engine.play_tracks(tracks, 1);
//!
//! assert_eq!(engine.current_track().unwrap().id.as_str(), "b");
//! assert_eq!(engine.previous_tracks().len(), 1);
//! assert_eq!(engine.next_tracks().len(), 1);
//!
//! let started = log
//!     .drain()
//!     .into_iter()
//!     .filter(|event| matches!(event, PlaybackEvent::TrackStarted(_)))
//!     .count();
//! assert_eq!(started, 1);
//! ```
//!
//! # Example: Commands
//!
//! ```rust
//! use concert_playback::{Command, PlaybackEngine, RepeatMode, SimulatedBackend};
//!
//! let mut engine = PlaybackEngine::new(SimulatedBackend::new());
//! engine.apply(Command::SetVolume { percent: 40.0 });
//! engine.apply(Command::SetRepeatMode { mode: RepeatMode::Once });
//!
//! assert_eq!(engine.volume(), 40.0);
//! assert_eq!(engine.repeat_mode(), RepeatMode::Once);
//! ```

mod backend;
mod command;
mod config;
mod engine;
mod error;
mod events;
mod history;
pub mod media_control;
mod queue;
pub mod repeat;
pub mod shuffle;
mod simulated;
mod slots;
mod time;
pub mod types;
mod unit;
mod volume;

// Public exports
pub use backend::{MediaBackend, MediaEvent, MediaEventKind, MediaHandle, UnitToken};
pub use command::{Command, CommandOutcome};
pub use config::EngineConfig;
pub use engine::PlaybackEngine;
pub use error::{MediaError, MediaErrorKind, PlaybackError, Result};
pub use events::{EventLog, ListenerId, PlaybackEvent, PlaybackListener, PlaybackSnapshot};
pub use media_control::{MediaControlCommand, NowPlaying};
pub use shuffle::{RandomShuffle, Shuffler, SmartShuffle};
pub use simulated::SimulatedBackend;
pub use slots::SlotId;
pub use time::format_time;
pub use types::{LoadErrorPolicy, PlaybackStatus, RepeatMode, ShuffleMode, VolumeCurve};
