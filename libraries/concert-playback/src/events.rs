//! Playback state projection and listeners
//!
//! After every mutation the engine pushes an immutable
//! [`PlaybackSnapshot`] to registered listeners. Track boundaries and
//! errors have their own callbacks:
//! - `on_state_change`: after every relevant mutation
//! - `on_track_start`: a track became current and was asked to play
//! - `on_track_end`: a track stopped being current
//! - `on_error`: a non-fatal failure, with the affected track when known

use crate::error::PlaybackError;
use crate::types::{PlaybackStatus, RepeatMode};
use concert_core::Track;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// UI-facing snapshot of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    /// Volume level (0-100)
    pub volume: f32,

    /// Whether output is muted
    pub is_muted: bool,

    /// Whether playback is paused (true when nothing plays)
    pub is_paused: bool,

    /// Derived playback status
    pub status: PlaybackStatus,

    /// Position in seconds
    pub position: f64,

    /// Duration in seconds
    pub duration: f64,

    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Whether the continuation is shuffled
    pub is_shuffled: bool,

    /// Track being played
    pub current_track: Option<Track>,

    /// Explicitly queued tracks
    pub priority_tracks: Vec<Track>,

    /// Continuation in playback order
    pub next_tracks: Vec<Track>,

    /// Played tracks, most recent first
    pub previous_tracks: Vec<Track>,
}

/// Everything a listener can observe, as a value
#[derive(Debug, Clone)]
pub enum PlaybackEvent {
    /// New snapshot
    StateChanged(Box<PlaybackSnapshot>),

    /// Track started
    TrackStarted(Track),

    /// Track ended
    TrackEnded(Track),

    /// Non-fatal error
    Error {
        /// What went wrong
        error: PlaybackError,
        /// Affected track, if any
        track: Option<Track>,
    },
}

/// Receiver of engine notifications
///
/// All methods default to no-ops so listeners implement only what they need.
pub trait PlaybackListener {
    /// Engine state changed
    fn on_state_change(&mut self, _snapshot: &PlaybackSnapshot) {}

    /// A track started
    fn on_track_start(&mut self, _track: &Track) {}

    /// A track ended or was skipped
    fn on_track_end(&mut self, _track: &Track) {}

    /// A non-fatal error occurred
    fn on_error(&mut self, _error: &PlaybackError, _track: Option<&Track>) {}
}

/// Handle returned by [`Notifier::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registry of listeners
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<(ListenerId, Box<dyn PlaybackListener>)>,
    next_id: u64,
}

impl Notifier {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn subscribe(&mut self, listener: Box<dyn PlaybackListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener; returns `false` if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Whether nobody is listening
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Number of listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn state_changed(&mut self, snapshot: &PlaybackSnapshot) {
        for (_, listener) in &mut self.listeners {
            listener.on_state_change(snapshot);
        }
    }

    pub(crate) fn track_started(&mut self, track: &Track) {
        for (_, listener) in &mut self.listeners {
            listener.on_track_start(track);
        }
    }

    pub(crate) fn track_ended(&mut self, track: &Track) {
        for (_, listener) in &mut self.listeners {
            listener.on_track_end(track);
        }
    }

    pub(crate) fn error(&mut self, error: &PlaybackError, track: Option<&Track>) {
        for (_, listener) in &mut self.listeners {
            listener.on_error(error, track);
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Listener that records every notification
///
/// Clones share the same log, so one clone can be subscribed while another
/// is kept for draining.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<PlaybackEvent>>>,
}

impl EventLog {
    /// Empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all recorded events
    pub fn drain(&self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Most recent snapshot, if any
    pub fn last_snapshot(&self) -> Option<PlaybackSnapshot> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            PlaybackEvent::StateChanged(snapshot) => Some((**snapshot).clone()),
            _ => None,
        })
    }

    fn record(&self, event: PlaybackEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl PlaybackListener for EventLog {
    fn on_state_change(&mut self, snapshot: &PlaybackSnapshot) {
        self.record(PlaybackEvent::StateChanged(Box::new(snapshot.clone())));
    }

    fn on_track_start(&mut self, track: &Track) {
        self.record(PlaybackEvent::TrackStarted(track.clone()));
    }

    fn on_track_end(&mut self, track: &Track) {
        self.record(PlaybackEvent::TrackEnded(track.clone()));
    }

    fn on_error(&mut self, error: &PlaybackError, track: Option<&Track>) {
        self.record(PlaybackEvent::Error {
            error: error.clone(),
            track: track.cloned(),
        });
    }
}
