//! Headless media backend driven by a virtual clock
//!
//! Nothing is decoded or played. Every handle is a position counter that
//! moves when [`SimulatedBackend::advance`] is called, and lifecycle events
//! are queued until the host drains them. Useful for tests, CI and any host
//! without an audio device.
//!
//! ```
//! use concert_core::Track;
//! use concert_playback::{PlaybackEngine, SimulatedBackend};
//!
//! let mut engine = PlaybackEngine::new(SimulatedBackend::new());
//! engine.play_tracks(
//!     vec![
//!         Track::new("a", "Opening", "https://cdn.example/a.mp3", 180.0),
//!         Track::new("b", "Encore", "https://cdn.example/b.mp3", 180.0),
//!     ],
//!     0,
//! );
//!
//! // Deliver "loaded", then play through the first track
//! engine.pump();
//! engine.run_for(181.0, 0.25);
//! assert_eq!(engine.current_track().unwrap().id.as_str(), "b");
//! ```

use crate::backend::{MediaBackend, MediaEvent, MediaHandle, UnitToken};
use crate::engine::PlaybackEngine;
use crate::error::MediaError;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

const DEFAULT_DURATION_SECS: f64 = 180.0;

/// Number of recent `create` calls kept for [`SimulatedBackend::loads`]
const LOAD_LOG_LIMIT: usize = 256;

#[derive(Debug, Clone)]
struct SimMedia {
    url: String,
    duration: f64,
    position: f64,
    playing: bool,
    looping: bool,
    gain: f32,
}

#[derive(Debug, Default)]
struct SimState {
    default_duration: f64,
    durations: HashMap<String, f64>,
    create_failures: HashMap<String, MediaError>,
    load_failures: HashMap<String, MediaError>,
    play_failures: HashSet<String>,
    events: VecDeque<MediaEvent>,
    loads: VecDeque<String>,
    load_counts: HashMap<String, usize>,
    media: HashMap<UnitToken, SimMedia>,
}

/// In-memory media backend
///
/// Clones share state, so a test can keep one clone for inspection while
/// the engine owns another.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    state: Rc<RefCell<SimState>>,
}

impl SimulatedBackend {
    /// Backend where every resource lasts three minutes
    pub fn new() -> Self {
        Self::with_default_duration(DEFAULT_DURATION_SECS)
    }

    /// Backend with a different default resource length
    pub fn with_default_duration(secs: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(SimState {
                default_duration: secs,
                ..SimState::default()
            })),
        }
    }

    /// Override the media duration for `url`
    pub fn set_duration(&self, url: impl Into<String>, secs: f64) {
        self.state.borrow_mut().durations.insert(url.into(), secs);
    }

    /// Reject `url` synchronously in `create`
    pub fn fail_create(&self, url: impl Into<String>, error: MediaError) {
        self.state
            .borrow_mut()
            .create_failures
            .insert(url.into(), error);
    }

    /// Report `Failed` instead of `Loaded` for `url`
    pub fn fail_load(&self, url: impl Into<String>, error: MediaError) {
        self.state
            .borrow_mut()
            .load_failures
            .insert(url.into(), error);
    }

    /// Make `play` fail for `url` (e.g. an autoplay policy)
    pub fn fail_play(&self, url: impl Into<String>) {
        self.state.borrow_mut().play_failures.insert(url.into());
    }

    /// Take every queued event
    pub fn drain_events(&self) -> Vec<MediaEvent> {
        self.state.borrow_mut().events.drain(..).collect()
    }

    /// Number of queued events
    pub fn pending_events(&self) -> usize {
        self.state.borrow().events.len()
    }

    /// Move the virtual clock forward
    ///
    /// Playing resources advance; those reaching their end either wrap
    /// (looping) or stop and queue an `Ended` event.
    pub fn advance(&self, secs: f64) {
        let mut state = self.state.borrow_mut();
        let mut ended = Vec::new();

        for (token, media) in &mut state.media {
            if !media.playing {
                continue;
            }
            media.position += secs;
            if media.position < media.duration {
                continue;
            }
            if media.looping && media.duration > 0.0 {
                media.position %= media.duration;
            } else {
                media.position = media.duration;
                media.playing = false;
                ended.push(*token);
            }
        }

        ended.sort_by_key(|token| token.generation);
        state
            .events
            .extend(ended.into_iter().map(MediaEvent::ended));
    }

    /// The most recent URLs passed to `create`, oldest first
    ///
    /// Only the last 256 calls are kept.
    pub fn loads(&self) -> Vec<String> {
        self.state.borrow().loads.iter().cloned().collect()
    }

    /// How many times `url` was created
    pub fn load_count(&self, url: &str) -> usize {
        self.state
            .borrow()
            .load_counts
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    /// URLs currently playing
    pub fn playing_urls(&self) -> Vec<String> {
        let state = self.state.borrow();
        let mut playing: Vec<(u64, String)> = state
            .media
            .iter()
            .filter(|(_, media)| media.playing)
            .map(|(token, media)| (token.generation, media.url.clone()))
            .collect();
        playing.sort();
        playing.into_iter().map(|(_, url)| url).collect()
    }

    /// Number of handles not yet released
    pub fn live_handles(&self) -> usize {
        self.state.borrow().media.len()
    }

    /// Whether a live handle for `url` loops
    pub fn is_looping(&self, url: &str) -> bool {
        self.live_media(url).is_some_and(|media| media.looping)
    }

    /// Gain of the newest live handle for `url`
    pub fn gain_of(&self, url: &str) -> Option<f32> {
        self.live_media(url).map(|media| media.gain)
    }

    /// Position of the newest live handle for `url`
    pub fn position_of(&self, url: &str) -> Option<f64> {
        self.live_media(url).map(|media| media.position)
    }

    fn live_media(&self, url: &str) -> Option<SimMedia> {
        let state = self.state.borrow();
        state
            .media
            .iter()
            .filter(|(_, media)| media.url == url)
            .max_by_key(|(token, _)| token.generation)
            .map(|(_, media)| media.clone())
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaBackend for SimulatedBackend {
    fn create(&mut self, url: &str, token: UnitToken) -> Result<Box<dyn MediaHandle>, MediaError> {
        let mut state = self.state.borrow_mut();
        if state.loads.len() == LOAD_LOG_LIMIT {
            state.loads.pop_front();
        }
        state.loads.push_back(url.to_string());
        *state.load_counts.entry(url.to_string()).or_default() += 1;

        if let Some(error) = state.create_failures.get(url) {
            return Err(error.clone());
        }

        let duration = state
            .durations
            .get(url)
            .copied()
            .unwrap_or(state.default_duration);
        state.media.insert(
            token,
            SimMedia {
                url: url.to_string(),
                duration,
                position: 0.0,
                playing: false,
                looping: false,
                gain: 1.0,
            },
        );

        let event = match state.load_failures.get(url) {
            Some(error) => MediaEvent::failed(token, error.clone()),
            None => MediaEvent::loaded(token),
        };
        state.events.push_back(event);

        Ok(Box::new(SimHandle {
            token,
            state: Rc::clone(&self.state),
        }))
    }
}

struct SimHandle {
    token: UnitToken,
    state: Rc<RefCell<SimState>>,
}

impl SimHandle {
    fn with_media<T>(&self, f: impl FnOnce(&mut SimMedia) -> T) -> Option<T> {
        self.state.borrow_mut().media.get_mut(&self.token).map(f)
    }
}

impl MediaHandle for SimHandle {
    fn play(&mut self) -> Result<(), MediaError> {
        let blocked = {
            let state = self.state.borrow();
            state
                .media
                .get(&self.token)
                .is_some_and(|media| state.play_failures.contains(&media.url))
        };
        if blocked {
            return Err(MediaError::transport("play() was rejected"));
        }

        self.with_media(|media| {
            if media.position >= media.duration {
                media.position = 0.0;
            }
            media.playing = true;
        });
        Ok(())
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        self.with_media(|media| media.playing = false);
        Ok(())
    }

    fn seek(&mut self, position: f64) -> Result<(), MediaError> {
        self.with_media(|media| media.position = position.clamp(0.0, media.duration.max(0.0)));
        Ok(())
    }

    fn set_volume(&mut self, gain: f32) -> Result<(), MediaError> {
        self.with_media(|media| media.gain = gain);
        Ok(())
    }

    fn set_looping(&mut self, looping: bool) {
        self.with_media(|media| media.looping = looping);
    }

    fn position(&self) -> f64 {
        self.state
            .borrow()
            .media
            .get(&self.token)
            .map_or(0.0, |media| media.position)
    }

    fn duration(&self) -> Option<f64> {
        self.state
            .borrow()
            .media
            .get(&self.token)
            .map(|media| media.duration)
    }

    fn release(&mut self) {
        self.state.borrow_mut().media.remove(&self.token);
    }
}

// ===== Driving an engine =====

impl PlaybackEngine<SimulatedBackend> {
    /// Deliver queued backend events until none are left
    ///
    /// Returns the number of events delivered.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        loop {
            let events = self.backend().drain_events();
            if events.is_empty() {
                return delivered;
            }
            for event in events {
                self.handle_media_event(event);
                delivered += 1;
            }
        }
    }

    /// Play for `secs` of virtual time, ticking every `frame` seconds
    pub fn run_for(&mut self, secs: f64, frame: f64) {
        let frame = if frame > 0.0 { frame } else { secs };
        self.pump();

        let mut elapsed = 0.0;
        while elapsed < secs {
            let step = frame.min(secs - elapsed);
            self.backend().advance(step);
            self.tick();
            self.pump();
            elapsed += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MediaEventKind;
    use crate::slots::SlotId;

    fn token(generation: u64) -> UnitToken {
        UnitToken {
            slot: SlotId::A,
            generation,
        }
    }

    #[test]
    fn create_queues_loaded() {
        let mut backend = SimulatedBackend::new();
        let _handle = backend.create("https://cdn.example/a.mp3", token(1)).unwrap();

        let events = backend.drain_events();
        assert_eq!(events, vec![MediaEvent::loaded(token(1))]);
        assert_eq!(backend.load_count("https://cdn.example/a.mp3"), 1);
        assert_eq!(backend.live_handles(), 1);
    }

    #[test]
    fn configured_failures() {
        let mut backend = SimulatedBackend::new();
        backend.fail_create("https://cdn.example/bad.mp3", MediaError::unsupported_source("x"));
        backend.fail_load("https://cdn.example/404.mp3", MediaError::network("404"));

        assert!(backend.create("https://cdn.example/bad.mp3", token(1)).is_err());

        let _handle = backend.create("https://cdn.example/404.mp3", token(2)).unwrap();
        let events = backend.drain_events();
        assert!(matches!(events[0].kind, MediaEventKind::Failed(_)));
    }

    #[test]
    fn advance_reports_end() {
        let mut backend = SimulatedBackend::with_default_duration(10.0);
        let mut handle = backend.create("https://cdn.example/a.mp3", token(1)).unwrap();
        backend.drain_events();

        handle.play().unwrap();
        backend.advance(4.0);
        assert_eq!(handle.position(), 4.0);
        assert!(backend.drain_events().is_empty());

        backend.advance(7.0);
        assert_eq!(handle.position(), 10.0);
        assert_eq!(backend.drain_events(), vec![MediaEvent::ended(token(1))]);
        assert!(backend.playing_urls().is_empty());
    }

    #[test]
    fn looping_wraps_without_end() {
        let mut backend = SimulatedBackend::with_default_duration(10.0);
        let mut handle = backend.create("https://cdn.example/a.mp3", token(1)).unwrap();
        backend.drain_events();

        handle.set_looping(true);
        handle.play().unwrap();
        backend.advance(12.0);

        assert_eq!(handle.position(), 2.0);
        assert!(backend.drain_events().is_empty());
    }

    #[test]
    fn release_stops_playback() {
        let mut backend = SimulatedBackend::new();
        let mut handle = backend.create("https://cdn.example/a.mp3", token(1)).unwrap();
        handle.play().unwrap();

        handle.release();
        handle.release();
        assert_eq!(backend.live_handles(), 0);
        assert!(backend.playing_urls().is_empty());
    }

    #[test]
    fn long_sessions_stay_bounded() {
        let mut backend = SimulatedBackend::new();
        for generation in 0..300 {
            let mut handle = backend
                .create("https://cdn.example/a.mp3", token(generation))
                .unwrap();
            handle.play().unwrap();
            handle.release();
            backend.drain_events();
        }

        assert_eq!(backend.live_handles(), 0);
        assert_eq!(backend.loads().len(), LOAD_LOG_LIMIT);
        assert_eq!(backend.load_count("https://cdn.example/a.mp3"), 300);
    }

    #[test]
    fn play_failure() {
        let mut backend = SimulatedBackend::new();
        backend.fail_play("https://cdn.example/a.mp3");
        let mut handle = backend.create("https://cdn.example/a.mp3", token(1)).unwrap();

        let err = handle.play().unwrap_err();
        assert_eq!(err.kind, crate::error::MediaErrorKind::Transport);
    }
}
