//! Shared helpers for integration tests

#![allow(dead_code)]

use concert_core::Track;
use concert_playback::{EventLog, PlaybackEngine, PlaybackEvent, SimulatedBackend};
use std::collections::VecDeque;
use std::sync::Once;

static INIT: Once = Once::new();

/// Install a test tracing subscriber once per binary
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

pub fn url_for(id: &str) -> String {
    format!("https://cdn.example/{id}.mp3")
}

pub fn create_test_track(id: &str) -> Track {
    Track::new(id, format!("Track {id}"), url_for(id), 180.0)
        .with_artist(format!("Artist {id}"), None)
}

pub fn create_test_tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| create_test_track(id)).collect()
}

pub fn ids(tracks: &VecDeque<Track>) -> Vec<String> {
    tracks.iter().map(|t| t.id.to_string()).collect()
}

pub fn current_id(engine: &PlaybackEngine<SimulatedBackend>) -> Option<String> {
    engine.current_track().map(|t| t.id.to_string())
}

/// Engine over a simulated backend with a recording listener attached
pub fn engine_with_log() -> (PlaybackEngine<SimulatedBackend>, SimulatedBackend, EventLog) {
    init_tracing();
    let backend = SimulatedBackend::new();
    let mut engine = PlaybackEngine::new(backend.clone());
    let log = EventLog::new();
    engine.subscribe(log.clone());
    (engine, backend, log)
}

pub fn started_ids(events: &[PlaybackEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            PlaybackEvent::TrackStarted(track) => Some(track.id.to_string()),
            _ => None,
        })
        .collect()
}

pub fn ended_ids(events: &[PlaybackEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            PlaybackEvent::TrackEnded(track) => Some(track.id.to_string()),
            _ => None,
        })
        .collect()
}

pub fn error_count(events: &[PlaybackEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, PlaybackEvent::Error { .. }))
        .count()
}
