//! Playback history tracking
//!
//! Maintains a bounded history of played tracks for "previous" navigation.

use concert_core::Track;
use std::collections::VecDeque;

/// Playback history with bounded size
///
/// Ordered most recent first. Each push beyond the bound discards the
/// oldest entry. A seeded history may start above the bound; it then never
/// grows, it only rotates.
#[derive(Debug, Clone)]
pub struct History {
    /// History buffer (most recent = front)
    tracks: VecDeque<Track>,

    /// Maximum history size
    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            tracks: VecDeque::new(),
            max_size: max_size.max(1),
        }
    }

    /// Record a track as the most recent entry
    pub fn push(&mut self, track: Track) {
        self.tracks.push_front(track);
        if self.tracks.len() > self.max_size {
            self.tracks.pop_back();
        }
    }

    /// Pop most recent track
    pub fn pop(&mut self) -> Option<Track> {
        self.tracks.pop_front()
    }

    /// Replace the history with tracks given in play order (oldest first)
    ///
    /// Every track is kept, even past the bound.
    pub fn replace_with_played(&mut self, played: Vec<Track>) {
        self.tracks = played.into_iter().rev().collect();
    }

    /// All entries, most recent first
    pub fn tracks(&self) -> &VecDeque<Track> {
        &self.tracks
    }

    /// Number of tracks in history
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(200)
    }
}
