//! Upcoming track queues
//!
//! Two tiers feed the engine:
//! - Priority: tracks the user queued explicitly, always played first, never
//!   shuffled
//! - Next: the continuation of whatever was started with `play_tracks`
//!
//! ```text
//! Currently Playing: Track A
//! ─────────────────────────────
//! Priority (play next):
//!   - Track B
//!   - Track C
//! ─────────────────────────────
//! Next (shuffled or not):
//!   - Track D
//!   - Track E
//! ```
//!
//! The unshuffled continuation is kept alongside `next` so that disabling
//! shuffle restores the unplayed remainder in its original order.

use crate::shuffle::Shuffler;
use concert_core::{Track, UniqueId};
use std::collections::VecDeque;

/// Priority tier plus the (possibly shuffled) continuation
#[derive(Debug, Clone, Default)]
pub struct UpcomingQueue {
    /// Explicitly queued tracks
    priority: VecDeque<Track>,

    /// Continuation in playback order
    next: VecDeque<Track>,

    /// Continuation in original order
    non_shuffled: VecDeque<Track>,

    /// Whether `next` is a permutation of `non_shuffled`
    shuffled: bool,
}

impl UpcomingQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append tracks to the priority tier, preserving their order
    pub fn queue_priority(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.priority.extend(tracks);
    }

    /// Remove the priority track with this identity
    ///
    /// Other enqueues of the same catalog track stay queued.
    pub fn remove_priority(&mut self, unique_id: &UniqueId) -> Option<Track> {
        let index = self
            .priority
            .iter()
            .position(|t| &t.unique_id == unique_id)?;
        self.priority.remove(index)
    }

    /// Drop every priority track
    pub fn clear_priority(&mut self) {
        self.priority.clear();
    }

    /// Whether any priority track is queued
    pub fn has_priority(&self) -> bool {
        !self.priority.is_empty()
    }

    /// Replace the continuation
    ///
    /// Leaves shuffle off; the caller re-applies it when needed.
    pub fn set_next(&mut self, tracks: Vec<Track>) {
        self.non_shuffled = tracks.iter().cloned().collect();
        self.next = tracks.into();
        self.shuffled = false;
    }

    /// Take the track that should play next
    ///
    /// Priority tracks win. A track taken from `next` also leaves the
    /// unshuffled continuation.
    pub fn pop_next(&mut self) -> Option<Track> {
        if let Some(track) = self.priority.pop_front() {
            return Some(track);
        }

        let track = self.next.pop_front()?;
        if let Some(index) = self
            .non_shuffled
            .iter()
            .position(|t| t.is_same_instance(&track))
        {
            self.non_shuffled.remove(index);
        }
        Some(track)
    }

    /// Track that `pop_next` would return
    pub fn peek_next(&self) -> Option<&Track> {
        self.priority.front().or_else(|| self.next.front())
    }

    /// Put a track back at the head of the continuation
    ///
    /// Used when stepping back through history.
    pub fn push_front_next(&mut self, track: Track) {
        self.non_shuffled.push_front(track.clone());
        self.next.push_front(track);
    }

    /// Shuffle the continuation
    ///
    /// Returns `false` when already shuffled. The unshuffled order is never
    /// modified.
    pub fn enable_shuffle(&mut self, shuffler: &mut dyn Shuffler) -> bool {
        if self.shuffled {
            return false;
        }
        let order: Vec<Track> = self.non_shuffled.iter().cloned().collect();
        self.next = shuffler.shuffle(order).into();
        self.shuffled = true;
        true
    }

    /// Restore the continuation to its original order
    ///
    /// Returns `false` when not shuffled.
    pub fn disable_shuffle(&mut self) -> bool {
        if !self.shuffled {
            return false;
        }
        self.next.clone_from(&self.non_shuffled);
        self.shuffled = false;
        true
    }

    /// Whether the continuation is shuffled
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Priority tier
    pub fn priority(&self) -> &VecDeque<Track> {
        &self.priority
    }

    /// Continuation in playback order
    pub fn next(&self) -> &VecDeque<Track> {
        &self.next
    }

    /// Continuation in original order
    pub fn non_shuffled(&self) -> &VecDeque<Track> {
        &self.non_shuffled
    }

    /// Total upcoming tracks
    pub fn len(&self) -> usize {
        self.priority.len() + self.next.len()
    }

    /// Whether nothing is upcoming
    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.next.is_empty()
    }

    /// Drop everything and turn shuffle off
    pub fn clear(&mut self) {
        self.priority.clear();
        self.next.clear();
        self.non_shuffled.clear();
        self.shuffled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("Track {id}"), format!("https://cdn.example/{id}.mp3"), 180.0)
    }

    fn ids(tracks: &VecDeque<Track>) -> Vec<&str> {
        tracks.iter().map(|t| t.id.as_str()).collect()
    }

    fn reverse(mut tracks: Vec<Track>) -> Vec<Track> {
        tracks.reverse();
        tracks
    }

    #[test]
    fn priority_plays_before_next() {
        let mut queue = UpcomingQueue::new();
        queue.set_next(vec![create_test_track("x"), create_test_track("y")]);
        queue.queue_priority(vec![create_test_track("a"), create_test_track("b")]);

        assert_eq!(queue.peek_next().map(|t| t.id.as_str()), Some("a"));

        let order: Vec<String> = std::iter::from_fn(|| queue.pop_next())
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(order, vec!["a", "b", "x", "y"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn remove_priority_by_identity() {
        let mut queue = UpcomingQueue::new();
        let first = create_test_track("a");
        let second = first.clone().reissued();
        queue.queue_priority(vec![first.clone(), second.clone()]);

        let removed = queue.remove_priority(&first.unique_id).unwrap();
        assert!(removed.is_same_instance(&first));
        assert_eq!(queue.priority().len(), 1);
        assert!(queue.priority()[0].is_same_instance(&second));

        // Idempotent
        assert!(queue.remove_priority(&first.unique_id).is_none());
        assert_eq!(queue.priority().len(), 1);
    }

    #[test]
    fn shuffle_keeps_original_order() {
        let mut queue = UpcomingQueue::new();
        queue.set_next(vec![
            create_test_track("1"),
            create_test_track("2"),
            create_test_track("3"),
        ]);

        assert!(queue.enable_shuffle(&mut reverse));
        assert!(queue.is_shuffled());
        assert_eq!(ids(queue.next()), vec!["3", "2", "1"]);
        assert_eq!(ids(queue.non_shuffled()), vec!["1", "2", "3"]);

        // Already shuffled
        assert!(!queue.enable_shuffle(&mut reverse));

        assert!(queue.disable_shuffle());
        assert_eq!(ids(queue.next()), vec!["1", "2", "3"]);
        assert!(!queue.disable_shuffle());
    }

    #[test]
    fn popping_shuffled_track_removes_it_from_original_order() {
        let mut queue = UpcomingQueue::new();
        queue.set_next(vec![
            create_test_track("1"),
            create_test_track("2"),
            create_test_track("3"),
        ]);
        queue.enable_shuffle(&mut reverse);

        let played = queue.pop_next().unwrap();
        assert_eq!(played.id.as_str(), "3");
        assert_eq!(ids(queue.non_shuffled()), vec!["1", "2"]);

        queue.disable_shuffle();
        assert_eq!(ids(queue.next()), vec!["1", "2"]);
    }

    #[test]
    fn priority_is_never_shuffled() {
        let mut queue = UpcomingQueue::new();
        queue.queue_priority(vec![create_test_track("a"), create_test_track("b")]);
        queue.set_next(vec![create_test_track("1"), create_test_track("2")]);

        queue.enable_shuffle(&mut reverse);
        assert_eq!(ids(queue.priority()), vec!["a", "b"]);
    }

    #[test]
    fn push_front_updates_both_orders() {
        let mut queue = UpcomingQueue::new();
        queue.set_next(vec![create_test_track("2")]);
        queue.enable_shuffle(&mut reverse);

        queue.push_front_next(create_test_track("1"));
        assert_eq!(ids(queue.next()), vec!["1", "2"]);
        assert_eq!(ids(queue.non_shuffled()), vec!["1", "2"]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut queue = UpcomingQueue::new();
        queue.queue_priority(vec![create_test_track("a")]);
        queue.set_next(vec![create_test_track("1")]);
        queue.enable_shuffle(&mut reverse);

        queue.clear();
        assert!(queue.is_empty());
        assert!(!queue.is_shuffled());
        assert_eq!(queue.len(), 0);
    }
}
