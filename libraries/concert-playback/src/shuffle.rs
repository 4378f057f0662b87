//! Shuffle policies for the upcoming queue
//!
//! A [`Shuffler`] turns the continuation order into a permutation. The
//! engine never shuffles priority tracks and never mutates the original
//! order it passes in.

use crate::types::ShuffleMode;
use concert_core::Track;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Reordering policy applied when shuffle is enabled
///
/// Implementations must return a permutation of their input.
pub trait Shuffler {
    /// Produce a shuffled order of `tracks`
    fn shuffle(&mut self, tracks: Vec<Track>) -> Vec<Track>;
}

impl<F> Shuffler for F
where
    F: FnMut(Vec<Track>) -> Vec<Track>,
{
    fn shuffle(&mut self, tracks: Vec<Track>) -> Vec<Track> {
        self(tracks)
    }
}

/// Uniform Fisher-Yates shuffle
#[derive(Debug, Clone)]
pub struct RandomShuffle {
    rng: StdRng,
}

impl RandomShuffle {
    /// Shuffle seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic shuffle for reproducible orders
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomShuffle {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffler for RandomShuffle {
    fn shuffle(&mut self, mut tracks: Vec<Track>) -> Vec<Track> {
        tracks.shuffle(&mut self.rng);
        tracks
    }
}

/// Artist-aware shuffle
///
/// Groups tracks by artist, shuffles within each group and across groups,
/// then deals them out round-robin so the same artist rarely plays twice in
/// a row.
#[derive(Debug, Clone)]
pub struct SmartShuffle {
    rng: StdRng,
}

impl SmartShuffle {
    /// Shuffle seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic shuffle for reproducible orders
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SmartShuffle {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffler for SmartShuffle {
    fn shuffle(&mut self, mut tracks: Vec<Track>) -> Vec<Track> {
        if tracks.len() <= 2 {
            tracks.shuffle(&mut self.rng);
            return tracks;
        }

        let total = tracks.len();
        let mut groups: Vec<(String, Vec<Track>)> = Vec::new();
        for track in tracks {
            match groups.iter_mut().find(|(artist, _)| *artist == track.artist.name) {
                Some((_, group)) => group.push(track),
                None => groups.push((track.artist.name.clone(), vec![track])),
            }
        }

        for (_, group) in &mut groups {
            group.shuffle(&mut self.rng);
            // Dealt from the back below
            group.reverse();
        }
        groups.shuffle(&mut self.rng);

        let mut result = Vec::with_capacity(total);
        while result.len() < total {
            for (_, group) in &mut groups {
                if let Some(track) = group.pop() {
                    result.push(track);
                }
            }
        }
        result
    }
}

/// Built-in shuffler for a mode
pub fn shuffler_for(mode: ShuffleMode) -> Box<dyn Shuffler> {
    match mode {
        ShuffleMode::Random => Box::new(RandomShuffle::new()),
        ShuffleMode::Smart => Box::new(SmartShuffle::new()),
    }
}
