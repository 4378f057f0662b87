//! Repeat policy
//!
//! Pure decisions about what happens when a track finishes.

use crate::types::RepeatMode;

/// Reaction to a track reaching its natural end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndAction {
    /// Select the next track
    Advance,

    /// Replay the current track from the start, then switch to `then`
    Restart {
        /// Repeat mode after the restart
        then: RepeatMode,
    },
}

/// Decide what a natural end means under `mode`
pub fn on_natural_end(mode: RepeatMode) -> EndAction {
    match mode {
        RepeatMode::Off => EndAction::Advance,
        RepeatMode::Once => EndAction::Restart {
            then: RepeatMode::Off,
        },
        RepeatMode::Full => EndAction::Restart {
            then: RepeatMode::Full,
        },
    }
}

/// Whether the next track may start early near the end of this one
pub fn allows_gapless(mode: RepeatMode) -> bool {
    mode == RepeatMode::Off
}

/// Whether the media unit should loop natively
pub fn uses_native_loop(mode: RepeatMode) -> bool {
    mode == RepeatMode::Full
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_advances() {
        assert_eq!(on_natural_end(RepeatMode::Off), EndAction::Advance);
        assert!(allows_gapless(RepeatMode::Off));
        assert!(!uses_native_loop(RepeatMode::Off));
    }

    #[test]
    fn once_restarts_then_reverts() {
        assert_eq!(
            on_natural_end(RepeatMode::Once),
            EndAction::Restart {
                then: RepeatMode::Off
            }
        );
        assert!(!allows_gapless(RepeatMode::Once));
    }

    #[test]
    fn full_loops() {
        assert_eq!(
            on_natural_end(RepeatMode::Full),
            EndAction::Restart {
                then: RepeatMode::Full
            }
        );
        assert!(uses_native_loop(RepeatMode::Full));
        assert!(!allows_gapless(RepeatMode::Full));
    }
}
