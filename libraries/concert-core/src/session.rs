//! Session validity signal
//!
//! Playback is only available while the user's session is valid. The
//! authentication subsystem owns that state; the playback engine only asks.

use std::cell::Cell;
use std::rc::Rc;

/// Source of the "may we play audio right now" signal
pub trait SessionGate {
    /// Whether the current session allows playback
    fn is_session_valid(&self) -> bool;
}

/// Gate that always allows playback
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl SessionGate for AlwaysValid {
    fn is_session_valid(&self) -> bool {
        true
    }
}

/// Shared, settable session flag
///
/// Clones observe the same flag, so the auth layer can keep one handle and
/// give another to the engine.
#[derive(Debug, Clone)]
pub struct SessionFlag {
    valid: Rc<Cell<bool>>,
}

impl SessionFlag {
    /// Create a flag with the given initial validity
    pub fn new(valid: bool) -> Self {
        Self {
            valid: Rc::new(Cell::new(valid)),
        }
    }

    /// Update validity (e.g. on login, logout or token expiry)
    pub fn set_valid(&self, valid: bool) {
        self.valid.set(valid);
    }
}

impl Default for SessionFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SessionGate for SessionFlag {
    fn is_session_valid(&self) -> bool {
        self.valid.get()
    }
}

impl<F> SessionGate for F
where
    F: Fn() -> bool,
{
    fn is_session_valid(&self) -> bool {
        self()
    }
}
