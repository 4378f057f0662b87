//! Audio unit
//!
//! Wraps one media handle together with the track it plays. Transport
//! commands issued before the resource has loaded are remembered and
//! applied once the backend reports `Loaded`.

use crate::backend::{MediaHandle, UnitToken};
use crate::error::MediaError;
use concert_core::Track;
use std::fmt;

/// One playable media resource bound to a track
pub struct AudioUnit {
    token: UnitToken,
    track: Track,
    handle: Box<dyn MediaHandle>,
    loaded: bool,
    wants_play: bool,
    playing: bool,
    looping: bool,
    gain: f32,
    pending_seek: Option<f64>,
}

impl AudioUnit {
    /// Wrap a freshly created handle
    pub fn new(token: UnitToken, track: Track, handle: Box<dyn MediaHandle>) -> Self {
        Self {
            token,
            track,
            handle,
            loaded: false,
            wants_play: false,
            playing: false,
            looping: false,
            gain: 1.0,
            pending_seek: None,
        }
    }

    /// Instance token
    pub fn token(&self) -> UnitToken {
        self.token
    }

    /// Track metadata
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Replace track metadata while keeping the loaded resource
    ///
    /// Used when the same URL is selected again under a new enqueue identity.
    pub fn set_track(&mut self, track: Track) {
        self.track = track;
    }

    /// URL of the loaded resource
    pub fn url(&self) -> &str {
        &self.track.url
    }

    /// Whether the backend reported `Loaded`
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether playback was requested (it may still be waiting for load)
    pub fn wants_play(&self) -> bool {
        self.wants_play
    }

    /// Whether the resource is loaded and playing
    pub fn is_playing(&self) -> bool {
        self.loaded && self.playing
    }

    /// Whether native looping is enabled
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Current output gain
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Handle the backend's `Loaded` signal
    ///
    /// Applies deferred gain, seek and play. Every failing command is
    /// returned; the remaining ones are still attempted.
    pub fn mark_loaded(&mut self) -> Vec<MediaError> {
        if self.loaded {
            return Vec::new();
        }
        self.loaded = true;

        let mut errors = Vec::new();
        if let Err(e) = self.handle.set_volume(self.gain) {
            errors.push(e);
        }
        self.handle.set_looping(self.looping);
        if let Some(position) = self.pending_seek.take() {
            if let Err(e) = self.handle.seek(position) {
                errors.push(e);
            }
        }
        if self.wants_play {
            match self.handle.play() {
                Ok(()) => self.playing = true,
                Err(e) => errors.push(e),
            }
        }
        errors
    }

    /// Start or resume playback (deferred until loaded)
    pub fn play(&mut self) -> Result<(), MediaError> {
        self.wants_play = true;
        if self.loaded {
            self.handle.play()?;
            self.playing = true;
        }
        Ok(())
    }

    /// Pause playback (idempotent)
    pub fn pause(&mut self) -> Result<(), MediaError> {
        self.wants_play = false;
        if self.loaded && self.playing {
            self.playing = false;
            self.handle.pause()?;
        }
        Ok(())
    }

    /// Seek to `position` seconds (deferred until loaded)
    pub fn seek(&mut self, position: f64) -> Result<(), MediaError> {
        if self.loaded {
            self.handle.seek(position)
        } else {
            self.pending_seek = Some(position);
            Ok(())
        }
    }

    /// Set output gain (deferred until loaded)
    pub fn set_gain(&mut self, gain: f32) -> Result<(), MediaError> {
        self.gain = gain.clamp(0.0, 1.0);
        if self.loaded {
            self.handle.set_volume(self.gain)?;
        }
        Ok(())
    }

    /// Enable or disable native looping
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
        if self.loaded {
            self.handle.set_looping(looping);
        }
    }

    /// Current position in seconds
    pub fn position(&self) -> f64 {
        if self.loaded {
            self.handle.position()
        } else {
            self.pending_seek.unwrap_or(0.0)
        }
    }

    /// Media duration, once known
    pub fn duration(&self) -> Option<f64> {
        if self.loaded {
            self.handle.duration().filter(|d| d.is_finite() && *d >= 0.0)
        } else {
            None
        }
    }
}

impl Drop for AudioUnit {
    fn drop(&mut self) {
        self.handle.release();
    }
}

impl fmt::Debug for AudioUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioUnit")
            .field("token", &self.token)
            .field("track_id", &self.track.id)
            .field("loaded", &self.loaded)
            .field("playing", &self.playing)
            .field("looping", &self.looping)
            .finish_non_exhaustive()
    }
}
