//! Volume control
//!
//! Volume is a 0-100 percent level plus an independent mute flag. Setting
//! the level to zero or below mutes without forgetting the previous level.
//! The level is mapped to an output gain through a [`VolumeCurve`].

use crate::types::VolumeCurve;

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0-100)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,

    /// Level to gain mapping
    curve: VolumeCurve,
}

impl Volume {
    /// Create new volume controller
    pub fn new(level: f32, curve: VolumeCurve) -> Self {
        let level = if level.is_finite() {
            level.clamp(0.0, 100.0)
        } else {
            100.0
        };
        Self {
            level,
            muted: false,
            curve,
        }
    }

    /// Apply a user volume request
    ///
    /// Non-finite values are ignored. `<= 0` mutes and keeps the stored
    /// level; anything else is clamped to 100, stored, and unmutes.
    /// Returns `true` when the request was applied.
    pub fn set_percent(&mut self, percent: f32) -> bool {
        if !percent.is_finite() {
            return false;
        }
        if percent <= 0.0 {
            self.muted = true;
        } else {
            self.level = percent.min(100.0);
            self.muted = false;
        }
        true
    }

    /// Current volume level (0-100)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Output gain (0.0 - 1.0), 0.0 when muted
    pub fn gain(&self) -> f32 {
        if self.muted || self.level <= 0.0 {
            return 0.0;
        }
        match self.curve {
            VolumeCurve::Linear => self.level / 100.0,
            // 0% → -60 dB, 100% → 0 dB
            VolumeCurve::Logarithmic => {
                let db = (self.level - 100.0) * 0.6;
                10.0_f32.powf(db / 20.0)
            }
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(80.0, VolumeCurve::Linear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_gain() {
        let volume = Volume::new(50.0, VolumeCurve::Linear);
        assert!((volume.gain() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn logarithmic_gain() {
        let full = Volume::new(100.0, VolumeCurve::Logarithmic);
        assert!((full.gain() - 1.0).abs() < 0.001);

        // 50% → -30 dB
        let half = Volume::new(50.0, VolumeCurve::Logarithmic);
        assert!((half.gain() - 0.0316).abs() < 0.001);
    }

    #[test]
    fn zero_mutes_and_keeps_level() {
        let mut volume = Volume::new(70.0, VolumeCurve::Linear);

        assert!(volume.set_percent(0.0));
        assert!(volume.is_muted());
        assert_eq!(volume.level(), 70.0);
        assert_eq!(volume.gain(), 0.0);

        assert!(volume.set_percent(-5.0));
        assert_eq!(volume.level(), 70.0);
    }

    #[test]
    fn positive_value_unmutes() {
        let mut volume = Volume::default();
        volume.mute();

        volume.set_percent(40.0);
        assert!(!volume.is_muted());
        assert_eq!(volume.level(), 40.0);
    }

    #[test]
    fn clamps_and_ignores_nan() {
        let mut volume = Volume::default();

        volume.set_percent(250.0);
        assert_eq!(volume.level(), 100.0);

        assert!(!volume.set_percent(f32::NAN));
        assert!(!volume.set_percent(f32::INFINITY));
        assert_eq!(volume.level(), 100.0);
    }

    #[test]
    fn toggle_mute() {
        let mut volume = Volume::default();
        volume.toggle_mute();
        assert!(volume.is_muted());
        volume.toggle_mute();
        assert!(!volume.is_muted());
        assert!((volume.gain() - 0.8).abs() < f32::EPSILON);
    }
}
