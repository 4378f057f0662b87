//! Engine configuration
//!
//! Defaults are tuned for browser-style media elements. Hosts can override
//! them from a TOML file and `CONCERT_*` environment variables.

use crate::error::{PlaybackError, Result};
use crate::types::{LoadErrorPolicy, RepeatMode, ShuffleMode, VolumeCurve};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial volume (0-100, default: 80)
    pub volume: f32,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Shuffle algorithm used by `enable_shuffle` (default: Random)
    pub shuffle: ShuffleMode,

    /// Maximum history size (default: 200)
    pub history_size: usize,

    /// Remaining time below which the next track is started early (default: 0.3 s)
    pub gapless_threshold_secs: f64,

    /// Position from which "previous" restarts the current track (default: 3 s)
    pub restart_threshold_secs: f64,

    /// Reaction to a track that fails to load (default: Skip)
    pub load_error_policy: LoadErrorPolicy,

    /// Volume to gain mapping (default: Linear)
    pub volume_curve: VolumeCurve,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            volume: 80.0,
            repeat: RepeatMode::Off,
            shuffle: ShuffleMode::Random,
            history_size: 200,
            gapless_threshold_secs: 0.3,
            restart_threshold_secs: 3.0,
            load_error_policy: LoadErrorPolicy::Skip,
            volume_curve: VolumeCurve::Linear,
        }
    }
}

impl EngineConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables are prefixed with `CONCERT_`, e.g.
    /// `CONCERT_GAPLESS_THRESHOLD_SECS=0.5`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(config::Environment::with_prefix("CONCERT").try_parsing(true));

        let config: Self = settings
            .build()
            .map_err(|e| PlaybackError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlaybackError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.volume.is_finite() || !(0.0..=100.0).contains(&self.volume) {
            return Err(PlaybackError::Config(format!(
                "volume must be within 0-100, got {}",
                self.volume
            )));
        }

        if !self.gapless_threshold_secs.is_finite() || self.gapless_threshold_secs < 0.0 {
            return Err(PlaybackError::Config(format!(
                "gapless_threshold_secs must be >= 0, got {}",
                self.gapless_threshold_secs
            )));
        }

        if !self.restart_threshold_secs.is_finite() || self.restart_threshold_secs < 0.0 {
            return Err(PlaybackError::Config(format!(
                "restart_threshold_secs must be >= 0, got {}",
                self.restart_threshold_secs
            )));
        }

        if self.history_size == 0 {
            return Err(PlaybackError::Config(
                "history_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.volume, 80.0);
        assert_eq!(config.repeat, RepeatMode::Off);
        assert_eq!(config.history_size, 200);
        assert_eq!(config.gapless_threshold_secs, 0.3);
        assert_eq!(config.restart_threshold_secs, 3.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
volume = 55.0
repeat = "full"
gapless_threshold_secs = 0.5
load_error_policy = "halt"
"#
        )
        .unwrap();

        let config = EngineConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.volume, 55.0);
        assert_eq!(config.repeat, RepeatMode::Full);
        assert_eq!(config.gapless_threshold_secs, 0.5);
        assert_eq!(config.load_error_policy, LoadErrorPolicy::Halt);
        // Untouched keys keep their defaults
        assert_eq!(config.restart_threshold_secs, 3.0);
        assert_eq!(config.volume_curve, VolumeCurve::Linear);
    }

    #[test]
    fn load_rejects_invalid_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "gapless_threshold_secs = -1.0").unwrap();

        let err = EngineConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, PlaybackError::Config(_)));
    }

    #[test]
    fn validate_volume_range() {
        let config = EngineConfig {
            volume: 140.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_history_size() {
        let config = EngineConfig {
            history_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
