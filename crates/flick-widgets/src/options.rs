//! Construction options for switches, loadable from TOML.

use flick_core::{Axis, Easing, GestureConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Who owns the committed value after a settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitMode {
    /// The host writes the value back through `sync_external_checked`.
    #[default]
    Controlled,
    /// The switch commits its own settle results before notifying.
    Uncontrolled,
}

/// Errors raised while loading [`SwitchOptions`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file is not valid TOML for these options.
    #[error("invalid switch config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Velocity threshold is negative or not finite.
    #[error("velocity threshold must be a finite non-negative number, got {0}")]
    InvalidVelocityThreshold(f32),
}

/// Tunables for a switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwitchOptions {
    /// Whether the switch reacts to input at all
    pub enabled: bool,
    /// Whether the thumb follows drags and clicks animate
    pub interactive: bool,
    /// Ownership of the committed value
    pub commit: CommitMode,
    /// Drag axis
    pub orientation: Axis,
    /// Release speed (units/s) above which the fling direction decides
    pub velocity_threshold: f32,
    /// Length of every settle animation
    pub settle_duration_ms: u64,
    /// Settle curve
    pub easing: Easing,
    /// Busy period after a notification; 0 disables it
    pub debounce_ms: u64,
    /// Longest press that still counts as a click
    pub tap_timeout_ms: u64,
}

impl Default for SwitchOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            interactive: false,
            commit: CommitMode::Controlled,
            orientation: Axis::Horizontal,
            velocity_threshold: 1000.0,
            settle_duration_ms: 150,
            easing: Easing::FastOutSlowIn,
            debounce_ms: 500,
            tap_timeout_ms: 200,
        }
    }
}

impl SwitchOptions {
    /// Set whether the switch is enabled.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set interactive (draggable) mode.
    #[must_use]
    pub const fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Set the commit mode.
    #[must_use]
    pub const fn commit(mut self, commit: CommitMode) -> Self {
        self.commit = commit;
        self
    }

    /// Set the drag axis.
    #[must_use]
    pub const fn orientation(mut self, orientation: Axis) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the fling velocity threshold.
    #[must_use]
    pub const fn velocity_threshold(mut self, threshold: f32) -> Self {
        self.velocity_threshold = threshold;
        self
    }

    /// Set the debounce delay.
    #[must_use]
    pub const fn debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Settle animation duration.
    #[must_use]
    pub const fn settle_duration(&self) -> Duration {
        Duration::from_millis(self.settle_duration_ms)
    }

    /// Post-notification debounce.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Gesture recognizer configuration.
    #[must_use]
    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            tap_timeout: Duration::from_millis(self.tap_timeout_ms),
            ..GestureConfig::default()
        }
    }

    /// Check the options for values the state machine cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVelocityThreshold`] for a negative or
    /// non-finite threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.velocity_threshold.is_finite() || self.velocity_threshold < 0.0 {
            return Err(ConfigError::InvalidVelocityThreshold(
                self.velocity_threshold,
            ));
        }
        Ok(())
    }

    /// Parse options from a TOML document. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or fails validation.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(contents)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let options = Self::from_toml_str(&contents)?;
        log::debug!("loaded switch options from {}", path.display());
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SwitchOptions::default();
        assert!(options.enabled);
        assert!(!options.interactive);
        assert_eq!(options.commit, CommitMode::Controlled);
        assert_eq!(options.orientation, Axis::Horizontal);
        assert_eq!(options.velocity_threshold, 1000.0);
        assert_eq!(options.settle_duration(), Duration::from_millis(150));
        assert_eq!(options.debounce(), Duration::from_millis(500));
        assert_eq!(
            options.gesture_config().tap_timeout,
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let options = SwitchOptions::from_toml_str("").unwrap();
        assert_eq!(options, SwitchOptions::default());
    }

    #[test]
    fn test_full_toml() {
        let options = SwitchOptions::from_toml_str(
            r#"
            enabled = false
            interactive = true
            commit = "uncontrolled"
            orientation = "vertical"
            velocity_threshold = 400.0
            settle_duration_ms = 300
            easing = "linear"
            debounce_ms = 0
            tap_timeout_ms = 180
            "#,
        )
        .unwrap();
        assert!(!options.enabled);
        assert!(options.interactive);
        assert_eq!(options.commit, CommitMode::Uncontrolled);
        assert_eq!(options.orientation, Axis::Vertical);
        assert_eq!(options.velocity_threshold, 400.0);
        assert_eq!(options.easing, Easing::Linear);
        assert!(options.debounce().is_zero());
        assert_eq!(options.tap_timeout_ms, 180);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = SwitchOptions::from_toml_str("bounciness = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = SwitchOptions::from_toml_str("velocity_threshold = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVelocityThreshold(_)));
        assert!(err.to_string().contains("velocity threshold"));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let options = SwitchOptions::default().velocity_threshold(f32::NAN);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SwitchOptions::load(Path::new("/nonexistent/flick.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/flick.toml"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("flick-options-{}.toml", std::process::id()));
        std::fs::write(&path, "interactive = true\n").unwrap();
        let options = SwitchOptions::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(options.interactive);
    }

    #[test]
    fn test_builder_chain() {
        let options = SwitchOptions::default()
            .interactive(true)
            .commit(CommitMode::Uncontrolled)
            .orientation(Axis::Vertical)
            .debounce_ms(0)
            .enabled(false);
        assert!(options.interactive);
        assert!(!options.enabled);
        assert_eq!(options.commit, CommitMode::Uncontrolled);
        assert_eq!(options.debounce_ms, 0);
    }
}
