//! Core types for playback management

use crate::error::{PlaybackError, Result};
use crate::timing::Timing;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Loaded track is paused (or nothing is loaded yet)
    Paused,

    /// Loaded track is playing
    Playing,
}

impl PlaybackState {
    /// The opposite state
    pub fn toggled(self) -> Self {
        match self {
            Self::Paused => Self::Playing,
            Self::Playing => Self::Paused,
        }
    }

    /// Whether this is `Playing`
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

/// Point-in-time view of the state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Index of the loaded track in the playlist
    pub current_index: usize,

    /// Whether the loaded track is playing
    pub is_playing: bool,

    /// Play head reported by the audio service
    pub position: Timing,

    /// Duration reported by the audio service
    pub duration: Timing,
}

/// Configuration for the player screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Carousel inset on each side of a cover (default: 40)
    pub horizontal_padding: f64,

    /// Release velocity needed to swipe to a neighbor cover (default: 0.5)
    pub swipe_velocity_threshold: f64,

    /// Progress sampling interval in milliseconds (default: 16)
    pub sample_interval_ms: u64,

    /// Duration of the swipe-continuation spring animation (default: 500)
    pub snap_duration_ms: u64,

    /// Damping ratio of the swipe-continuation spring (default: 1.0)
    pub snap_damping: f64,

    /// Start playing the first track once the screen is set up (default: true)
    pub autoplay: bool,

    /// Viewport width assumed until the view reports one (default: 390)
    pub viewport_width: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            horizontal_padding: 40.0,
            swipe_velocity_threshold: 0.5,
            sample_interval_ms: 16,
            snap_duration_ms: 500,
            snap_damping: 1.0,
            autoplay: true,
            viewport_width: 390.0,
        }
    }
}

impl ScreenConfig {
    /// Progress sampling interval
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.horizontal_padding.is_finite() || self.horizontal_padding < 0.0 {
            return Err(PlaybackError::InvalidConfig(
                "horizontal_padding must be a finite, non-negative number".to_string(),
            ));
        }
        if !self.swipe_velocity_threshold.is_finite() || self.swipe_velocity_threshold < 0.0 {
            return Err(PlaybackError::InvalidConfig(
                "swipe_velocity_threshold must be a finite, non-negative number".to_string(),
            ));
        }
        if self.sample_interval_ms == 0 {
            return Err(PlaybackError::InvalidConfig(
                "sample_interval_ms must be >= 1".to_string(),
            ));
        }
        if !self.snap_damping.is_finite() || self.snap_damping <= 0.0 {
            return Err(PlaybackError::InvalidConfig(
                "snap_damping must be > 0".to_string(),
            ));
        }
        let page_width = self.viewport_width - 1.5 * self.horizontal_padding;
        if !page_width.is_finite() || page_width <= 0.0 {
            return Err(PlaybackError::InvalidConfig(format!(
                "viewport_width {} leaves no room for padding {}",
                self.viewport_width, self.horizontal_padding
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ScreenConfig::default();
        assert_eq!(config.horizontal_padding, 40.0);
        assert_eq!(config.swipe_velocity_threshold, 0.5);
        assert_eq!(config.sample_interval(), Duration::from_millis(16));
        assert!(config.autoplay);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_rejected() {
        let config = ScreenConfig {
            sample_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlaybackError::InvalidConfig(_))
        ));
    }

    #[test]
    fn narrow_viewport_rejected() {
        let config = ScreenConfig {
            viewport_width: 60.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: ScreenConfig =
            serde_json::from_str(r#"{"autoplay": false, "horizontal_padding": 20.0}"#).unwrap();
        assert!(!config.autoplay);
        assert_eq!(config.horizontal_padding, 20.0);
        assert_eq!(config.sample_interval_ms, 16);
    }

    #[test]
    fn playback_state_toggle() {
        assert_eq!(PlaybackState::Paused.toggled(), PlaybackState::Playing);
        assert_eq!(PlaybackState::Playing.toggled(), PlaybackState::Paused);
        assert!(PlaybackState::Playing.is_playing());
    }
}
