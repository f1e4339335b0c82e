/// CLI configuration
use crate::error::{CliError, Result};
use cadence_core::{StaticCatalog, Track};
use cadence_playback::ScreenConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub screen: ScreenConfig,

    #[serde(default)]
    pub player: PlayerSettings,

    /// Replaces the bundled playlist when not empty
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Behavior of the simulated audio service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSettings {
    /// Duration reported for references without an entry in `durations`
    #[serde(default = "default_duration_secs")]
    pub default_duration_secs: f64,

    /// Per-reference durations; `nan` reports an unknown duration
    ///
    /// A list of tables rather than a map: the config loader lowercases map
    /// keys, and audio references are case sensitive.
    #[serde(default)]
    pub durations: Vec<TrackDuration>,

    /// References that fail to load
    #[serde(default)]
    pub missing: Vec<String>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            default_duration_secs: default_duration_secs(),
            durations: Vec::new(),
            missing: Vec::new(),
        }
    }
}

/// Duration reported for one audio reference
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrackDuration {
    pub audio_ref: String,
    pub seconds: f64,
}

impl TrackDuration {
    pub fn new(audio_ref: impl Into<String>, seconds: f64) -> Self {
        Self {
            audio_ref: audio_ref.into(),
            seconds,
        }
    }
}

fn default_duration_secs() -> f64 {
    180.0
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `cadence.toml` is read when
    /// present. Environment variables prefixed with `CADENCE_` override the
    /// file, with `__` between nested keys (`CADENCE_SCREEN__AUTOPLAY=false`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.screen
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;

        if !self.player.default_duration_secs.is_finite() || self.player.default_duration_secs <= 0.0 {
            return Err(CliError::Config(
                "player.default_duration_secs must be > 0".to_string(),
            ));
        }
        if let Some(entry) = self
            .player
            .durations
            .iter()
            .find(|entry| entry.seconds.is_finite() && entry.seconds < 0.0)
        {
            return Err(CliError::Config(format!(
                "player.durations entry for {} must not be negative",
                entry.audio_ref
            )));
        }
        Ok(())
    }

    /// Catalog served to the screen
    pub fn catalog(&self) -> StaticCatalog {
        if self.tracks.is_empty() {
            StaticCatalog::bundled()
        } else {
            StaticCatalog::new(self.tracks.clone())
        }
    }
}
