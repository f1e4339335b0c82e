//! Platform-agnostic audio service trait
//!
//! Abstracts the platform media player (AVPlayer, ExoPlayer, a desktop
//! decoder) that actually decodes and plays audio.

use crate::error::Result;

/// Platform audio service driven by the playback state machine
///
/// The state machine owns exactly one service handle for the lifetime of the
/// screen. Commands are fire-and-forget: the only failure the core reacts to
/// is a missing resource at load time.
pub trait AudioService: Send {
    /// Load the audio resource for `audio_ref`, replacing whatever was loaded
    ///
    /// A freshly loaded resource is paused at position zero.
    ///
    /// # Returns
    /// * `Ok(())` - Resource loaded
    /// * `Err(PlaybackError::ResourceNotFound)` - No resource for this reference;
    ///   the previously loaded resource stays loaded
    fn load(&mut self, audio_ref: &str) -> Result<()>;

    /// Start or resume playback of the loaded resource
    fn play(&mut self);

    /// Pause playback of the loaded resource
    fn pause(&mut self);

    /// Move the play head of the loaded resource
    fn seek(&mut self, seconds: f64);

    /// Current play head in seconds
    ///
    /// `None` when nothing is loaded. May be NaN or infinite while the
    /// resource is opening.
    fn position_seconds(&self) -> Option<f64>;

    /// Total duration in seconds
    ///
    /// `None` when nothing is loaded. May be NaN or infinite when the
    /// duration is not known (yet).
    fn duration_seconds(&self) -> Option<f64>;
}

impl<S: AudioService + ?Sized> AudioService for Box<S> {
    fn load(&mut self, audio_ref: &str) -> Result<()> {
        (**self).load(audio_ref)
    }

    fn play(&mut self) {
        (**self).play();
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn seek(&mut self, seconds: f64) {
        (**self).seek(seconds);
    }

    fn position_seconds(&self) -> Option<f64> {
        (**self).position_seconds()
    }

    fn duration_seconds(&self) -> Option<f64> {
        (**self).duration_seconds()
    }
}

/// Command recorded by [`RecordingAudioService`]
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    Load(String),
    Play,
    Pause,
    Seek(f64),
}

/// Scripted audio service for testing
///
/// Records every command, rejects references listed as missing and reports
/// the durations it was given.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingAudioService {
    pub commands: Vec<AudioCommand>,
    pub missing: Vec<String>,
    pub durations: std::collections::HashMap<String, f64>,
    pub loaded: Option<String>,
    pub position: f64,
}

#[cfg(test)]
impl RecordingAudioService {
    /// Create a service where every reference loads with a 180s duration
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a reference as missing
    pub fn with_missing(mut self, audio_ref: &str) -> Self {
        self.missing.push(audio_ref.to_string());
        self
    }

    /// Report `seconds` as the duration of `audio_ref`
    pub fn with_duration(mut self, audio_ref: &str, seconds: f64) -> Self {
        self.durations.insert(audio_ref.to_string(), seconds);
        self
    }
}

#[cfg(test)]
impl AudioService for RecordingAudioService {
    fn load(&mut self, audio_ref: &str) -> Result<()> {
        if self.missing.iter().any(|m| m == audio_ref) {
            return Err(crate::error::PlaybackError::ResourceNotFound(
                audio_ref.to_string(),
            ));
        }
        self.commands.push(AudioCommand::Load(audio_ref.to_string()));
        self.loaded = Some(audio_ref.to_string());
        self.position = 0.0;
        Ok(())
    }

    fn play(&mut self) {
        self.commands.push(AudioCommand::Play);
    }

    fn pause(&mut self) {
        self.commands.push(AudioCommand::Pause);
    }

    fn seek(&mut self, seconds: f64) {
        self.commands.push(AudioCommand::Seek(seconds));
        self.position = seconds;
    }

    fn position_seconds(&self) -> Option<f64> {
        self.loaded.as_ref().map(|_| self.position)
    }

    fn duration_seconds(&self) -> Option<f64> {
        self.loaded
            .as_ref()
            .map(|r| self.durations.get(r).copied().unwrap_or(180.0))
    }
}
