//! Simulated audio service
//!
//! Stands in for a platform media player. Loads succeed for every reference
//! not marked missing, and the play head advances with the tokio clock
//! while playing.

use crate::config::PlayerSettings;
use cadence_playback::{AudioService, PlaybackError};
use std::collections::{HashMap, HashSet};
use tokio::time::Instant;
use tracing::{debug, info};

struct LoadedResource {
    audio_ref: String,
    duration: f64,
    offset: f64,
    playing_since: Option<Instant>,
}

impl LoadedResource {
    fn position(&self) -> f64 {
        let elapsed = self
            .playing_since
            .map_or(0.0, |since| since.elapsed().as_secs_f64());
        let position = self.offset + elapsed;
        if self.duration.is_finite() {
            position.min(self.duration)
        } else {
            position
        }
    }
}

pub struct SimulatedAudioService {
    default_duration: f64,
    durations: HashMap<String, f64>,
    missing: HashSet<String>,
    loaded: Option<LoadedResource>,
}

impl SimulatedAudioService {
    pub fn new(settings: &PlayerSettings) -> Self {
        Self {
            default_duration: settings.default_duration_secs,
            durations: settings
                .durations
                .iter()
                .map(|entry| (entry.audio_ref.clone(), entry.seconds))
                .collect(),
            missing: settings.missing.iter().cloned().collect(),
            loaded: None,
        }
    }

    /// Reference of the loaded resource
    pub fn loaded(&self) -> Option<&str> {
        self.loaded.as_ref().map(|r| r.audio_ref.as_str())
    }

    /// Whether the loaded resource is playing
    pub fn is_playing(&self) -> bool {
        self.loaded
            .as_ref()
            .is_some_and(|r| r.playing_since.is_some())
    }
}

impl AudioService for SimulatedAudioService {
    fn load(&mut self, audio_ref: &str) -> cadence_playback::Result<()> {
        if self.missing.contains(audio_ref) {
            return Err(PlaybackError::ResourceNotFound(audio_ref.to_string()));
        }

        let duration = self
            .durations
            .get(audio_ref)
            .copied()
            .unwrap_or(self.default_duration);
        info!("Simulated player loaded {} ({:.1}s)", audio_ref, duration);
        self.loaded = Some(LoadedResource {
            audio_ref: audio_ref.to_string(),
            duration,
            offset: 0.0,
            playing_since: None,
        });
        Ok(())
    }

    fn play(&mut self) {
        if let Some(resource) = &mut self.loaded {
            if resource.playing_since.is_none() {
                debug!("Simulated player resumed {}", resource.audio_ref);
                resource.playing_since = Some(Instant::now());
            }
        }
    }

    fn pause(&mut self) {
        if let Some(resource) = &mut self.loaded {
            resource.offset = resource.position();
            resource.playing_since = None;
            debug!("Simulated player paused at {:.1}s", resource.offset);
        }
    }

    fn seek(&mut self, seconds: f64) {
        if let Some(resource) = &mut self.loaded {
            resource.offset = seconds;
            if resource.playing_since.is_some() {
                resource.playing_since = Some(Instant::now());
            }
        }
    }

    fn position_seconds(&self) -> Option<f64> {
        self.loaded.as_ref().map(LoadedResource::position)
    }

    fn duration_seconds(&self) -> Option<f64> {
        self.loaded.as_ref().map(|r| r.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackDuration;
    use std::time::Duration;

    fn service() -> SimulatedAudioService {
        let mut settings = PlayerSettings::default();
        settings.durations.push(TrackDuration::new("short", 10.0));
        settings.missing.push("gone".to_string());
        SimulatedAudioService::new(&settings)
    }

    #[test]
    fn test_nothing_loaded() {
        let service = service();

        assert_eq!(service.position_seconds(), None);
        assert_eq!(service.duration_seconds(), None);
    }

    #[test]
    fn test_missing_reference_keeps_previous_resource() {
        let mut service = service();
        service.load("short").unwrap();

        assert_eq!(
            service.load("gone"),
            Err(PlaybackError::ResourceNotFound("gone".to_string()))
        );
        assert_eq!(service.loaded(), Some("short"));
    }

    #[test]
    fn test_default_duration() {
        let mut service = service();
        service.load("anything").unwrap();

        assert_eq!(service.duration_seconds(), Some(180.0));
        assert!(!service.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_head_follows_clock() {
        let mut service = service();
        service.load("short").unwrap();
        service.play();

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(service.position_seconds(), Some(4.0));

        service.pause();
        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(service.position_seconds(), Some(4.0));

        service.play();
        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(service.position_seconds(), Some(10.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_seek_while_playing() {
        let mut service = service();
        service.load("anything").unwrap();
        service.play();
        service.seek(60.0);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(service.position_seconds(), Some(62.0));
    }
}
