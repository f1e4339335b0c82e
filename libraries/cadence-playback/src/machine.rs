//! Playback state machine
//!
//! Owns the playlist, the current index and the play/pause flag, and turns
//! navigation and transport intents into audio service commands.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    service::AudioService,
    timing::Timing,
    types::{PlaybackSnapshot, PlaybackState},
};
use cadence_core::{Playlist, Track};
use tracing::{debug, info, warn};

/// Two-state transport over a fixed playlist
///
/// Invariants:
/// - `current_index` is always a valid playlist index
/// - after the first successful load, the audio service holds exactly the
///   track at `current_index`
/// - a rejected load changes nothing
pub struct PlaybackStateMachine<S: AudioService> {
    playlist: Playlist,
    service: S,
    current_index: usize,
    loaded_index: Option<usize>,
    state: PlaybackState,
    pending_events: Vec<PlaybackEvent>,
}

impl<S: AudioService> PlaybackStateMachine<S> {
    /// Create a paused state machine positioned on the first track
    ///
    /// Nothing is loaded until [`load_track`](Self::load_track) is called.
    pub fn new(playlist: Playlist, service: S) -> Self {
        Self {
            playlist,
            service,
            current_index: 0,
            loaded_index: None,
            state: PlaybackState::Paused,
            pending_events: Vec::new(),
        }
    }

    // ===== Transport =====

    /// Flip between `Paused` and `Playing`
    ///
    /// Issues exactly one command to the audio service: `play` when the new
    /// state is `Playing`, `pause` otherwise.
    pub fn toggle_playback(&mut self) -> PlaybackState {
        let next = self.state.toggled();
        match next {
            PlaybackState::Playing => self.service.play(),
            PlaybackState::Paused => self.service.pause(),
        }
        self.set_state(next);
        next
    }

    /// Move the play head of the loaded track
    ///
    /// The target is clamped to `[0, duration]` when the duration is known.
    /// NaN and infinite targets are rejected.
    /// Returns the position actually sent to the audio service.
    pub fn seek_to(&mut self, seconds: f64) -> Result<f64> {
        if self.loaded_index.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if !seconds.is_finite() {
            return Err(PlaybackError::InvalidSeekPosition(seconds));
        }

        let mut target = seconds.max(0.0);
        if let Some(duration) = self.current_duration().seconds() {
            target = target.min(duration);
        }

        debug!("Seeking to {:.2}s", target);
        self.service.seek(target);
        Ok(target)
    }

    // ===== Navigation =====

    /// Advance to the next track, wrapping to the first
    ///
    /// Leaves playback `Playing` on the new track. Returns the new index.
    pub fn skip_forward(&mut self) -> Result<usize> {
        let index = self.playlist.next_index(self.current_index);
        self.switch_to(index)
    }

    /// Go back to the previous track, wrapping to the last
    ///
    /// Leaves playback `Playing` on the new track. Returns the new index.
    pub fn skip_backward(&mut self) -> Result<usize> {
        let index = self.playlist.previous_index(self.current_index);
        self.switch_to(index)
    }

    /// Load `index` and force `Playing`
    ///
    /// Shared by skip buttons and carousel settles: the freshly loaded track
    /// starts paused and is then toggled on, so the audio service sees
    /// `load` followed by `play`.
    pub fn switch_to(&mut self, index: usize) -> Result<usize> {
        self.load_track(index)?;
        if !self.state.is_playing() {
            self.toggle_playback();
        }
        Ok(index)
    }

    /// Load the audio resource of `playlist[index]`
    ///
    /// On success the index moves and the track is `Paused` until toggled.
    /// On failure (`ResourceNotFound`, `IndexOutOfBounds`) neither the index
    /// nor the play flag change. A track without an audio reference is never
    /// handed to the service and fails with `ResourceNotFound`.
    pub fn load_track(&mut self, index: usize) -> Result<()> {
        let track = self
            .playlist
            .get(index)
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;
        let audio_ref = track.audio_ref.clone();

        let loaded = track
            .validate()
            .map_err(|_| PlaybackError::ResourceNotFound(audio_ref.clone()))
            .and_then(|()| self.service.load(&audio_ref));
        if let Err(e) = loaded {
            warn!("Failed to load track {} ({}): {}", index, audio_ref, e);
            self.pending_events.push(PlaybackEvent::Error {
                message: e.to_string(),
            });
            return Err(e);
        }

        let previous_index = self.loaded_index;
        self.current_index = index;
        self.loaded_index = Some(index);
        info!("Loaded track {} ({})", index, audio_ref);
        self.pending_events.push(PlaybackEvent::TrackChanged {
            index,
            previous_index,
        });
        self.set_state(PlaybackState::Paused);
        Ok(())
    }

    // ===== State Queries =====

    /// Current play head
    pub fn current_position(&self) -> Timing {
        if self.loaded_index.is_none() {
            return Timing::NotLoaded;
        }
        Timing::from_reading(self.service.position_seconds())
    }

    /// Duration of the loaded track
    pub fn current_duration(&self) -> Timing {
        if self.loaded_index.is_none() {
            return Timing::NotLoaded;
        }
        Timing::from_reading(self.service.duration_seconds())
    }

    /// Index of the current track
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The current track
    pub fn current_track(&self) -> &Track {
        // current_index is only ever set from a successful playlist lookup
        &self.playlist.tracks()[self.current_index]
    }

    /// Current transport state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the loaded track is playing
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Whether any track has been loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded_index.is_some()
    }

    /// The playlist
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// The audio service
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Snapshot of index, play flag and timings
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_index: self.current_index,
            is_playing: self.is_playing(),
            position: self.current_position(),
            duration: self.current_duration(),
        }
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Give the audio service back
    pub fn into_service(self) -> S {
        self.service
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!("Playback state {:?} -> {:?}", self.state, state);
            self.state = state;
            self.pending_events
                .push(PlaybackEvent::StateChanged { state });
        }
    }
}
