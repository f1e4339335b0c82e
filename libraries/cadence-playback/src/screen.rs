//! Player screen
//!
//! Composes the state machine, the carousel reconciler and the playback
//! clock behind one intent-in, snapshot-out surface. The screen is the single
//! owner of all playback state; intents and clock ticks must reach it
//! serially (see [`crate::driver`]).

use crate::{
    carousel::{CarouselReconciler, CarouselSource, ScrollCommand, SettleOutcome},
    clock::{ClockTick, PlaybackClock, ProgressTracker},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    machine::PlaybackStateMachine,
    service::AudioService,
    types::{PlaybackState, ScreenConfig},
};
use cadence_core::{CatalogProvider, Playlist, Track};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Intents sent by the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// Play/pause button
    Toggle,
    /// Forward button
    SkipForward,
    /// Backward button
    SkipBackward,
    /// Finger went down on the carousel
    DragBegin {
        /// Content offset at touch down
        offset_x: f64,
    },
    /// Finger lifted
    DragEnd {
        /// Content offset at release
        offset_x: f64,
        /// Release velocity
        velocity_x: f64,
    },
    /// Carousel scroll animation finished
    DragSettle {
        /// Resting content offset
        offset_x: f64,
    },
    /// Viewport width changed
    Resize {
        /// New viewport width
        viewport_width: f64,
    },
    /// Progress slider moved
    Seek {
        /// Target position
        seconds: f64,
    },
}

/// Everything the view needs to render one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Index of the loaded track
    pub current_index: usize,
    /// Play/pause flag
    pub is_playing: bool,
    /// Title of the loaded track
    pub title: String,
    /// Artist of the loaded track
    pub artist: String,
    /// Cover of the loaded track
    pub cover_ref: String,
    /// Elapsed time label
    pub position_label: String,
    /// Total time label
    pub duration_label: String,
    /// Progress slider value
    pub slider_value: f64,
    /// Progress slider maximum
    pub slider_max: f64,
    /// Carousel movement requested since the last snapshot
    pub scroll: Option<ScrollCommand>,
    /// Message of the last failed intent, cleared by the next successful one
    pub error: Option<String>,
}

/// The playback core of one player screen
pub struct PlayerScreen<S: AudioService> {
    machine: PlaybackStateMachine<S>,
    carousel: CarouselReconciler,
    progress: ProgressTracker,
    clock: PlaybackClock,
    scroll: Option<ScrollCommand>,
    last_error: Option<String>,
}

impl<S: AudioService> PlayerScreen<S> {
    /// Fetch the catalog and set the screen up
    ///
    /// Returns the screen together with the receiver its clock ticks arrive
    /// on. Catalog failures and empty catalogs yield `CatalogUnavailable`.
    pub async fn initialize<P>(
        provider: &P,
        service: S,
        config: ScreenConfig,
    ) -> Result<(Self, mpsc::Receiver<ClockTick>)>
    where
        P: CatalogProvider + ?Sized,
    {
        let tracks = provider.tracks().await.map_err(|e| {
            error!("Catalog provider failed: {}", e);
            PlaybackError::CatalogUnavailable(e.to_string())
        })?;
        let playlist = Playlist::new(tracks).map_err(|e| {
            error!("Catalog unusable: {}", e);
            PlaybackError::CatalogUnavailable(e.to_string())
        })?;
        Self::with_playlist(playlist, service, config)
    }

    /// Set the screen up over an already loaded playlist
    ///
    /// Loads the first track, schedules the clock and, with `autoplay`,
    /// toggles playback on.
    pub fn with_playlist(
        playlist: Playlist,
        service: S,
        config: ScreenConfig,
    ) -> Result<(Self, mpsc::Receiver<ClockTick>)> {
        config.validate()?;

        let carousel = CarouselReconciler::new(&config)?;
        let (clock, ticks) = PlaybackClock::new(config.sample_interval());
        let mut screen = Self {
            machine: PlaybackStateMachine::new(playlist, service),
            carousel,
            progress: ProgressTracker::new(),
            clock,
            scroll: None,
            last_error: None,
        };

        screen.machine.load_track(0)?;
        screen.rebind_clock();
        if config.autoplay {
            screen.machine.toggle_playback();
        }
        info!(
            "Player screen ready with {} tracks",
            screen.machine.playlist().len()
        );
        Ok((screen, ticks))
    }

    /// Apply one intent from the view
    ///
    /// Errors are also kept for the next [`view_state`](Self::view_state).
    pub fn handle(&mut self, intent: Intent) -> Result<()> {
        let result = self.dispatch(intent);
        match &result {
            Ok(()) => self.last_error = None,
            Err(e) => self.last_error = Some(e.to_string()),
        }
        result
    }

    fn dispatch(&mut self, intent: Intent) -> Result<()> {
        let item_count = self.machine.playlist().len();
        match intent {
            Intent::Toggle => {
                self.machine.toggle_playback();
                Ok(())
            }
            Intent::SkipForward => self.navigate(Navigation::Forward),
            Intent::SkipBackward => self.navigate(Navigation::Backward),
            Intent::DragBegin { offset_x } => {
                self.carousel.drag_begin(offset_x, item_count);
                Ok(())
            }
            Intent::DragEnd {
                offset_x,
                velocity_x,
            } => {
                let command = self.carousel.drag_end(offset_x, velocity_x, item_count);
                self.scroll = Some(command);
                Ok(())
            }
            Intent::DragSettle { offset_x } => match self.carousel.drag_settle(offset_x, item_count) {
                SettleOutcome::Switch(index) => self.navigate(Navigation::To(index)),
                SettleOutcome::BoundaryBounce(_) | SettleOutcome::Ignored => Ok(()),
            },
            Intent::Resize { viewport_width } => self.carousel.set_viewport_width(viewport_width),
            Intent::Seek { seconds } => {
                self.machine.seek_to(seconds)?;
                self.sample();
                Ok(())
            }
        }
    }

    /// Handle a tick from the clock
    ///
    /// Stale ticks from a cancelled schedule are dropped. Returns true when
    /// the display changed.
    pub fn on_tick(&mut self, tick: ClockTick) -> bool {
        if !self.clock.accepts(tick) {
            return false;
        }
        self.sample()
    }

    /// Read the audio service clock into the display fields
    ///
    /// Returns true when the display changed.
    pub fn sample(&mut self) -> bool {
        let mut changed = false;
        if self.progress.needs_duration() {
            changed |= self.progress.refresh_duration(self.machine.current_duration());
        }
        changed |= self.progress.sample(self.machine.current_position());
        changed
    }

    /// Snapshot for the view, leaving any pending scroll command in place
    pub fn view_state(&self) -> ViewState {
        let track = self.machine.current_track();
        ViewState {
            current_index: self.machine.current_index(),
            is_playing: self.machine.is_playing(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            cover_ref: track.cover_ref.clone(),
            position_label: self.progress.position_label().to_string(),
            duration_label: self.progress.duration_label().to_string(),
            slider_value: self.progress.slider_value(),
            slider_max: self.progress.slider_max(),
            scroll: self.scroll.clone(),
            error: self.last_error.clone(),
        }
    }

    /// Snapshot for the view, handing over the pending scroll command
    pub fn take_view_state(&mut self) -> ViewState {
        let state = self.view_state();
        self.scroll = None;
        state
    }

    /// Take all playback events queued since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.machine.drain_events()
    }

    /// Current transport state
    pub fn state(&self) -> PlaybackState {
        self.machine.state()
    }

    /// The state machine
    pub fn machine(&self) -> &PlaybackStateMachine<S> {
        &self.machine
    }

    /// The carousel reconciler
    pub fn carousel(&self) -> &CarouselReconciler {
        &self.carousel
    }

    /// The playback clock
    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// Dismiss the screen, cancelling the clock and returning the service
    pub fn teardown(mut self) -> S {
        self.clock.cancel();
        info!("Player screen torn down");
        self.machine.into_service()
    }

    fn navigate(&mut self, navigation: Navigation) -> Result<()> {
        // The sampler must not read the service while the resource is swapped
        self.clock.cancel();
        let result = match navigation {
            Navigation::Forward => self.machine.skip_forward(),
            Navigation::Backward => self.machine.skip_backward(),
            Navigation::To(index) => self.machine.switch_to(index),
        };

        let index = match result {
            Ok(index) => {
                self.rebind_clock();
                index
            }
            Err(e) => {
                warn!("Navigation to {:?} failed: {}", navigation, e);
                // Previous track is still loaded; keep sampling it
                self.clock.schedule();
                self.scroll = Some(ScrollCommand::CenterOn {
                    index: self.machine.current_index(),
                });
                return Err(e);
            }
        };

        if !matches!(navigation, Navigation::To(_)) {
            self.scroll = Some(ScrollCommand::CenterOn { index });
        }
        Ok(())
    }

    fn rebind_clock(&mut self) {
        self.progress.rebind(self.machine.current_duration());
        self.clock.schedule();
    }
}

impl<S: AudioService> CarouselSource for PlayerScreen<S> {
    fn item_count(&self) -> usize {
        self.machine.playlist().item_count()
    }

    fn item_at(&self, index: usize) -> Option<&Track> {
        self.machine.playlist().item_at(index)
    }
}

#[derive(Debug, Clone, Copy)]
enum Navigation {
    Forward,
    Backward,
    To(usize),
}
