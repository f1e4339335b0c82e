//! Cadence - Player Screen Playback Core
//!
//! Platform-agnostic playback logic behind a single music player screen.
//!
//! This crate provides:
//! - Two-state transport (play/pause) over a fixed, wraparound playlist
//! - A progress clock producing slider values and `m:ss` labels
//! - A carousel reconciler mapping cover scroll offsets to track indexes
//! - A screen that composes all three behind intents and view snapshots
//! - A tokio driver delivering intents and clock ticks to the screen
//!
//! # Architecture
//!
//! `cadence-playback` never plays audio itself. The platform media player is
//! reached through the [`AudioService`] trait and the track list through
//! [`cadence_core::CatalogProvider`]. Exactly one owner holds the screen;
//! the clock only emits ticks and never touches playback state.
//!
//! # Example: State Machine
//!
//! ```rust
//! use cadence_core::{Playlist, Track};
//! use cadence_playback::{AudioService, PlaybackStateMachine, Result};
//!
//! struct Silent;
//!
//! impl AudioService for Silent {
//!     fn load(&mut self, _audio_ref: &str) -> Result<()> {
//!         Ok(())
//!     }
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _seconds: f64) {}
//!     fn position_seconds(&self) -> Option<f64> {
//!         Some(0.0)
//!     }
//!     fn duration_seconds(&self) -> Option<f64> {
//!         Some(180.0)
//!     }
//! }
//!
//! let playlist = Playlist::new(vec![
//!     Track::new("One", "Artist", "one-cover", "one"),
//!     Track::new("Two", "Artist", "two-cover", "two"),
//! ])
//! .unwrap();
//!
//! let mut machine = PlaybackStateMachine::new(playlist, Silent);
//! machine.load_track(0).unwrap();
//! machine.skip_backward().unwrap();
//!
//! assert_eq!(machine.current_index(), 1);
//! assert!(machine.is_playing());
//! ```
//!
//! # Example: Running a Screen
//!
//! ```rust,no_run
//! use cadence_core::StaticCatalog;
//! use cadence_playback::{spawn_screen, AudioService, Intent, PlayerScreen, ScreenConfig};
//!
//! # async fn run(service: impl AudioService + 'static) -> cadence_playback::Result<()> {
//! let catalog = StaticCatalog::bundled();
//! let (screen, ticks) =
//!     PlayerScreen::initialize(&catalog, service, ScreenConfig::default()).await?;
//!
//! let handle = spawn_screen(screen, ticks);
//! handle.send(Intent::SkipForward).await;
//! println!("{:?}", handle.latest());
//! handle.close().await;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod carousel;
mod clock;
mod driver;
mod error;
pub mod events;
mod machine;
mod screen;
mod service;
pub mod timing;
pub mod types;

// Public exports
pub use carousel::{CarouselGeometry, CarouselReconciler, CarouselSource, ScrollCommand, SettleOutcome};
pub use clock::{ClockTick, PlaybackClock, ProgressTracker};
pub use driver::{spawn_screen, Applied, ScreenHandle};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use machine::PlaybackStateMachine;
pub use screen::{Intent, PlayerScreen, ViewState};
pub use service::AudioService;
pub use timing::{format_time, Timing};
pub use types::{PlaybackSnapshot, PlaybackState, ScreenConfig};
