//! Playback clock
//!
//! Two halves:
//! - [`ProgressTracker`] turns position/duration readings into slider values
//!   and `m:ss` labels. Pure, no timers.
//! - [`PlaybackClock`] is the periodic sampler. It only emits [`ClockTick`]s;
//!   whoever owns the audio service reads it when a tick arrives, so the
//!   sampler never touches playback state.

use crate::timing::{format_whole_seconds, Timing};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Display fields derived from the audio service clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressTracker {
    position_label: String,
    duration_label: String,
    slider_value: f64,
    slider_max: f64,
    duration: Option<f64>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    /// Create a tracker showing `0:00 / 0:00`
    pub fn new() -> Self {
        Self {
            position_label: format_whole_seconds(0),
            duration_label: format_whole_seconds(0),
            slider_value: 0.0,
            slider_max: 0.0,
            duration: None,
        }
    }

    /// Bind to a freshly loaded track
    ///
    /// Resets the play head and the slider range to zero and takes the new
    /// duration. An unknown duration keeps the previous total label until a
    /// later [`refresh_duration`](Self::refresh_duration) succeeds.
    pub fn rebind(&mut self, duration: Timing) {
        self.slider_value = 0.0;
        self.slider_max = 0.0;
        self.position_label = format_whole_seconds(0);
        self.duration = None;
        self.refresh_duration(duration);
    }

    /// Take the duration if it was not known at load time
    ///
    /// Returns true when the display changed.
    pub fn refresh_duration(&mut self, duration: Timing) -> bool {
        if self.duration.is_some() {
            return false;
        }
        let Some(seconds) = duration.seconds() else {
            return false;
        };
        self.duration = Some(seconds);
        self.slider_max = seconds;
        if let Some(label) = duration.label() {
            self.duration_label = label;
        }
        self.slider_value = self.slider_value.min(seconds);
        true
    }

    /// Apply a position reading
    ///
    /// Unknown or not-loaded readings leave everything as it was. While the
    /// duration is unknown the slider maximum follows the play head. Returns
    /// true when the display changed.
    pub fn sample(&mut self, position: Timing) -> bool {
        let Some(seconds) = position.seconds() else {
            return false;
        };
        let value = match self.duration {
            Some(duration) => seconds.clamp(0.0, duration),
            None => {
                let value = seconds.max(0.0);
                self.slider_max = self.slider_max.max(value);
                value
            }
        };
        let label = position.label().unwrap_or_else(|| self.position_label.clone());

        let changed = value != self.slider_value || label != self.position_label;
        self.slider_value = value;
        self.position_label = label;
        changed
    }

    /// Whether the duration of the bound track is still unknown
    pub fn needs_duration(&self) -> bool {
        self.duration.is_none()
    }

    /// Elapsed time label
    pub fn position_label(&self) -> &str {
        &self.position_label
    }

    /// Total time label
    pub fn duration_label(&self) -> &str {
        &self.duration_label
    }

    /// Slider value in `[0, slider_max]`
    pub fn slider_value(&self) -> f64 {
        self.slider_value
    }

    /// Slider maximum; the known duration, or the furthest play head until then
    pub fn slider_max(&self) -> f64 {
        self.slider_max
    }
}

/// One sampling request from a scheduled clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    /// Schedule that produced this tick
    pub generation: u64,
}

/// Periodic sampler with an explicit schedule/cancel pair
///
/// Each [`schedule`](Self::schedule) cancels the running sampler and starts
/// a new generation. Ticks from older generations may still be sitting in
/// the channel; [`accepts`](Self::accepts) filters them out. Dropping the
/// clock cancels the sampler.
pub struct PlaybackClock {
    interval: Duration,
    generation: u64,
    tick_tx: mpsc::Sender<ClockTick>,
    task: Option<JoinHandle<()>>,
}

impl PlaybackClock {
    /// Create an idle clock and the receiver its ticks arrive on
    pub fn new(interval: Duration) -> (Self, mpsc::Receiver<ClockTick>) {
        // Ticks are idempotent; one pending tick is enough
        let (tick_tx, tick_rx) = mpsc::channel(1);
        (
            Self {
                interval,
                generation: 0,
                tick_tx,
                task: None,
            },
            tick_rx,
        )
    }

    /// Cancel the running sampler (if any) and start a new one
    ///
    /// Must be called from within a tokio runtime; outside one the clock
    /// stays idle and a warning is logged.
    pub fn schedule(&mut self) {
        self.cancel();
        self.generation += 1;

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("No tokio runtime; progress sampler not scheduled");
                return;
            }
        };

        let generation = self.generation;
        let interval = self.interval;
        let tick_tx = self.tick_tx.clone();
        debug!("Scheduling progress sampler generation {} every {:?}", generation, interval);

        self.task = Some(handle.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                match tick_tx.try_send(ClockTick { generation }) {
                    Ok(()) | Err(mpsc::error::TrySendError::Full(_)) => {}
                    Err(mpsc::error::TrySendError::Closed(_)) => break,
                }
            }
        }));
    }

    /// Stop the running sampler
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Cancelling progress sampler generation {}", self.generation);
            task.abort();
        }
    }

    /// Whether a sampler is scheduled
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Whether `tick` came from the currently scheduled sampler
    pub fn accepts(&self, tick: ClockTick) -> bool {
        self.task.is_some() && tick.generation == self.generation
    }

    /// Current schedule generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sampling interval
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for PlaybackClock {
    fn drop(&mut self) {
        self.cancel();
    }
}
