//! Screen driver
//!
//! Runs a [`PlayerScreen`] on a tokio task. Intents from the view and ticks
//! from the playback clock are delivered to the screen one at a time, so the
//! screen never needs a lock. Every change is published as a [`ViewState`]
//! on a watch channel; scroll commands and playback events are also queued
//! on their own channels so none are lost between snapshots.

use crate::{
    carousel::ScrollCommand,
    clock::ClockTick,
    error::Result,
    events::PlaybackEvent,
    screen::{Intent, PlayerScreen, ViewState},
    service::AudioService,
};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

const INTENT_BUFFER: usize = 32;

/// Outcome of one intent, as seen right after the screen handled it
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    /// What `PlayerScreen::handle` returned
    pub result: Result<()>,
    /// View state published for this intent
    pub view: ViewState,
}

struct Request {
    intent: Intent,
    reply: Option<oneshot::Sender<Applied>>,
}

/// Host side of a running screen
pub struct ScreenHandle<S> {
    intents: mpsc::Sender<Request>,
    views: watch::Receiver<ViewState>,
    scrolls: mpsc::UnboundedReceiver<ScrollCommand>,
    events: mpsc::UnboundedReceiver<PlaybackEvent>,
    task: JoinHandle<S>,
}

/// Move `screen` onto its own task
///
/// `ticks` is the receiver returned alongside the screen by
/// [`PlayerScreen::initialize`]. The task runs until every intent sender is
/// dropped, then tears the screen down and hands back the audio service.
pub fn spawn_screen<S>(mut screen: PlayerScreen<S>, ticks: mpsc::Receiver<ClockTick>) -> ScreenHandle<S>
where
    S: AudioService + 'static,
{
    let (intent_tx, intent_rx) = mpsc::channel(INTENT_BUFFER);
    let (scroll_tx, scroll_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let initial = screen.take_view_state();
    let (view_tx, view_rx) = watch::channel(initial);
    for event in screen.drain_events() {
        let _ = event_tx.send(event);
    }

    let outputs = Outputs {
        views: view_tx,
        scrolls: scroll_tx,
        events: event_tx,
    };
    let task = tokio::spawn(run_screen(screen, intent_rx, ticks, outputs));

    ScreenHandle {
        intents: intent_tx,
        views: view_rx,
        scrolls: scroll_rx,
        events: event_rx,
        task,
    }
}

impl<S> ScreenHandle<S> {
    /// Queue an intent without waiting for it
    ///
    /// Returns false when the screen task is gone.
    pub async fn send(&self, intent: Intent) -> bool {
        self.intents
            .send(Request {
                intent,
                reply: None,
            })
            .await
            .is_ok()
    }

    /// Queue an intent and wait until the screen has handled it
    ///
    /// Returns `None` when the screen task is gone.
    pub async fn apply(&self, intent: Intent) -> Option<Applied> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.intents
            .send(Request {
                intent,
                reply: Some(reply_tx),
            })
            .await
            .ok()?;
        reply_rx.await.ok()
    }

    /// Watch the published view state
    pub fn views(&self) -> watch::Receiver<ViewState> {
        self.views.clone()
    }

    /// Latest published view state
    pub fn latest(&self) -> ViewState {
        self.views.borrow().clone()
    }

    /// Wait for the next scroll command
    pub async fn next_scroll(&mut self) -> Option<ScrollCommand> {
        self.scrolls.recv().await
    }

    /// Take a queued scroll command, if any
    pub fn try_next_scroll(&mut self) -> Option<ScrollCommand> {
        self.scrolls.try_recv().ok()
    }

    /// Take a queued playback event, if any
    pub fn try_next_event(&mut self) -> Option<PlaybackEvent> {
        self.events.try_recv().ok()
    }

    /// Dismiss the screen and wait for the audio service
    ///
    /// Returns `None` if the screen task panicked.
    pub async fn close(self) -> Option<S> {
        let Self { intents, task, .. } = self;
        drop(intents);
        match task.await {
            Ok(service) => Some(service),
            Err(e) => {
                error!("Screen task ended abnormally: {}", e);
                None
            }
        }
    }
}

struct Outputs {
    views: watch::Sender<ViewState>,
    scrolls: mpsc::UnboundedSender<ScrollCommand>,
    events: mpsc::UnboundedSender<PlaybackEvent>,
}

impl Outputs {
    fn publish<S: AudioService>(&self, screen: &mut PlayerScreen<S>) -> ViewState {
        for event in screen.drain_events() {
            let _ = self.events.send(event);
        }
        let view = screen.take_view_state();
        if let Some(scroll) = &view.scroll {
            let _ = self.scrolls.send(scroll.clone());
        }
        self.views.send_replace(view.clone());
        view
    }
}

async fn run_screen<S: AudioService>(
    mut screen: PlayerScreen<S>,
    mut intents: mpsc::Receiver<Request>,
    mut ticks: mpsc::Receiver<ClockTick>,
    outputs: Outputs,
) -> S {
    info!("Screen driver started");

    loop {
        tokio::select! {
            request = intents.recv() => {
                let Some(Request { intent, reply }) = request else {
                    break;
                };
                debug!("Intent: {:?}", intent);
                let result = screen.handle(intent);
                if let Err(e) = &result {
                    debug!("Intent rejected: {}", e);
                }
                let view = outputs.publish(&mut screen);
                if let Some(reply) = reply {
                    // The requester may have given up waiting
                    let _ = reply.send(Applied { result, view });
                }
            }
            Some(tick) = ticks.recv() => {
                if screen.on_tick(tick) {
                    outputs.publish(&mut screen);
                }
            }
        }
    }

    info!("Screen driver stopped");
    screen.teardown()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::RecordingAudioService;
    use crate::types::ScreenConfig;
    use cadence_core::{Playlist, Track};

    fn spawn() -> ScreenHandle<RecordingAudioService> {
        let playlist = Playlist::new(vec![
            Track::new("One", "A", "c1", "a1"),
            Track::new("Two", "B", "c2", "a2"),
        ])
        .unwrap();
        let (screen, ticks) =
            PlayerScreen::with_playlist(playlist, RecordingAudioService::new(), ScreenConfig::default())
                .unwrap();
        spawn_screen(screen, ticks)
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_view_published() {
        let mut handle = spawn();

        let view = handle.latest();
        assert_eq!(view.current_index, 0);
        assert!(view.is_playing);
        assert!(handle.try_next_event().is_some());

        assert!(handle.close().await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_reports_result_and_view() {
        let handle = spawn();

        let applied = handle.apply(Intent::Seek { seconds: -1.0 }).await.unwrap();
        assert_eq!(applied.result, Ok(()));
        assert_eq!(applied.view.position_label, "0:00");

        let applied = handle
            .apply(Intent::Resize { viewport_width: 10.0 })
            .await
            .unwrap();
        assert!(applied.result.is_err());
        assert!(applied.view.error.is_some());
        assert_eq!(handle.latest(), applied.view);

        handle.close().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_intents_are_applied_in_order() {
        let mut handle = spawn();
        let mut views = handle.views();

        assert!(handle.send(Intent::SkipForward).await);
        views.changed().await.unwrap();
        assert_eq!(views.borrow_and_update().current_index, 1);
        assert_eq!(
            handle.next_scroll().await,
            Some(ScrollCommand::CenterOn { index: 1 })
        );

        assert!(handle.send(Intent::Toggle).await);
        views.changed().await.unwrap();
        assert!(!views.borrow_and_update().is_playing);

        let service = handle.close().await.unwrap();
        assert_eq!(service.loaded.as_deref(), Some("a2"));
    }
}
