//! Playback Events
//!
//! Event-based communication for hosts that want more than view snapshots.
//! Events are queued by the state machine and drained by the host:
//! - State changes (play/pause)
//! - Track changes (after every successful load)
//! - Errors (rejected loads)

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A track was loaded into the audio service
    ///
    /// Emitted for reloads of the same index too, since the audio service
    /// restarts the track.
    TrackChanged {
        /// Index of the loaded track
        index: usize,
        /// Index of the previously loaded track (if any)
        previous_index: Option<usize>,
    },

    /// A command failed; playback state was left untouched
    Error {
        /// Error message
        message: String,
    },
}
