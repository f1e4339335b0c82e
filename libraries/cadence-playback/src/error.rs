//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// Catalog returned an error or no tracks; the screen cannot initialize
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// The audio service has no resource for this reference
    #[error("Audio resource not found: {0}")]
    ResourceNotFound(String),

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Invalid seek position
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Viewport too narrow for the configured padding
    #[error("Invalid carousel geometry: {0}")]
    InvalidGeometry(String),

    /// Screen configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
