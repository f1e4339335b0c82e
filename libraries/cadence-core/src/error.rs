/// Core error types for Cadence
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Cadence
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A playlist was built from an empty track list
    #[error("Playlist must contain at least one track")]
    EmptyPlaylist,

    /// Track record is missing a required field
    #[error("Invalid track: {0}")]
    InvalidTrack(String),

    /// The catalog provider could not produce tracks
    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl CoreError {
    /// Create an invalid track error
    pub fn invalid_track(msg: impl Into<String>) -> Self {
        Self::InvalidTrack(msg.into())
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }
}
