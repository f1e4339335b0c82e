/// Track domain type
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// A playable song entry
///
/// Immutable once loaded from the catalog. `cover_ref` and `audio_ref` are
/// opaque references resolved by the view and the audio service respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Cover image reference
    pub cover_ref: String,

    /// Audio resource reference
    pub audio_ref: String,
}

impl Track {
    /// Create a new track
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        cover_ref: impl Into<String>,
        audio_ref: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            cover_ref: cover_ref.into(),
            audio_ref: audio_ref.into(),
        }
    }

    /// Check that the track can be handed to an audio service
    ///
    /// Only the audio reference is mandatory; a missing cover or title is a
    /// display concern.
    pub fn validate(&self) -> Result<()> {
        if self.audio_ref.trim().is_empty() {
            return Err(CoreError::invalid_track(format!(
                "'{}' has no audio reference",
                self.title
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_creation() {
        let track = Track::new("Wake Up Alone", "Amy Winehouse", "amy", "Amy_Winehouse_Wake_Up_Alone");

        assert_eq!(track.title, "Wake Up Alone");
        assert_eq!(track.artist, "Amy Winehouse");
        assert_eq!(track.cover_ref, "amy");
        assert!(track.validate().is_ok());
    }

    #[test]
    fn test_blank_audio_ref_is_invalid() {
        let track = Track::new("Silence", "Nobody", "cover", "   ");

        assert!(matches!(track.validate(), Err(CoreError::InvalidTrack(_))));
    }
}
