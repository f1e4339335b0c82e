/// Playlist domain type
use crate::error::{CoreError, Result};
use crate::types::Track;
use serde::{Deserialize, Serialize};

/// Fixed, ordered, non-empty sequence of tracks
///
/// The playlist is owned by the player screen for its whole lifetime and is
/// never edited. Every index handed out by the navigation helpers is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Track>", into = "Vec<Track>")]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a playlist from catalog tracks
    ///
    /// Tracks are not checked individually; an unusable audio reference only
    /// fails when that track is loaded.
    ///
    /// # Errors
    /// Returns `EmptyPlaylist` when `tracks` is empty.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(CoreError::EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    /// Number of tracks (always at least 1)
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always `false`; a playlist cannot be constructed empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in playlist order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Iterate tracks in playlist order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Index of the last track
    pub fn last_index(&self) -> usize {
        self.tracks.len() - 1
    }

    /// Index after `index`, wrapping to the first track
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.len()
    }

    /// Index before `index`, wrapping to the last track
    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.len() - 1) % self.len()
    }

    /// Whether `index` is the first or the last track
    pub fn is_boundary(&self, index: usize) -> bool {
        index == 0 || index == self.last_index()
    }
}

impl TryFrom<Vec<Track>> for Playlist {
    type Error = CoreError;

    fn try_from(tracks: Vec<Track>) -> Result<Self> {
        Self::new(tracks)
    }
}

impl From<Playlist> for Vec<Track> {
    fn from(playlist: Playlist) -> Self {
        playlist.tracks
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track::new(format!("Song {i}"), "Artist", format!("cover{i}"), format!("audio{i}")))
            .collect()
    }

    #[test]
    fn test_empty_playlist_rejected() {
        assert_eq!(Playlist::new(Vec::new()), Err(CoreError::EmptyPlaylist));
    }

    #[test]
    fn test_wraparound_navigation() {
        let playlist = Playlist::new(tracks(3)).unwrap();

        assert_eq!(playlist.next_index(0), 1);
        assert_eq!(playlist.next_index(2), 0);
        assert_eq!(playlist.previous_index(0), 2);
        assert_eq!(playlist.previous_index(1), 0);
    }

    #[test]
    fn test_single_track_navigation_stays_put() {
        let playlist = Playlist::new(tracks(1)).unwrap();

        assert_eq!(playlist.next_index(0), 0);
        assert_eq!(playlist.previous_index(0), 0);
        assert!(playlist.is_boundary(0));
    }

    #[test]
    fn test_boundaries() {
        let playlist = Playlist::new(tracks(5)).unwrap();

        assert!(playlist.is_boundary(0));
        assert!(playlist.is_boundary(4));
        assert!(!playlist.is_boundary(2));
    }

    #[test]
    fn test_track_without_audio_is_accepted() {
        let mut list = tracks(2);
        list[1].audio_ref.clear();

        let playlist = Playlist::new(list).unwrap();
        assert_eq!(playlist.len(), 2);
        assert!(!playlist.is_empty());
        assert!(playlist.get(1).unwrap().validate().is_err());
    }
}
