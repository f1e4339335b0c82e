//! In-memory catalog provider

use crate::error::Result;
use crate::traits::CatalogProvider;
use crate::types::Track;
use async_trait::async_trait;
use tracing::debug;

/// Catalog backed by a fixed list of tracks held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tracks: Vec<Track>,
}

impl StaticCatalog {
    /// Create a catalog serving `tracks` in the given order
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// The three-track playlist shipped with the player screen
    pub fn bundled() -> Self {
        Self::new(vec![
            Track::new(
                "We Wish You a Merry Christmas",
                "Jim Brickman",
                "christmas",
                "Jim_Brickman_We_Wish_You_A_Merry_Christmas",
            ),
            Track::new(
                "Wake Up Alone",
                "Amy Winehouse",
                "amy",
                "Amy_Winehouse_Wake_Up_Alone",
            ),
            Track::new(
                "What's the Difference",
                "Dr Dre",
                "dr",
                "Dr_Dre_What_s_The_Difference",
            ),
        ])
    }

    /// Number of tracks served
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the catalog serves no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn tracks(&self) -> Result<Vec<Track>> {
        debug!("Serving {} tracks from static catalog", self.tracks.len());
        Ok(self.tracks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_order() {
        let catalog = StaticCatalog::bundled();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.tracks[0].artist, "Jim Brickman");
        assert_eq!(catalog.tracks[2].audio_ref, "Dr_Dre_What_s_The_Difference");
    }
}
