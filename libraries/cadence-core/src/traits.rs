/// Core traits for Cadence
use crate::error::Result;
use crate::types::Track;
use async_trait::async_trait;

/// Source of the ordered track list shown by the player screen
///
/// Implementers may read from memory, disk or a remote service. The screen
/// calls [`CatalogProvider::tracks`] once during initialization and never
/// again for the lifetime of the screen.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch the ordered list of tracks
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be read. An empty list is not an
    /// error here; the screen decides what to do with it.
    async fn tracks(&self) -> Result<Vec<Track>>;
}
