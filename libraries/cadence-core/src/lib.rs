//! Cadence Core
//!
//! Platform-agnostic track, playlist and catalog types for the Cadence
//! player screen.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`
//! - **Core Traits**: `CatalogProvider`
//! - **Catalogs**: `StaticCatalog`, an in-memory provider with a bundled playlist
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Playlist, Track};
//!
//! let playlist = Playlist::new(vec![
//!     Track::new("Wake Up Alone", "Amy Winehouse", "amy", "Amy_Winehouse_Wake_Up_Alone"),
//! ])
//! .unwrap();
//!
//! assert_eq!(playlist.len(), 1);
//! assert_eq!(playlist.next_index(0), 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use catalog::StaticCatalog;
pub use error::{CoreError, Result};
pub use traits::CatalogProvider;
pub use types::{Playlist, Track};
