//! Domain types

pub mod playlist;
pub mod track;

pub use playlist::Playlist;
pub use track::Track;
