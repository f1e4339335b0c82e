//! Cadence CLI Library
//!
//! Terminal front end for the player screen: configuration loading, a
//! simulated audio service, line commands and view rendering.
//!
//! This library exposes the components for testing purposes.

pub mod command;
pub mod config;
pub mod error;
pub mod render;
pub mod simulated;

// Re-export commonly used types for convenience
pub use command::{parse_line, Command};
pub use config::{CliConfig, PlayerSettings, TrackDuration};
pub use error::{CliError, Result};
pub use simulated::SimulatedAudioService;
