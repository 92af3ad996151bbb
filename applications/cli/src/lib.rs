//! Cadence CLI Library
//!
//! Loads a song catalog and drives the playback engine with scripted
//! transport commands against a simulated audio output.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod session;

// Re-export commonly used types for convenience
pub use catalog::Catalog;
pub use commands::Command;
pub use config::CliConfig;
pub use error::{CliError, Result};
pub use session::Session;
