//! Error types for playback management
//!
//! Transport operations on the engine never fail. Errors only cross the
//! seams where the engine meets the outside world: the audio output,
//! configuration, and the JS boundary.

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Audio output (load, play, seek, ...) failed
    #[error("Audio output error: {0}")]
    Output(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid argument (unknown mode name, unparsable song, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
