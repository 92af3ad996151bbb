//! Core types for playback management

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Song record as supplied by the catalog
///
/// The engine never mutates a song. Identity is the `id` field: two songs
/// with the same id are the same song as far as every list is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Unique song identifier from the catalog
    pub id: String,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name (optional)
    #[serde(default)]
    pub album: Option<String>,

    /// Song duration as recorded in the catalog
    #[serde(with = "duration_secs")]
    pub duration: Duration,

    /// Album art reference (optional)
    #[serde(default)]
    pub art_url: Option<String>,

    /// Playable audio reference handed to the output adapter
    pub audio_url: String,

    /// Genre (optional)
    #[serde(default)]
    pub genre: Option<String>,
}

impl Song {
    /// Create a song with the required fields, leaving the optional ones empty
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: Duration,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album: None,
            duration,
            art_url: None,
            audio_url: audio_url.into(),
            genre: None,
        }
    }
}

/// Which list currently has the engine's attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackSource {
    /// User-requested "play next" songs
    Queue,

    /// The last bulk list chosen for playback (playlist, album, library view)
    Playlist,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the playlist ends
    #[default]
    None,

    /// Loop the current song only
    One,

    /// Wrap around to the start of the playlist
    All,
}

impl RepeatMode {
    /// Next mode in the none -> one -> all cycle used by the repeat button
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::None => RepeatMode::One,
            RepeatMode::One => RepeatMode::All,
            RepeatMode::All => RepeatMode::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RepeatMode::None => "none",
            RepeatMode::One => "one",
            RepeatMode::All => "all",
        }
    }
}

impl std::str::FromStr for RepeatMode {
    type Err = PlaybackError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" | "off" => Ok(RepeatMode::None),
            "one" => Ok(RepeatMode::One),
            "all" => Ok(RepeatMode::All),
            other => Err(PlaybackError::InvalidArgument(format!(
                "invalid repeat mode '{}', use 'none', 'one' or 'all'",
                other
            ))),
        }
    }
}

/// Configuration for playback manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Initial repeat mode (default: None)
    pub repeat: RepeatMode,

    /// How far into a song "previous" restarts it instead of navigating
    /// (default: 3 seconds)
    #[serde(with = "duration_secs")]
    pub restart_threshold: Duration,

    /// Advance to the next song when the output fails to load one
    /// (default: true)
    pub advance_on_load_error: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            repeat: RepeatMode::None,
            restart_threshold: Duration::from_secs(3),
            advance_on_load_error: true,
        }
    }
}

impl PlaybackConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.volume.is_finite() || !(0.0..=1.0).contains(&self.volume) {
            return Err(PlaybackError::InvalidConfig(format!(
                "volume must be within 0.0..=1.0, got {}",
                self.volume
            )));
        }
        Ok(())
    }
}

/// Read-only view of the engine between two transitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub current_song: Option<Song>,
    pub is_playing: bool,
    #[serde(with = "duration_secs")]
    pub current_time: Duration,
    #[serde(with = "duration_secs")]
    pub duration: Duration,
    pub volume: f32,
    pub is_muted: bool,
    pub queue: Vec<Song>,
    pub original_playlist: Vec<Song>,
    pub source: Option<PlaybackSource>,
    pub current_index: Option<usize>,
    pub shuffle: bool,
    pub repeat: RepeatMode,
}

/// Serde helper storing a `Duration` as fractional seconds
pub(crate) mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(format!(
                "duration must be a non-negative number of seconds, got {}",
                secs
            ))
        })
    }
}
