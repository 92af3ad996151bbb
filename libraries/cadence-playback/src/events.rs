//! Playback Events
//!
//! The engine never calls into its observers. Every transition queues
//! events instead, and the UI / output adapter drains them:
//! - Song changes (new current song, or none)
//! - Play/pause state changes
//! - Queue and playlist content changes
//! - Shuffle, repeat and volume setting changes
//! - Seeks and end of playback

use crate::types::{PlaybackSource, RepeatMode};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Current song changed
    SongChanged {
        /// ID of the new current song (`None` when playback was cleared)
        song_id: Option<String>,
        /// ID of the previous song (if any)
        previous_song_id: Option<String>,
        /// Source the new song plays from
        source: Option<PlaybackSource>,
    },

    /// Current song restarted from the beginning (repeat one, scrub back)
    SongRestarted {
        /// ID of the restarted song
        song_id: String,
    },

    /// Playing flag changed
    StateChanged {
        /// Whether audio should be playing
        is_playing: bool,
    },

    /// Queue changed (songs added/removed/reordered/shuffled)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Original playlist replaced or reordered
    PlaylistChanged {
        /// New playlist length
        length: usize,
    },

    /// Shuffle toggled on one of the sources
    ShuffleChanged {
        /// The source that was (un)shuffled
        source: PlaybackSource,
        /// Whether that source is now shuffled
        enabled: bool,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// New repeat mode
        mode: RepeatMode,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        level: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Position set explicitly by a seek
    Seeked {
        /// New position in milliseconds
        position_ms: u64,
    },

    /// Nothing left to play; the last song stays current but stopped
    PlaybackEnded,
}
