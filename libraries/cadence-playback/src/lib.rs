//! Cadence - Playback Management
//!
//! Platform-agnostic playback state engine for Cadence.
//!
//! This crate provides:
//! - Two-source playback (queue pre-empts the original playlist)
//! - Transport controls (play, pause, resume, next, previous, seek)
//! - Queue editing (enqueue, dequeue, reorder, clear)
//! - Reversible per-source shuffle
//! - Repeat modes (None, One, All)
//! - Volume control (0.0-1.0, mute/unmute)
//! - An output driver that keeps a platform audio output in step
//!
//! # Architecture
//!
//! `cadence-playback` performs no I/O:
//! - No audio decoding or rendering
//! - No storage or network access
//! - Every operation is a synchronous state transition
//!
//! Platform-specific code (audio output) is provided via the
//! [`AudioOutput`] trait and driven by [`OutputDriver`].
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use cadence_playback::{PlaybackManager, PlaybackConfig, Song};
//! use std::time::Duration;
//!
//! // Create playback manager
//! let mut manager = PlaybackManager::new(PlaybackConfig::default());
//!
//! let album = vec![
//!     Song::new("1", "Intro", "Artist Name", Duration::from_secs(95), "https://cdn.example/1.mp3"),
//!     Song::new("2", "Single", "Artist Name", Duration::from_secs(210), "https://cdn.example/2.mp3"),
//! ];
//!
//! // Play the album from its first song
//! manager.play_song(&album[0], Some(album.clone()));
//!
//! // Queue something to play next
//! let extra = Song::new("9", "Guest", "Someone", Duration::from_secs(180), "https://cdn.example/9.mp3");
//! manager.add_to_queue(extra);
//!
//! manager.next_song();
//! assert_eq!(manager.current_song().unwrap().id, "9");
//! assert!(manager.is_playing_from_queue());
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use cadence_playback::{PlaybackManager, RepeatMode};
//!
//! let mut manager = PlaybackManager::default();
//!
//! // Shuffle whichever source is playing
//! manager.toggle_shuffle();
//!
//! // Enable repeat all
//! manager.set_repeat(RepeatMode::All);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use cadence_playback::{AudioOutput, OutputDriver, PlaybackManager, Result};
//! use std::time::Duration;
//!
//! // Implement AudioOutput for your platform
//! struct MyAudioElement {
//!     // ... platform-specific handle
//! }
//!
//! impl AudioOutput for MyAudioElement {
//!     fn load(&mut self, audio_url: &str, generation: u64) -> Result<()> {
//!         // Start fetching; report back with `generation`
//!         Ok(())
//!     }
//!
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn pause(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn seek(&mut self, position: Duration) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn set_volume(&mut self, level: f32) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut manager = PlaybackManager::default();
//! let mut driver = OutputDriver::new(MyAudioElement { /* ... */ });
//!
//! // After every engine transition
//! driver.sync(&manager).ok();
//!
//! // From the platform's "ended" callback
//! let generation = driver.generation();
//! if driver.on_ended(&mut manager, generation) {
//!     driver.sync(&manager).ok();
//! }
//! ```

mod adapter;
mod error;
mod events;
mod manager;
mod shuffle;
mod time;
mod tracklist;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use adapter::{AudioOutput, OutputDriver};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use manager::PlaybackManager;
pub use time::format_time;
pub use types::{PlaybackConfig, PlaybackSource, PlayerSnapshot, RepeatMode, Song};
