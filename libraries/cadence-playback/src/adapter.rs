//! Audio output adapter
//!
//! The engine holds no audio. A platform supplies an [`AudioOutput`]
//! (an HTML audio element, a native decoder, a test recorder) and an
//! [`OutputDriver`] keeps it in step with the engine:
//!
//! ```text
//!   PlaybackManager ──sync()──▶ OutputDriver ──load/play/pause/seek──▶ AudioOutput
//!          ▲                        │
//!          └── on_time_update / on_ended / on_load_error (generation-checked)
//! ```
//!
//! Loads are asynchronous on most platforms. Every load gets a new
//! generation number and the output tags its callbacks with it, so
//! callbacks from a song that was skipped before it finished loading are
//! dropped instead of advancing the wrong song.

use crate::error::Result;
use crate::manager::PlaybackManager;
use std::time::Duration;
use tracing::{debug, warn};

/// Platform audio output
///
/// Implementors render one song at a time. `load` may complete
/// asynchronously; progress, end-of-song and failures are reported back
/// through [`OutputDriver`] together with the generation passed to `load`.
pub trait AudioOutput {
    /// Start loading the audio at `audio_url`
    fn load(&mut self, audio_url: &str, generation: u64) -> Result<()>;

    /// Start or resume rendering
    fn play(&mut self) -> Result<()>;

    /// Pause rendering
    fn pause(&mut self) -> Result<()>;

    /// Jump to `position` in the loaded song
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Set output level (0.0-1.0)
    fn set_volume(&mut self, level: f32) -> Result<()>;
}

/// What the driver last told the output
#[derive(Debug, Clone, Default)]
struct AppliedState {
    song_epoch: u64,
    seek_epoch: u64,
    song_id: Option<String>,
    is_playing: bool,
    gain: Option<f32>,
}

/// Keeps an [`AudioOutput`] in step with a [`PlaybackManager`]
pub struct OutputDriver<O: AudioOutput> {
    output: O,

    /// Generation of the most recent load
    generation: u64,

    applied: AppliedState,

    /// Applied song epoch whose end (or failure) has already advanced the engine
    handled_epoch: Option<u64>,
}

impl<O: AudioOutput> OutputDriver<O> {
    /// Wrap a platform output
    pub fn new(output: O) -> Self {
        Self {
            output,
            generation: 0,
            applied: AppliedState::default(),
            handled_epoch: None,
        }
    }

    /// Apply the engine's current state to the output
    ///
    /// Only differences since the last sync are sent: a new song is loaded,
    /// a restarted song is sought back to zero and played again if the
    /// engine is playing, then seek, volume and play/pause follow.
    pub fn sync(&mut self, engine: &PlaybackManager) -> Result<()> {
        if engine.song_epoch() != self.applied.song_epoch {
            self.applied.song_epoch = engine.song_epoch();
            // A (re)start supersedes any seek made before it
            self.applied.seek_epoch = engine.seek_epoch();

            match engine.current_song() {
                Some(song) if self.applied.song_id.as_deref() != Some(song.id.as_str()) => {
                    self.generation += 1;
                    debug!(song_id = %song.id, generation = self.generation, "Loading song");
                    self.applied.song_id = Some(song.id.clone());
                    self.applied.is_playing = false;
                    self.output.load(&song.audio_url, self.generation)?;
                }
                Some(_) => {
                    // An output that reached the end has stopped on its own
                    self.applied.is_playing = false;
                    self.output.seek(engine.current_time())?;
                }
                None => {
                    // Invalidate callbacks from whatever was loaded
                    self.generation += 1;
                    self.applied.song_id = None;
                }
            }
        }

        if engine.seek_epoch() != self.applied.seek_epoch {
            self.applied.seek_epoch = engine.seek_epoch();
            self.output.seek(engine.current_time())?;
        }

        let gain = engine.gain();
        if self.applied.gain != Some(gain) {
            self.output.set_volume(gain)?;
            self.applied.gain = Some(gain);
        }

        let playing = engine.is_playing() && engine.current_song().is_some();
        if playing != self.applied.is_playing {
            if playing {
                self.output.play()?;
            } else {
                self.output.pause()?;
            }
            self.applied.is_playing = playing;
        }

        Ok(())
    }

    /// Periodic progress from the output
    ///
    /// Returns `false` when the callback belongs to an older load.
    pub fn on_time_update(
        &self,
        engine: &mut PlaybackManager,
        generation: u64,
        position: Duration,
    ) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        engine.set_current_time(position);
        true
    }

    /// Duration reported once the output has read the song's metadata
    pub fn on_duration(
        &self,
        engine: &mut PlaybackManager,
        generation: u64,
        duration: Duration,
    ) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        engine.set_duration(duration);
        true
    }

    /// End of song
    ///
    /// Advances the engine at most once per song start; repeated or stale
    /// notifications are ignored. Returns whether the engine was advanced.
    pub fn on_ended(&mut self, engine: &mut PlaybackManager, generation: u64) -> bool {
        if !self.is_current(generation) || !self.claim_epoch() {
            return false;
        }
        engine.next_song();
        true
    }

    /// The output failed to load or decode the current song
    ///
    /// Logged, then either skipped (`advance_on_load_error`) or paused.
    pub fn on_load_error(
        &mut self,
        engine: &mut PlaybackManager,
        generation: u64,
        message: &str,
    ) -> bool {
        if !self.is_current(generation) {
            return false;
        }

        let song_id = engine.current_song().map(|song| song.id.clone());
        warn!(?song_id, generation, error = message, "Audio failed to load");

        if engine.config().advance_on_load_error {
            if !self.claim_epoch() {
                return false;
            }
            engine.next_song();
        } else {
            engine.set_is_playing(false);
        }
        true
    }

    /// Generation of the most recent load
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Borrow the platform output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Mutably borrow the platform output
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Unwrap the platform output
    pub fn into_inner(self) -> O {
        self.output
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation == self.generation {
            true
        } else {
            debug!(
                generation,
                current = self.generation,
                "Dropping callback from a stale load"
            );
            false
        }
    }

    /// Claim the song start the output is currently rendering
    ///
    /// Keyed on the last applied epoch, so a second notification that
    /// arrives before the next `sync` is still recognised as a duplicate.
    fn claim_epoch(&mut self) -> bool {
        let epoch = self.applied.song_epoch;
        if self.handled_epoch == Some(epoch) {
            debug!(epoch, "End of song already handled");
            return false;
        }
        self.handled_epoch = Some(epoch);
        true
    }
}
