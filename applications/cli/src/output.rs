//! Simulated audio output
//!
//! Stands in for a real audio element: it remembers what it was told,
//! logs it, and advances its position when the session ticks.

use cadence_playback::{format_time, AudioOutput, Result};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct SimulatedOutput {
    loaded: Option<String>,
    generation: u64,
    playing: bool,
    position: Duration,
    level: f32,
}

impl SimulatedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play for `elapsed`, returning the new position (unchanged while paused)
    pub fn advance(&mut self, elapsed: Duration) -> Duration {
        if self.playing && self.loaded.is_some() {
            self.position = self.position.saturating_add(elapsed);
        }
        self.position
    }

    /// End of the loaded song: the output stops by itself, as an audio
    /// element does
    pub fn finish(&mut self) {
        debug!(position = %format_time(self.position.as_secs_f64()), "Output reached end");
        self.playing = false;
    }

    pub fn loaded(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn level(&self) -> f32 {
        self.level
    }
}

impl AudioOutput for SimulatedOutput {
    fn load(&mut self, audio_url: &str, generation: u64) -> Result<()> {
        info!(audio_url, generation, "Loading audio");
        self.loaded = Some(audio_url.to_string());
        self.generation = generation;
        self.playing = false;
        self.position = Duration::ZERO;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        debug!(position = %format_time(self.position.as_secs_f64()), "Output playing");
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        debug!(position = %format_time(self.position.as_secs_f64()), "Output paused");
        self.playing = false;
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        debug!(position = %format_time(position.as_secs_f64()), "Output seek");
        self.position = position;
        Ok(())
    }

    fn set_volume(&mut self, level: f32) -> Result<()> {
        debug!(level, "Output volume");
        self.level = level;
        Ok(())
    }
}
