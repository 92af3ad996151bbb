//! Scripted playback session
//!
//! Owns one engine, the driver that mirrors it onto a simulated output and
//! the catalog commands refer to. Every command is one engine transition
//! followed by a driver sync; events produced by the transition are logged.

use crate::catalog::Catalog;
use crate::commands::Command;
use crate::error::{CliError, Result};
use crate::output::SimulatedOutput;
use cadence_playback::{
    format_time, OutputDriver, PlaybackConfig, PlaybackEvent, PlaybackManager,
};
use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::{debug, info};

pub struct Session {
    engine: PlaybackManager,
    driver: OutputDriver<SimulatedOutput>,
    catalog: Catalog,
}

impl Session {
    pub fn new(config: PlaybackConfig, catalog: Catalog) -> Self {
        Self::with_engine(PlaybackManager::new(config), catalog)
    }

    /// Session around an existing engine (e.g. one with a seeded shuffle)
    pub fn with_engine(engine: PlaybackManager, catalog: Catalog) -> Self {
        Self {
            engine,
            driver: OutputDriver::new(SimulatedOutput::new()),
            catalog,
        }
    }

    pub fn engine(&self) -> &PlaybackManager {
        &self.engine
    }

    pub fn output(&self) -> &SimulatedOutput {
        self.driver.output()
    }

    /// Run commands line by line, writing `status` output to `out`
    ///
    /// Stops at the first line that fails to parse or names an unknown
    /// song or playlist.
    pub fn run_script<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        for (index, line) in input.lines().enumerate() {
            let line_number = index + 1;
            let line = line?;

            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    return Err(CliError::Parse {
                        line: line_number,
                        message,
                    })
                }
            };

            let printed = self.execute(&command).map_err(|e| match e {
                CliError::UnknownSong(_) | CliError::UnknownPlaylist(_) => CliError::Parse {
                    line: line_number,
                    message: e.to_string(),
                },
                other => other,
            })?;

            if let Some(text) = printed {
                writeln!(out, "{}", text)?;
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Apply one command and bring the output in step
    ///
    /// Returns text to print (only `status` produces any).
    pub fn execute(&mut self, command: &Command) -> Result<Option<String>> {
        debug!(?command, "Executing");
        let mut printed = None;

        match command {
            Command::Play { song_id, playlist } => {
                let song = self.catalog.require_song(song_id)?.clone();
                let list = match playlist {
                    Some(name) => Some(self.catalog.playlist(name)?.to_vec()),
                    None => None,
                };
                self.engine.play_song(&song, list);
            }
            Command::Toggle { song_id } => {
                let song = self.catalog.require_song(song_id)?.clone();
                self.engine.handle_play_song(&song, None);
            }
            Command::Pause => self.engine.pause_song(),
            Command::Resume => self.engine.resume_song(),
            Command::Next => self.engine.next_song(),
            Command::Previous => self.engine.previous_song(),
            Command::Seek(position) => self.engine.seek_to(*position),
            Command::Volume(level) => self.engine.set_volume(*level),
            Command::Mute => self.engine.toggle_mute(),
            Command::Enqueue { song_id } => {
                let song = self.catalog.require_song(song_id)?.clone();
                self.engine.add_to_queue(song);
            }
            Command::Dequeue { index } => {
                self.engine.remove_from_queue(*index);
            }
            Command::Clear => self.engine.clear_queue(),
            Command::Move { from, to } => {
                self.engine.reorder_queue(*from, *to);
            }
            Command::Shuffle => self.engine.toggle_shuffle(),
            Command::Repeat(mode) => self.engine.set_repeat(*mode),
            Command::CycleRepeat => {
                self.engine.cycle_repeat();
            }
            Command::Tick(elapsed) => self.tick(*elapsed),
            Command::End => self.finish_song(),
            Command::Status => {
                printed = Some(serde_json::to_string(&self.engine.snapshot())?);
            }
        }

        self.driver.sync(&self.engine)?;
        self.log_events();
        Ok(printed)
    }

    /// Let the output play, reporting progress and end of song
    fn tick(&mut self, elapsed: Duration) {
        let generation = self.driver.generation();
        let position = self.driver.output_mut().advance(elapsed);
        self.driver
            .on_time_update(&mut self.engine, generation, position);

        let finished = self.driver.output().is_playing()
            && self.engine.current_song().is_some()
            && position >= self.engine.duration();
        if finished {
            self.finish_song();
        }
    }

    /// The output reaches the end of its song and reports it
    fn finish_song(&mut self) {
        let generation = self.driver.generation();
        self.driver.output_mut().finish();
        self.driver.on_ended(&mut self.engine, generation);
    }

    fn log_events(&mut self) {
        for event in self.engine.drain_events() {
            match &event {
                PlaybackEvent::SongChanged { song_id: Some(_), .. } => {
                    if let Some(song) = self.engine.current_song() {
                        info!(
                            id = %song.id,
                            title = %song.title,
                            artist = %song.artist,
                            duration = %format_time(song.duration.as_secs_f64()),
                            "Now playing"
                        );
                    }
                }
                PlaybackEvent::PlaybackEnded => info!("Playback ended"),
                _ => debug!(?event, "Playback event"),
            }
        }
    }
}
