//! Playback manager - core orchestration
//!
//! Tracks what is playing, from which source, and what comes next.
//! Every public method is one complete transition of the state below;
//! observers read the result through getters, [`PlaybackManager::snapshot`]
//! or the drained [`PlaybackEvent`]s.

use crate::{
    events::PlaybackEvent,
    tracklist::Tracklist,
    types::{PlaybackConfig, PlaybackSource, PlayerSnapshot, RepeatMode, Song},
    volume::Volume,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info};

/// Central playback state engine
///
/// Two sources feed playback:
/// - Queue: user-added songs, always played before the playlist resumes
/// - Playlist: the last list handed to [`PlaybackManager::play_song`]
///
/// Exactly one source has attention while a song is current. Attention
/// is an explicit field, not derived from list lengths.
pub struct PlaybackManager {
    // State
    current_song: Option<Song>,
    is_playing: bool,
    current_time: Duration,
    duration: Duration,
    source: Option<PlaybackSource>,

    // Sources
    queue: Tracklist,
    playlist: Tracklist,

    // Settings
    volume: Volume,
    repeat: RepeatMode,
    config: PlaybackConfig,

    // Bumped whenever the current song (re)starts from zero
    song_epoch: u64,
    // Bumped on every explicit seek
    seek_epoch: u64,

    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackManager {
    /// Create new playback manager
    pub fn new(config: PlaybackConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a playback manager whose shuffles are reproducible
    pub fn with_seed(config: PlaybackConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PlaybackConfig, rng: StdRng) -> Self {
        Self {
            current_song: None,
            is_playing: false,
            current_time: Duration::ZERO,
            duration: Duration::ZERO,
            source: None,
            queue: Tracklist::new(),
            playlist: Tracklist::new(),
            volume: Volume::new(config.volume),
            repeat: config.repeat,
            config,
            song_epoch: 0,
            seek_epoch: 0,
            rng,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Play `song`, optionally making `list` the new original playlist
    ///
    /// With a list: the list replaces the playlist and playback starts at
    /// the song's index in it. A song missing from the list starts the list
    /// from its first entry; an empty list is ignored. The queue is left
    /// untouched either way.
    ///
    /// Without a list: the song is looked up in the queue, then in the
    /// playlist. A song found in neither becomes a one-song playlist.
    pub fn play_song(&mut self, song: &Song, list: Option<Vec<Song>>) {
        if let Some(list) = list {
            if list.is_empty() {
                debug!(song_id = %song.id, "Ignoring play request with an empty list");
                return;
            }

            let index = list.iter().position(|s| s.id == song.id).unwrap_or_else(|| {
                debug!(song_id = %song.id, "Song not in list, starting from the first entry");
                0
            });

            self.playlist.replace(list, Some(index));
            self.emit_playlist_changed();
            self.play_from(PlaybackSource::Playlist);
            return;
        }

        if let Some(index) = self.queue.position_of(&song.id) {
            self.queue.set_position(Some(index));
            self.play_from(PlaybackSource::Queue);
        } else if let Some(index) = self.playlist.position_of(&song.id) {
            self.playlist.set_position(Some(index));
            self.play_from(PlaybackSource::Playlist);
        } else {
            self.playlist.replace(vec![song.clone()], Some(0));
            self.emit_playlist_changed();
            self.play_from(PlaybackSource::Playlist);
        }
    }

    /// Play/pause toggle used by song lists
    ///
    /// Clicking the song that is already current toggles pause/resume.
    /// Any other song, or any click that carries a list, is handed to
    /// [`PlaybackManager::play_song`] so the list replaces the playlist.
    pub fn handle_play_song(&mut self, song: &Song, list: Option<Vec<Song>>) {
        let is_current = self
            .current_song
            .as_ref()
            .is_some_and(|current| current.id == song.id);

        if list.is_some() || !is_current {
            self.play_song(song, list);
        } else if self.is_playing {
            self.pause_song();
        } else {
            self.resume_song();
        }
    }

    /// Pause playback
    pub fn pause_song(&mut self) {
        self.set_playing(false);
    }

    /// Resume playback
    ///
    /// No-op when nothing is loaded.
    pub fn resume_song(&mut self) {
        if self.current_song.is_none() {
            debug!("Ignoring resume with no current song");
            return;
        }
        self.set_playing(true);
    }

    /// Advance to the next song
    ///
    /// Precedence:
    /// 1. Repeat one restarts the current song.
    /// 2. A non-empty queue wins: advance within it, or interrupt the
    ///    playlist and start it from the top. A queue played through to its
    ///    end is consumed (left empty) and the playlist resumes after its
    ///    last played index.
    /// 3. Otherwise advance the playlist, wrapping only on repeat all.
    ///
    /// Running off the end stops playback and keeps the last song current.
    pub fn next_song(&mut self) {
        if self.current_song.is_none() {
            debug!("Ignoring next with no current song");
            return;
        }

        if self.repeat == RepeatMode::One {
            self.restart_current();
            self.set_playing(true);
            return;
        }

        if !self.queue.is_empty() {
            if self.source == Some(PlaybackSource::Queue) {
                let next = self.queue.position().map_or(0, |index| index + 1);
                if next < self.queue.len() {
                    self.queue.set_position(Some(next));
                    self.play_from(PlaybackSource::Queue);
                } else {
                    self.fall_through_to_playlist();
                }
            } else {
                info!(queued = self.queue.len(), "Queue pre-empts playlist");
                self.queue.set_position(Some(0));
                self.play_from(PlaybackSource::Queue);
            }
            return;
        }

        match self.playlist_next_index() {
            Some(index) => {
                self.playlist.set_position(Some(index));
                self.play_from(PlaybackSource::Playlist);
            }
            None => self.end_playback(),
        }
    }

    /// Go to previous song
    ///
    /// Past the restart threshold (3 seconds by default) the current song
    /// restarts instead. At the top of the list it wraps on repeat all and
    /// restarts otherwise.
    pub fn previous_song(&mut self) {
        if self.current_song.is_none() {
            debug!("Ignoring previous with no current song");
            return;
        }

        if self.current_time > self.config.restart_threshold {
            self.restart_current();
            return;
        }

        let source = self.active_source_or_playlist();
        let list = self.list(source);
        let len = list.len();

        match list.position() {
            Some(index) if index > 0 => {
                self.list_mut(source).set_position(Some(index - 1));
                self.play_from(source);
            }
            Some(_) if self.repeat == RepeatMode::All && len > 1 => {
                self.list_mut(source).set_position(Some(len - 1));
                self.play_from(source);
            }
            _ => self.restart_current(),
        }
    }

    // ===== Seek =====

    /// Seek to position in current song
    pub fn seek_to(&mut self, position: Duration) {
        if self.current_song.is_none() {
            debug!("Ignoring seek with no current song");
            return;
        }

        self.current_time = position;
        self.seek_epoch += 1;
        self.pending_events.push(PlaybackEvent::Seeked {
            position_ms: position.as_millis() as u64,
        });
    }

    // ===== Volume =====

    /// Set volume (clamped to 0.0-1.0)
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.emit_volume_changed();
    }

    /// Get current volume level (0.0-1.0)
    pub fn get_volume(&self) -> f32 {
        self.volume.level()
    }

    /// Effective output level (0.0 while muted)
    pub fn gain(&self) -> f32 {
        self.volume.gain()
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.volume.mute();
        self.emit_volume_changed();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.emit_volume_changed();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.emit_volume_changed();
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    // ===== Queue Management =====

    /// Append a song to the queue
    ///
    /// Duplicates (by id) are rejected. When nothing is playing the song
    /// starts immediately.
    ///
    /// Returns whether the song was added.
    pub fn add_to_queue(&mut self, song: Song) -> bool {
        let song_id = song.id.clone();
        let Some(index) = self.queue.push_unique(song) else {
            debug!(song_id = %song_id, "Song already queued");
            return false;
        };

        self.emit_queue_changed();

        if self.current_song.is_none() {
            self.queue.set_position(Some(index));
            self.play_from(PlaybackSource::Queue);
        }

        true
    }

    /// Remove song from queue by index
    ///
    /// Out-of-range indices are ignored. Removing the song that is playing
    /// moves on to the song now at that index (or the new last one); if the
    /// queue empties, the playlist resumes at its last index.
    pub fn remove_from_queue(&mut self, index: usize) -> Option<Song> {
        let was_current =
            self.is_playing_from_queue() && self.queue.position() == Some(index);

        let Some(removed) = self.queue.remove(index) else {
            debug!(index, len = self.queue.len(), "Queue index out of range");
            return None;
        };

        self.emit_queue_changed();

        if was_current {
            if self.queue.is_empty() {
                self.resume_playlist_or_stop();
            } else {
                self.switch_to(PlaybackSource::Queue);
            }
        }

        Some(removed)
    }

    /// Move queue entry `from` to `to`
    ///
    /// The queue cursor keeps pointing at the same song. Returns `false`
    /// for out-of-range indices.
    pub fn reorder_queue(&mut self, from: usize, to: usize) -> bool {
        if !self.queue.reorder(from, to) {
            debug!(from, to, len = self.queue.len(), "Queue reorder out of range");
            return false;
        }

        if from != to {
            self.emit_queue_changed();
        }
        true
    }

    /// Clear the queue
    ///
    /// If the queue had attention, the playlist resumes at its last index
    /// (or playback stops when there is no playlist).
    pub fn clear_queue(&mut self) {
        let was_attending = self.is_playing_from_queue();

        self.queue.clear();
        self.emit_queue_changed();

        if was_attending {
            self.resume_playlist_or_stop();
        }
    }

    // ===== Shuffle & Repeat =====

    /// Toggle shuffle on whichever source has attention
    ///
    /// Turning shuffle on snapshots the order and shuffles every song but
    /// the current one, which moves to the front. Turning it off restores
    /// the snapshot and finds the current song in it again. Queue and
    /// playlist shuffle independently.
    pub fn toggle_shuffle(&mut self) {
        let source = self.active_source_or_playlist();
        let current_id = self.current_song.as_ref().map(|song| song.id.clone());

        let list = match source {
            PlaybackSource::Queue => &mut self.queue,
            PlaybackSource::Playlist => &mut self.playlist,
        };

        if list.is_empty() {
            debug!(?source, "Ignoring shuffle of an empty list");
            return;
        }

        let enabled = if list.is_shuffled() {
            list.unshuffle(current_id.as_deref());
            false
        } else {
            list.shuffle(current_id.as_deref(), &mut self.rng);
            true
        };

        self.pending_events
            .push(PlaybackEvent::ShuffleChanged { source, enabled });
        match source {
            PlaybackSource::Queue => self.emit_queue_changed(),
            PlaybackSource::Playlist => self.emit_playlist_changed(),
        }
    }

    /// Whether the source with attention is shuffled
    pub fn is_shuffled(&self) -> bool {
        self.list(self.active_source_or_playlist()).is_shuffled()
    }

    /// Whether the queue is shuffled
    pub fn is_queue_shuffled(&self) -> bool {
        self.queue.is_shuffled()
    }

    /// Whether the original playlist is shuffled
    pub fn is_playlist_shuffled(&self) -> bool {
        self.playlist.is_shuffled()
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        if self.repeat != mode {
            self.repeat = mode;
            self.pending_events
                .push(PlaybackEvent::RepeatChanged { mode });
        }
    }

    /// Advance repeat mode none -> one -> all -> none
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.set_repeat(self.repeat.cycle());
        self.repeat
    }

    /// Get current repeat mode
    pub fn get_repeat(&self) -> RepeatMode {
        self.repeat
    }

    // ===== Output Feedback =====

    /// Progress reported by the audio output
    pub fn set_current_time(&mut self, time: Duration) {
        if self.current_song.is_some() {
            self.current_time = time;
        }
    }

    /// Duration reported by the audio output once metadata is loaded
    pub fn set_duration(&mut self, duration: Duration) {
        if self.current_song.is_some() {
            self.duration = duration;
        }
    }

    /// Playing flag reported by the audio output
    pub fn set_is_playing(&mut self, playing: bool) {
        if playing && self.current_song.is_none() {
            debug!("Ignoring play state with no current song");
            return;
        }
        self.set_playing(playing);
    }

    // ===== State Queries =====

    /// Get currently playing song
    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }

    /// Whether audio should be playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Position in the current song
    pub fn current_time(&self) -> Duration {
        self.current_time
    }

    /// Duration of the current song
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Queue contents in play order
    pub fn queue(&self) -> &[Song] {
        self.queue.songs()
    }

    /// Original playlist contents in play order
    pub fn original_playlist(&self) -> &[Song] {
        self.playlist.songs()
    }

    /// Source with attention (`None` while idle)
    pub fn active_source(&self) -> Option<PlaybackSource> {
        self.source
    }

    /// Whether the queue has attention
    pub fn is_playing_from_queue(&self) -> bool {
        self.source == Some(PlaybackSource::Queue)
    }

    /// The list the current song belongs to
    pub fn get_current_playlist(&self) -> &[Song] {
        self.list(self.active_source_or_playlist()).songs()
    }

    /// Index of the current song within [`PlaybackManager::get_current_playlist`]
    pub fn get_current_index(&self) -> Option<usize> {
        self.source.and_then(|source| self.list(source).position())
    }

    /// Check if "next" would move to (or restart) a song
    pub fn has_next(&self) -> bool {
        if self.current_song.is_none() {
            return false;
        }

        if self.repeat == RepeatMode::One {
            return true;
        }

        let queue_has_more = match self.source {
            Some(PlaybackSource::Queue) => self
                .queue
                .position()
                .is_some_and(|index| index + 1 < self.queue.len()),
            _ => !self.queue.is_empty(),
        };

        queue_has_more || self.playlist_next_index().is_some()
    }

    /// Check if "previous" would move to another song
    pub fn has_previous(&self) -> bool {
        let Some(source) = self.source else {
            return false;
        };

        let list = self.list(source);
        match list.position() {
            Some(index) if index > 0 => true,
            Some(_) => self.repeat == RepeatMode::All && list.len() > 1,
            None => false,
        }
    }

    /// Consistent copy of every observable field
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current_song: self.current_song.clone(),
            is_playing: self.is_playing,
            current_time: self.current_time,
            duration: self.duration,
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
            queue: self.queue.songs().to_vec(),
            original_playlist: self.playlist.songs().to_vec(),
            source: self.source,
            current_index: self.get_current_index(),
            shuffle: self.is_shuffled(),
            repeat: self.repeat,
        }
    }

    /// Counter bumped whenever the current song (re)starts from zero
    ///
    /// Output adapters compare it against the last value they applied to
    /// notice reloads and restarts of the same song.
    pub fn song_epoch(&self) -> u64 {
        self.song_epoch
    }

    /// Counter bumped on every explicit seek
    pub fn seek_epoch(&self) -> u64 {
        self.seek_epoch
    }

    /// Configuration this manager was created with
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal Transitions =====

    fn list(&self, source: PlaybackSource) -> &Tracklist {
        match source {
            PlaybackSource::Queue => &self.queue,
            PlaybackSource::Playlist => &self.playlist,
        }
    }

    fn list_mut(&mut self, source: PlaybackSource) -> &mut Tracklist {
        match source {
            PlaybackSource::Queue => &mut self.queue,
            PlaybackSource::Playlist => &mut self.playlist,
        }
    }

    fn active_source_or_playlist(&self) -> PlaybackSource {
        self.source.unwrap_or(PlaybackSource::Playlist)
    }

    /// Playlist index "next" would move to, honoring repeat all
    fn playlist_next_index(&self) -> Option<usize> {
        let next = self.playlist.position().map_or(0, |index| index + 1);
        if next < self.playlist.len() {
            Some(next)
        } else if self.repeat == RepeatMode::All && !self.playlist.is_empty() {
            Some(0)
        } else {
            None
        }
    }

    /// Make the song under `source`'s cursor current, without touching
    /// the playing flag
    fn switch_to(&mut self, source: PlaybackSource) {
        let Some(song) = self.list(source).current().cloned() else {
            return;
        };

        if source == PlaybackSource::Playlist {
            self.queue.set_position(None);
        }

        let previous_song_id = self
            .current_song
            .replace(song.clone())
            .map(|previous| previous.id);

        if self.source != Some(source) {
            info!(?source, "Switching playback source");
        }

        self.source = Some(source);
        self.current_time = Duration::ZERO;
        self.duration = song.duration;
        self.song_epoch += 1;

        self.pending_events.push(PlaybackEvent::SongChanged {
            song_id: Some(song.id),
            previous_song_id,
            source: Some(source),
        });
    }

    fn play_from(&mut self, source: PlaybackSource) {
        self.switch_to(source);
        self.set_playing(true);
    }

    /// Queue ran out: drain it and continue after the playlist's last index
    fn fall_through_to_playlist(&mut self) {
        let Some(index) = self.playlist_next_index() else {
            self.end_playback();
            return;
        };

        info!(index, "Queue exhausted, resuming playlist");
        self.queue.clear();
        self.emit_queue_changed();
        self.playlist.set_position(Some(index));
        self.play_from(PlaybackSource::Playlist);
    }

    /// Queue lost attention without being played through: go back to the
    /// playlist song it interrupted
    fn resume_playlist_or_stop(&mut self) {
        if self.playlist.is_empty() {
            self.stop_and_clear();
            return;
        }

        let index = self.playlist.position().unwrap_or(0);
        self.playlist.set_position(Some(index));
        self.switch_to(PlaybackSource::Playlist);
    }

    fn restart_current(&mut self) {
        let Some(song_id) = self.current_song.as_ref().map(|song| song.id.clone()) else {
            return;
        };

        self.current_time = Duration::ZERO;
        self.song_epoch += 1;
        self.pending_events
            .push(PlaybackEvent::SongRestarted { song_id });
    }

    fn end_playback(&mut self) {
        info!("Reached end of playback");
        self.set_playing(false);
        self.pending_events.push(PlaybackEvent::PlaybackEnded);
    }

    fn stop_and_clear(&mut self) {
        let previous_song_id = self.current_song.take().map(|song| song.id);
        self.source = None;
        self.queue.set_position(None);
        self.current_time = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.song_epoch += 1;
        self.set_playing(false);

        if previous_song_id.is_some() {
            self.pending_events.push(PlaybackEvent::SongChanged {
                song_id: None,
                previous_song_id,
                source: None,
            });
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing != playing {
            self.is_playing = playing;
            self.pending_events
                .push(PlaybackEvent::StateChanged { is_playing: playing });
        }
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_playlist_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::PlaylistChanged {
            length: self.playlist.len(),
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }
}

impl Default for PlaybackManager {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}
