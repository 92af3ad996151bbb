//! WASM-compatible PlaybackManager wrapper

use super::types::{secs_to_duration, WasmSong};
use crate::{PlaybackConfig, PlaybackError, PlaybackEvent, PlaybackManager, RepeatMode, Song};
use js_sys::Function;
use wasm_bindgen::prelude::*;

/// WASM-compatible playback manager
///
/// This wraps the core PlaybackManager with a JavaScript-friendly API.
/// After every call the engine's events are drained and forwarded to the
/// registered callbacks.
#[wasm_bindgen]
pub struct WasmPlaybackManager {
    inner: PlaybackManager,

    // Event callbacks
    on_state_change: Option<Function>,
    on_song_change: Option<Function>,
    on_queue_change: Option<Function>,
    on_error: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlaybackManager {
    /// Create a new playback manager
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        Self {
            inner: PlaybackManager::new(PlaybackConfig::default()),
            on_state_change: None,
            on_song_change: None,
            on_queue_change: None,
            on_error: None,
        }
    }

    // ===== Playback Control =====

    /// Play a song, optionally with the list it was picked from
    #[wasm_bindgen(js_name = playSong)]
    pub fn play_song(&mut self, song: &WasmSong, list: JsValue) -> Result<(), JsValue> {
        let list = parse_song_list(list).map_err(|e| self.handle_error(e))?;
        self.inner.play_song(&Song::from(song.clone()), list);
        self.dispatch();
        Ok(())
    }

    /// Play, or toggle pause when the song is already current
    #[wasm_bindgen(js_name = handlePlaySong)]
    pub fn handle_play_song(&mut self, song: &WasmSong, list: JsValue) -> Result<(), JsValue> {
        let list = parse_song_list(list).map_err(|e| self.handle_error(e))?;
        self.inner.handle_play_song(&Song::from(song.clone()), list);
        self.dispatch();
        Ok(())
    }

    /// Pause playback
    #[wasm_bindgen(js_name = pauseSong)]
    pub fn pause_song(&mut self) {
        self.inner.pause_song();
        self.dispatch();
    }

    /// Resume playback
    #[wasm_bindgen(js_name = resumeSong)]
    pub fn resume_song(&mut self) {
        self.inner.resume_song();
        self.dispatch();
    }

    /// Skip to next song
    #[wasm_bindgen(js_name = nextSong)]
    pub fn next_song(&mut self) {
        self.inner.next_song();
        self.dispatch();
    }

    /// Go to previous song
    #[wasm_bindgen(js_name = previousSong)]
    pub fn previous_song(&mut self) {
        self.inner.previous_song();
        self.dispatch();
    }

    /// Seek to position in seconds
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&mut self, position_secs: f64) {
        self.inner.seek_to(secs_to_duration(position_secs));
        self.dispatch();
    }

    // ===== Volume Control =====

    /// Set volume (0.0-1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, level: f32) {
        self.inner.set_volume(level);
        self.dispatch();
    }

    /// Get current volume (0.0-1.0)
    #[wasm_bindgen(js_name = getVolume)]
    pub fn get_volume(&self) -> f32 {
        self.inner.get_volume()
    }

    /// Level to hand to the audio element (0 while muted)
    pub fn gain(&self) -> f32 {
        self.inner.gain()
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.inner.mute();
        self.dispatch();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.inner.unmute();
        self.dispatch();
    }

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&mut self) {
        self.inner.toggle_mute();
        self.dispatch();
    }

    /// Check if muted
    #[wasm_bindgen(js_name = isMuted)]
    pub fn is_muted(&self) -> bool {
        self.inner.is_muted()
    }

    // ===== Queue Management =====

    /// Add song to the queue; returns false for a duplicate
    #[wasm_bindgen(js_name = addToQueue)]
    pub fn add_to_queue(&mut self, song: &WasmSong) -> bool {
        let added = self.inner.add_to_queue(Song::from(song.clone()));
        self.dispatch();
        added
    }

    /// Remove song from queue by index; returns the removed song or null
    #[wasm_bindgen(js_name = removeFromQueue)]
    pub fn remove_from_queue(&mut self, index: usize) -> JsValue {
        let removed = self.inner.remove_from_queue(index);
        self.dispatch();
        removed
            .map(|song| song_to_js(&song))
            .unwrap_or(JsValue::NULL)
    }

    /// Clear the queue
    #[wasm_bindgen(js_name = clearQueue)]
    pub fn clear_queue(&mut self) {
        self.inner.clear_queue();
        self.dispatch();
    }

    /// Move queue entry; returns false for out-of-range indices
    #[wasm_bindgen(js_name = reorderQueue)]
    pub fn reorder_queue(&mut self, from: usize, to: usize) -> bool {
        let moved = self.inner.reorder_queue(from, to);
        self.dispatch();
        moved
    }

    /// Get queue songs
    #[wasm_bindgen(js_name = getQueue)]
    pub fn get_queue(&self) -> JsValue {
        songs_to_js(self.inner.queue())
    }

    /// Get original playlist songs
    #[wasm_bindgen(js_name = getOriginalPlaylist)]
    pub fn get_original_playlist(&self) -> JsValue {
        songs_to_js(self.inner.original_playlist())
    }

    /// Get the list the current song belongs to
    #[wasm_bindgen(js_name = getCurrentPlaylist)]
    pub fn get_current_playlist(&self) -> JsValue {
        songs_to_js(self.inner.get_current_playlist())
    }

    /// Index of the current song in its list
    #[wasm_bindgen(js_name = getCurrentIndex)]
    pub fn get_current_index(&self) -> Option<usize> {
        self.inner.get_current_index()
    }

    /// Whether the queue has attention
    #[wasm_bindgen(js_name = isPlayingFromQueue)]
    pub fn is_playing_from_queue(&self) -> bool {
        self.inner.is_playing_from_queue()
    }

    // ===== Shuffle & Repeat =====

    /// Toggle shuffle on the source with attention
    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&mut self) {
        self.inner.toggle_shuffle();
        self.dispatch();
    }

    /// Whether the source with attention is shuffled
    #[wasm_bindgen(js_name = isShuffled)]
    pub fn is_shuffled(&self) -> bool {
        self.inner.is_shuffled()
    }

    /// Set repeat mode ("none" | "one" | "all")
    #[wasm_bindgen(js_name = setRepeat)]
    pub fn set_repeat(&mut self, mode: &str) -> Result<(), JsValue> {
        let repeat: RepeatMode = mode.parse().map_err(|e| self.handle_error(e))?;
        self.inner.set_repeat(repeat);
        self.dispatch();
        Ok(())
    }

    /// Advance repeat mode; returns the new mode
    #[wasm_bindgen(js_name = cycleRepeat)]
    pub fn cycle_repeat(&mut self) -> String {
        let mode = self.inner.cycle_repeat();
        self.dispatch();
        mode.as_str().to_string()
    }

    /// Get current repeat mode
    #[wasm_bindgen(js_name = getRepeat)]
    pub fn get_repeat(&self) -> String {
        self.inner.get_repeat().as_str().to_string()
    }

    // ===== Audio Element Feedback =====

    /// Progress from the audio element's timeupdate event
    #[wasm_bindgen(js_name = setCurrentTime)]
    pub fn set_current_time(&mut self, secs: f64) {
        self.inner.set_current_time(secs_to_duration(secs));
    }

    /// Duration from the audio element's loadedmetadata event
    #[wasm_bindgen(js_name = setDuration)]
    pub fn set_duration(&mut self, secs: f64) {
        self.inner.set_duration(secs_to_duration(secs));
    }

    /// Play state reported by the audio element
    #[wasm_bindgen(js_name = setIsPlaying)]
    pub fn set_is_playing(&mut self, playing: bool) {
        self.inner.set_is_playing(playing);
        self.dispatch();
    }

    // ===== State Queries =====

    /// Current song or null
    #[wasm_bindgen(js_name = currentSong)]
    pub fn current_song(&self) -> JsValue {
        self.inner
            .current_song()
            .map(song_to_js)
            .unwrap_or(JsValue::NULL)
    }

    /// Whether audio should be playing
    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.is_playing()
    }

    /// Current position in seconds
    #[wasm_bindgen(js_name = currentTime)]
    pub fn current_time(&self) -> f64 {
        self.inner.current_time().as_secs_f64()
    }

    /// Duration of current song in seconds
    pub fn duration(&self) -> f64 {
        self.inner.duration().as_secs_f64()
    }

    /// Bumped whenever the current song (re)starts; reload the audio
    /// element when it changes
    #[wasm_bindgen(js_name = songEpoch)]
    pub fn song_epoch(&self) -> f64 {
        self.inner.song_epoch() as f64
    }

    /// Bumped on every explicit seek
    #[wasm_bindgen(js_name = seekEpoch)]
    pub fn seek_epoch(&self) -> f64 {
        self.inner.seek_epoch() as f64
    }

    /// Check if there is a next song
    #[wasm_bindgen(js_name = hasNext)]
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Check if there is a previous song
    #[wasm_bindgen(js_name = hasPrevious)]
    pub fn has_previous(&self) -> bool {
        self.inner.has_previous()
    }

    /// Full state snapshot as a plain object
    pub fn snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.snapshot()).unwrap_or(JsValue::NULL)
    }

    // ===== Event Listeners =====

    /// Register play/pause callback, called with a boolean
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&mut self, callback: Function) {
        self.on_state_change = Some(callback);
    }

    /// Register song change callback, called with the song or null
    #[wasm_bindgen(js_name = onSongChange)]
    pub fn on_song_change(&mut self, callback: Function) {
        self.on_song_change = Some(callback);
    }

    /// Register queue/playlist change callback
    #[wasm_bindgen(js_name = onQueueChange)]
    pub fn on_queue_change(&mut self, callback: Function) {
        self.on_queue_change = Some(callback);
    }

    /// Register error callback
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&mut self, callback: Function) {
        self.on_error = Some(callback);
    }

    // ===== Internal Event Emitters =====

    fn dispatch(&mut self) {
        for event in self.inner.drain_events() {
            match event {
                PlaybackEvent::StateChanged { is_playing } => {
                    if let Some(ref cb) = self.on_state_change {
                        cb.call1(&JsValue::NULL, &JsValue::from_bool(is_playing))
                            .ok();
                    }
                }
                PlaybackEvent::SongChanged { .. } | PlaybackEvent::SongRestarted { .. } => {
                    if let Some(ref cb) = self.on_song_change {
                        cb.call1(&JsValue::NULL, &self.current_song()).ok();
                    }
                }
                PlaybackEvent::QueueChanged { .. }
                | PlaybackEvent::PlaylistChanged { .. }
                | PlaybackEvent::ShuffleChanged { .. } => {
                    if let Some(ref cb) = self.on_queue_change {
                        cb.call0(&JsValue::NULL).ok();
                    }
                }
                _ => {}
            }
        }
    }

    fn handle_error(&self, error: PlaybackError) -> JsValue {
        let err_msg = error.to_string();

        // Emit error event
        if let Some(ref cb) = self.on_error {
            cb.call1(&JsValue::NULL, &JsValue::from_str(&err_msg))
                .ok();
        }

        JsValue::from_str(&err_msg)
    }
}

/// Default implementation
impl Default for WasmPlaybackManager {
    fn default() -> Self {
        Self::new()
    }
}

/// `undefined`/`null` means "no list"; anything else must be an array of songs
fn parse_song_list(value: JsValue) -> Result<Option<Vec<Song>>, PlaybackError> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }

    let songs: Vec<WasmSong> = serde_wasm_bindgen::from_value(value)
        .map_err(|e| PlaybackError::InvalidArgument(format!("Failed to parse songs: {}", e)))?;

    Ok(Some(songs.into_iter().map(Song::from).collect()))
}

fn song_to_js(song: &Song) -> JsValue {
    serde_wasm_bindgen::to_value(&WasmSong::from(song)).unwrap_or(JsValue::NULL)
}

fn songs_to_js(songs: &[Song]) -> JsValue {
    let songs: Vec<WasmSong> = songs.iter().map(WasmSong::from).collect();
    serde_wasm_bindgen::to_value(&songs).unwrap_or(JsValue::NULL)
}
