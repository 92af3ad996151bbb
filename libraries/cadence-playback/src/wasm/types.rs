//! WASM-compatible type definitions

use crate::Song;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// WASM-compatible song
///
/// Mirrors [`Song`] with JS-compatible types (f64 seconds instead of
/// `Duration`) and camelCase field names.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
#[wasm_bindgen]
pub struct WasmSong {
    id: String,
    title: String,
    artist: String,
    album: Option<String>,
    duration_secs: f64,
    art_url: Option<String>,
    audio_url: String,
    genre: Option<String>,
}

#[wasm_bindgen]
impl WasmSong {
    /// Create a new song
    #[wasm_bindgen(constructor)]
    pub fn new(
        id: String,
        title: String,
        artist: String,
        duration_secs: f64,
        audio_url: String,
    ) -> Self {
        Self {
            id,
            title,
            artist,
            album: None,
            duration_secs,
            art_url: None,
            audio_url,
            genre: None,
        }
    }

    // Getters for all fields
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> String {
        self.id.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn title(&self) -> String {
        self.title.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn artist(&self) -> String {
        self.artist.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn album(&self) -> Option<String> {
        self.album.clone()
    }

    #[wasm_bindgen(getter, js_name = durationSecs)]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    #[wasm_bindgen(getter, js_name = artUrl)]
    pub fn art_url(&self) -> Option<String> {
        self.art_url.clone()
    }

    #[wasm_bindgen(getter, js_name = audioUrl)]
    pub fn audio_url(&self) -> String {
        self.audio_url.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn genre(&self) -> Option<String> {
        self.genre.clone()
    }

    // Setters
    #[wasm_bindgen(setter)]
    pub fn set_album(&mut self, album: Option<String>) {
        self.album = album;
    }

    #[wasm_bindgen(setter, js_name = artUrl)]
    pub fn set_art_url(&mut self, art_url: Option<String>) {
        self.art_url = art_url;
    }

    #[wasm_bindgen(setter)]
    pub fn set_genre(&mut self, genre: Option<String>) {
        self.genre = genre;
    }
}

/// Seconds from JS, clamped to a valid `Duration`
///
/// NaN and negative values become zero; values too large to represent
/// (including infinity) saturate at `Duration::MAX`.
pub(crate) fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

// Conversion from internal Song to WASM type
impl From<&Song> for WasmSong {
    fn from(song: &Song) -> Self {
        Self {
            id: song.id.clone(),
            title: song.title.clone(),
            artist: song.artist.clone(),
            album: song.album.clone(),
            duration_secs: song.duration.as_secs_f64(),
            art_url: song.art_url.clone(),
            audio_url: song.audio_url.clone(),
            genre: song.genre.clone(),
        }
    }
}

// Conversion from WASM type to internal Song
impl From<WasmSong> for Song {
    fn from(song: WasmSong) -> Self {
        Self {
            id: song.id,
            title: song.title,
            artist: song.artist,
            album: song.album,
            duration: secs_to_duration(song.duration_secs),
            art_url: song.art_url,
            audio_url: song.audio_url,
            genre: song.genre,
        }
    }
}
