//! Song catalog loaded from a JSON file
//!
//! ```json
//! {
//!   "songs": [
//!     { "id": "1", "title": "Intro", "artist": "Band", "duration": 95.0,
//!       "audio_url": "https://cdn.example/1.mp3" }
//!   ],
//!   "playlists": { "album": ["1"] }
//! }
//! ```

use crate::error::{CliError, Result};
use cadence_playback::Song;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    songs: Vec<Song>,

    #[serde(default)]
    playlists: BTreeMap<String, Vec<String>>,
}

/// Songs and named playlists the CLI can hand to the engine
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
    playlists: BTreeMap<String, Vec<Song>>,
}

impl Catalog {
    /// Read and check a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CliError::Catalog(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_json(&contents)?;

        info!(
            path = %path.display(),
            songs = catalog.songs.len(),
            playlists = catalog.playlists.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse catalog JSON
    ///
    /// Song ids must be unique and every playlist entry must name a song.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;

        let mut catalog = Catalog {
            songs: Vec::with_capacity(file.songs.len()),
            playlists: BTreeMap::new(),
        };

        for song in file.songs {
            if catalog.song(&song.id).is_some() {
                return Err(CliError::Catalog(format!("duplicate song id '{}'", song.id)));
            }
            catalog.songs.push(song);
        }

        for (name, ids) in file.playlists {
            let songs = ids
                .iter()
                .map(|id| {
                    catalog.song(id).cloned().ok_or_else(|| {
                        CliError::Catalog(format!("playlist '{}' names unknown song '{}'", name, id))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            catalog.playlists.insert(name, songs);
        }

        Ok(catalog)
    }

    /// Look up a song by id
    pub fn song(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == id)
    }

    /// Look up a song by id, failing for unknown ids
    pub fn require_song(&self, id: &str) -> Result<&Song> {
        self.song(id)
            .ok_or_else(|| CliError::UnknownSong(id.to_string()))
    }

    /// Songs of a named playlist
    pub fn playlist(&self, name: &str) -> Result<&[Song]> {
        self.playlists
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| CliError::UnknownPlaylist(name.to_string()))
    }

    /// All songs in file order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Playlist names in sorted order
    pub fn playlist_names(&self) -> impl Iterator<Item = &str> {
        self.playlists.keys().map(String::as_str)
    }
}
