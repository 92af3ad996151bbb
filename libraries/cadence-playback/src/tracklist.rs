//! Ordered song list with a cursor
//!
//! Both playback sources are tracklists:
//! - Queue: user-added songs that pre-empt the playlist
//! - Playlist: the last bulk list chosen for playback
//!
//! ```text
//! songs:     [A] [B] [C] [D]
//! position:       ^            (Some(1) while this list has attention,
//!                               or the last index played from it)
//! unshuffled: Some([..])       (only while shuffled)
//! ```

use crate::shuffle::{position_of, shuffle_pinned};
use crate::types::Song;
use rand::Rng;

/// One playback source
#[derive(Debug, Clone, Default)]
pub struct Tracklist {
    /// Songs in play order
    songs: Vec<Song>,

    /// Cursor into `songs`
    position: Option<usize>,

    /// Order before shuffle (for exact restoring)
    unshuffled: Option<Vec<Song>>,
}

impl Tracklist {
    /// Create new empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents wholesale
    ///
    /// Drops any shuffle snapshot: a new list starts unshuffled.
    pub fn replace(&mut self, songs: Vec<Song>, position: Option<usize>) {
        self.position = position.filter(|&index| index < songs.len());
        self.songs = songs;
        self.unshuffled = None;
    }

    /// Append a song unless one with the same id is already present
    ///
    /// Returns the index of the appended song, `None` for a duplicate.
    pub fn push_unique(&mut self, song: Song) -> Option<usize> {
        if self.contains(&song.id) {
            return None;
        }

        if let Some(snapshot) = self.unshuffled.as_mut() {
            snapshot.push(song.clone());
        }
        self.songs.push(song);
        Some(self.songs.len() - 1)
    }

    /// Remove song by index
    ///
    /// Keeps the cursor on the same song when an earlier entry is removed.
    /// Removing the song under the cursor leaves the cursor at the same
    /// index (clamped to the new length) or `None` if the list empties.
    pub fn remove(&mut self, index: usize) -> Option<Song> {
        if index >= self.songs.len() {
            return None;
        }

        let song = self.songs.remove(index);

        // Also remove from the snapshot to keep restoration consistent
        if let Some(snapshot) = self.unshuffled.as_mut() {
            if let Some(pos) = position_of(snapshot, &song.id) {
                snapshot.remove(pos);
            }
        }

        self.position = match self.position {
            Some(_) if self.songs.is_empty() => None,
            Some(current) if index < current => Some(current - 1),
            Some(current) if index == current => Some(current.min(self.songs.len() - 1)),
            other => other,
        };

        Some(song)
    }

    /// Move the song at `from` to `to`, keeping the cursor on the same song
    ///
    /// Returns `false` (and changes nothing) when either index is out of bounds.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.songs.len();
        if from >= len || to >= len {
            return false;
        }

        if from == to {
            return true;
        }

        let song = self.songs.remove(from);
        self.songs.insert(to, song);

        if let Some(current) = self.position {
            self.position = Some(if from == current {
                to
            } else if from < current && to >= current {
                current - 1
            } else if from > current && to <= current {
                current + 1
            } else {
                current
            });
        }

        true
    }

    /// Clear the list, its cursor and any shuffle snapshot
    pub fn clear(&mut self) {
        self.songs.clear();
        self.position = None;
        self.unshuffled = None;
    }

    /// Shuffle, pinning the song with `current_id` to the front
    ///
    /// Snapshots the current order first. The cursor moves to 0 when the
    /// pinned song is in the list.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, current_id: Option<&str>, rng: &mut R) {
        if self.unshuffled.is_none() {
            self.unshuffled = Some(self.songs.clone());
        }

        let pinned = shuffle_pinned(&mut self.songs, current_id, rng);
        if self.position.is_some() || pinned.is_some() {
            self.position = pinned.or(Some(0)).filter(|_| !self.songs.is_empty());
        }
    }

    /// Restore the order saved by [`Tracklist::shuffle`]
    ///
    /// The cursor is relocated to `current_id` in the restored order
    /// (index 0 when the song is no longer present).
    pub fn unshuffle(&mut self, current_id: Option<&str>) {
        let Some(snapshot) = self.unshuffled.take() else {
            return;
        };

        self.songs = snapshot;
        if self.position.is_some() {
            let restored = current_id.and_then(|id| position_of(&self.songs, id));
            self.position = restored.or(Some(0)).filter(|_| !self.songs.is_empty());
        }
    }

    /// Whether the list is currently shuffled
    pub fn is_shuffled(&self) -> bool {
        self.unshuffled.is_some()
    }

    /// Point the cursor at `index` if it is in bounds
    pub fn set_position(&mut self, index: Option<usize>) {
        self.position = index.filter(|&i| i < self.songs.len());
    }

    /// Cursor position
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Song under the cursor
    pub fn current(&self) -> Option<&Song> {
        self.position.and_then(|index| self.songs.get(index))
    }

    /// Index of the song with `id`
    pub fn position_of(&self, id: &str) -> Option<usize> {
        position_of(&self.songs, id)
    }

    /// Whether a song with `id` is present
    pub fn contains(&self, id: &str) -> bool {
        self.position_of(id).is_some()
    }

    /// All songs in play order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Number of songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if list is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
