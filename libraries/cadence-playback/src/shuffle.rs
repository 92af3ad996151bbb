//! Shuffle algorithms for list randomization
//!
//! Pure random (Fisher-Yates) permutation that keeps the playing song in
//! front, plus the lookup used to restore the unshuffled order.

use crate::types::Song;
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle `songs` uniformly, pinning the song with `pinned_id` to index 0
///
/// Every other song takes part in a Fisher-Yates shuffle. When `pinned_id`
/// is `None` or not in the list, the whole list is shuffled.
///
/// Returns the index of the pinned song after shuffling (always 0 when it
/// was found).
pub fn shuffle_pinned<R: Rng + ?Sized>(
    songs: &mut [Song],
    pinned_id: Option<&str>,
    rng: &mut R,
) -> Option<usize> {
    let pinned = pinned_id.and_then(|id| position_of(songs, id));

    match pinned {
        Some(index) => {
            songs.swap(0, index);
            songs[1..].shuffle(rng);
            Some(0)
        }
        None => {
            songs.shuffle(rng);
            None
        }
    }
}

/// Index of the song with `id`, if present
pub fn position_of(songs: &[Song], id: &str) -> Option<usize> {
    songs.iter().position(|song| song.id == id)
}
