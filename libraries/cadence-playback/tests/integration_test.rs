//! Integration tests for playback manager
//!
//! These tests verify real playback scenarios and workflows.
//! No shallow tests - every test verifies meaningful behavior.

use cadence_playback::{
    PlaybackConfig, PlaybackEvent, PlaybackManager, PlaybackSource, RepeatMode, Song,
};
use std::time::Duration;

// ===== Test Helpers =====

fn create_test_song(id: &str, title: &str, artist: &str, duration_secs: u64) -> Song {
    let mut song = Song::new(
        id,
        title,
        artist,
        Duration::from_secs(duration_secs),
        format!("https://cdn.example/audio/{}.mp3", id),
    );
    song.album = Some("Test Album".to_string());
    song
}

fn create_songs(ids: &[&str]) -> Vec<Song> {
    ids.iter()
        .map(|id| create_test_song(id, &format!("Song {}", id), "Test Artist", 180))
        .collect()
}

fn current_id(manager: &PlaybackManager) -> Option<&str> {
    manager.current_song().map(|song| song.id.as_str())
}

/// Manager playing `ids` as the original playlist, starting at `start`
fn playing_playlist(ids: &[&str], start: usize) -> PlaybackManager {
    let mut manager = PlaybackManager::with_seed(PlaybackConfig::default(), 42);
    let playlist = create_songs(ids);
    manager.play_song(&playlist[start], Some(playlist.clone()));
    manager
}

// ===== Integration Tests =====

#[test]
fn test_play_pause_resume_workflow() {
    let mut manager = PlaybackManager::default();

    // Start idle
    assert!(manager.current_song().is_none());
    assert!(!manager.is_playing());

    let album = create_songs(&["1", "2", "3"]);
    manager.play_song(&album[0], Some(album.clone()));

    assert_eq!(current_id(&manager), Some("1"));
    assert!(manager.is_playing());
    assert_eq!(manager.current_time(), Duration::ZERO);

    // Pause
    manager.pause_song();
    assert!(!manager.is_playing());
    assert_eq!(current_id(&manager), Some("1"));

    // Resume
    manager.resume_song();
    assert!(manager.is_playing());
    assert_eq!(current_id(&manager), Some("1"));
}

#[test]
fn test_play_song_sets_duration_from_record() {
    let mut manager = PlaybackManager::default();
    let song = create_test_song("long", "Long One", "Band", 421);

    manager.play_song(&song, None);

    assert_eq!(manager.duration(), Duration::from_secs(421));
}

#[test]
fn test_playlist_plays_through_and_stops() {
    let mut manager = playing_playlist(&["1", "2", "3"], 0);

    manager.next_song();
    assert_eq!(current_id(&manager), Some("2"));
    assert_eq!(manager.get_current_index(), Some(1));

    manager.next_song();
    assert_eq!(current_id(&manager), Some("3"));

    // Past the end without repeat: stop, keep last song
    manager.next_song();
    assert_eq!(current_id(&manager), Some("3"));
    assert!(!manager.is_playing());
}

#[test]
fn test_playlist_wraps_with_repeat_all() {
    let mut manager = playing_playlist(&["1", "2"], 1);
    manager.set_repeat(RepeatMode::All);

    manager.next_song();

    assert_eq!(current_id(&manager), Some("1"));
    assert_eq!(manager.get_current_index(), Some(0));
    assert!(manager.is_playing());
}

#[test]
fn test_play_song_from_existing_playlist_without_list() {
    let mut manager = playing_playlist(&["1", "2", "3"], 0);
    let third = manager.original_playlist()[2].clone();

    manager.play_song(&third, None);

    assert_eq!(current_id(&manager), Some("3"));
    assert_eq!(manager.get_current_index(), Some(2));
    assert_eq!(manager.original_playlist().len(), 3);
}

#[test]
fn test_play_song_from_queue_without_list() {
    let mut manager = playing_playlist(&["x", "y"], 0);
    let queued = create_songs(&["a", "b"]);
    for song in &queued {
        manager.add_to_queue(song.clone());
    }

    manager.play_song(&queued[1], None);

    assert_eq!(current_id(&manager), Some("b"));
    assert!(manager.is_playing_from_queue());
    assert_eq!(manager.get_current_index(), Some(1));
    assert_eq!(manager.get_current_playlist().len(), 2);
}

#[test]
fn test_play_song_with_list_leaves_queue_untouched() {
    let mut manager = playing_playlist(&["1", "2"], 0);
    manager.add_to_queue(create_test_song("q", "Queued", "Artist", 100));

    let other = create_songs(&["7", "8", "9"]);
    manager.play_song(&other[1], Some(other.clone()));

    assert_eq!(manager.queue().len(), 1);
    assert_eq!(current_id(&manager), Some("8"));
    assert_eq!(manager.active_source(), Some(PlaybackSource::Playlist));

    // Queue still pre-empts the new playlist
    manager.next_song();
    assert_eq!(current_id(&manager), Some("q"));
}

#[test]
fn test_ad_hoc_song_becomes_single_song_playlist() {
    let mut manager = playing_playlist(&["1", "2"], 0);
    let stray = create_test_song("stray", "Stray", "Artist", 90);

    manager.play_song(&stray, None);

    assert_eq!(manager.original_playlist().len(), 1);
    assert_eq!(manager.original_playlist()[0].id, "stray");
    assert_eq!(manager.get_current_index(), Some(0));

    // Nothing follows a one-song playlist
    manager.next_song();
    assert!(!manager.is_playing());
}

// ===== Queue Pre-emption =====

#[test]
fn test_queue_preempts_playlist() {
    let mut manager = playing_playlist(&["p0", "p1", "p2", "p3"], 1);

    manager.add_to_queue(create_test_song("q0", "Queued", "Artist", 120));
    // Adding does not disturb the playing song
    assert_eq!(current_id(&manager), Some("p1"));

    manager.next_song();

    assert_eq!(current_id(&manager), Some("q0"));
    assert_eq!(manager.get_current_index(), Some(0));
    assert!(manager.is_playing_from_queue());
}

#[test]
fn test_queue_falls_through_to_next_playlist_index() {
    let mut manager = playing_playlist(&["X", "Y", "Z"], 1);
    manager.add_to_queue(create_test_song("A", "A", "Artist", 100));
    manager.add_to_queue(create_test_song("B", "B", "Artist", 100));

    manager.next_song();
    assert_eq!(current_id(&manager), Some("A"));

    manager.next_song();
    assert_eq!(current_id(&manager), Some("B"));
    assert!(manager.is_playing_from_queue());

    manager.next_song();
    assert_eq!(current_id(&manager), Some("Z"));
    assert_eq!(manager.get_current_index(), Some(2));
    assert!(!manager.is_playing_from_queue());
    assert_eq!(manager.active_source(), Some(PlaybackSource::Playlist));
}

#[test]
fn test_exhausted_queue_is_not_replayed() {
    let mut manager = playing_playlist(&["X", "Y", "Z"], 0);
    manager.add_to_queue(create_test_song("A", "A", "Artist", 100));

    manager.next_song(); // A
    manager.next_song(); // back to Y

    assert_eq!(current_id(&manager), Some("Y"));
    assert!(manager.queue().is_empty());

    manager.next_song();
    assert_eq!(current_id(&manager), Some("Z"));
}

#[test]
fn test_exhausted_queue_without_playlist_stops() {
    let mut manager = PlaybackManager::default();
    manager.add_to_queue(create_test_song("A", "A", "Artist", 100));
    assert_eq!(current_id(&manager), Some("A"));

    manager.next_song();

    assert!(!manager.is_playing());
    assert_eq!(current_id(&manager), Some("A"));
}

// ===== Repeat =====

#[test]
fn test_repeat_one_never_changes_song() {
    let mut manager = playing_playlist(&["1", "2", "3"], 1);
    manager.add_to_queue(create_test_song("q", "Queued", "Artist", 100));
    manager.set_repeat(RepeatMode::One);

    for _ in 0..5 {
        manager.set_current_time(Duration::from_secs(40));
        manager.next_song();

        assert_eq!(current_id(&manager), Some("2"));
        assert_eq!(manager.current_time(), Duration::ZERO);
        assert!(manager.is_playing());
    }
}

#[test]
fn test_repeat_one_restarts_paused_song() {
    let mut manager = playing_playlist(&["1"], 0);
    manager.set_repeat(RepeatMode::One);
    manager.pause_song();

    manager.next_song();

    assert!(manager.is_playing());
}

#[test]
fn test_cycle_repeat_walks_all_modes() {
    let mut manager = PlaybackManager::default();

    assert_eq!(manager.cycle_repeat(), RepeatMode::One);
    assert_eq!(manager.cycle_repeat(), RepeatMode::All);
    assert_eq!(manager.cycle_repeat(), RepeatMode::None);
    assert_eq!(manager.get_repeat(), RepeatMode::None);
}

// ===== Previous =====

#[test]
fn test_previous_scrub_back_threshold() {
    let mut manager = playing_playlist(&["1", "2", "3"], 1);

    // 2 seconds in: navigate to the prior track
    manager.set_current_time(Duration::from_secs(2));
    manager.previous_song();
    assert_eq!(current_id(&manager), Some("1"));

    // 5 seconds in: restart the same track
    manager.next_song();
    assert_eq!(current_id(&manager), Some("2"));
    manager.set_current_time(Duration::from_secs(5));
    let epoch = manager.song_epoch();

    manager.previous_song();

    assert_eq!(current_id(&manager), Some("2"));
    assert_eq!(manager.current_time(), Duration::ZERO);
    assert!(manager.song_epoch() > epoch);
}

#[test]
fn test_previous_within_queue() {
    let mut manager = PlaybackManager::default();
    for song in create_songs(&["a", "b", "c"]) {
        manager.add_to_queue(song);
    }
    manager.next_song();
    manager.next_song();
    assert_eq!(current_id(&manager), Some("c"));

    manager.previous_song();

    assert_eq!(current_id(&manager), Some("b"));
    assert!(manager.is_playing_from_queue());
}

#[test]
fn test_previous_at_start_restarts_current() {
    let mut manager = playing_playlist(&["1", "2"], 0);
    manager.set_current_time(Duration::from_secs(1));

    manager.previous_song();

    assert_eq!(current_id(&manager), Some("1"));
    assert_eq!(manager.current_time(), Duration::ZERO);
}

// ===== Shuffle =====

#[test]
fn test_shuffle_round_trip_restores_order() {
    let ids: Vec<String> = (0..20).map(|i| format!("s{}", i)).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let mut manager = playing_playlist(&id_refs, 7);
    let original: Vec<String> = manager
        .original_playlist()
        .iter()
        .map(|s| s.id.clone())
        .collect();

    manager.toggle_shuffle();
    assert!(manager.is_shuffled());
    assert_eq!(current_id(&manager), Some("s7"));
    assert_eq!(manager.get_current_index(), Some(0));
    assert_eq!(manager.original_playlist()[0].id, "s7");

    manager.toggle_shuffle();
    assert!(!manager.is_shuffled());
    assert_eq!(current_id(&manager), Some("s7"));
    assert_eq!(manager.get_current_index(), Some(7));

    let restored: Vec<String> = manager
        .original_playlist()
        .iter()
        .map(|s| s.id.clone())
        .collect();
    assert_eq!(restored, original);
}

#[test]
fn test_shuffle_is_per_source() {
    let mut manager = playing_playlist(&["p0", "p1", "p2", "p3", "p4"], 0);
    for song in create_songs(&["q0", "q1", "q2", "q3", "q4"]) {
        manager.add_to_queue(song);
    }
    manager.next_song();
    assert!(manager.is_playing_from_queue());

    let playlist_before: Vec<String> = manager
        .original_playlist()
        .iter()
        .map(|s| s.id.clone())
        .collect();

    manager.toggle_shuffle();

    assert!(manager.is_queue_shuffled());
    assert!(!manager.is_playlist_shuffled());
    let playlist_after: Vec<String> = manager
        .original_playlist()
        .iter()
        .map(|s| s.id.clone())
        .collect();
    assert_eq!(playlist_before, playlist_after);
}

#[test]
fn test_shuffled_playlist_plays_every_song_once() {
    let mut manager = playing_playlist(&["a", "b", "c", "d", "e"], 2);
    manager.toggle_shuffle();

    let mut played = vec![current_id(&manager).unwrap().to_string()];
    for _ in 0..4 {
        manager.next_song();
        played.push(current_id(&manager).unwrap().to_string());
    }

    played.sort();
    assert_eq!(played, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_seeded_shuffles_are_reproducible() {
    let ids = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let mut first = playing_playlist(&ids, 0);
    let mut second = playing_playlist(&ids, 0);

    first.toggle_shuffle();
    second.toggle_shuffle();

    assert_eq!(first.original_playlist(), second.original_playlist());
}

// ===== Seek & Volume =====

#[test]
fn test_seek_and_progress() {
    let mut manager = playing_playlist(&["1"], 0);

    manager.seek_to(Duration::from_secs(42));
    assert_eq!(manager.current_time(), Duration::from_secs(42));
    assert_eq!(manager.seek_epoch(), 1);

    // Progress from the output does not count as a seek
    manager.set_current_time(Duration::from_secs(43));
    assert_eq!(manager.seek_epoch(), 1);
}

#[test]
fn test_volume_clamp_and_mute() {
    let mut manager = PlaybackManager::default();

    manager.set_volume(1.7);
    assert_eq!(manager.get_volume(), 1.0);

    manager.set_volume(-0.2);
    assert_eq!(manager.get_volume(), 0.0);

    manager.set_volume(0.6);
    manager.mute();
    assert!(manager.is_muted());
    assert_eq!(manager.gain(), 0.0);
    assert_eq!(manager.get_volume(), 0.6);

    manager.toggle_mute();
    assert!(!manager.is_muted());
    assert_eq!(manager.gain(), 0.6);
}

#[test]
fn test_config_volume_and_repeat_apply() {
    let config = PlaybackConfig {
        volume: 0.25,
        repeat: RepeatMode::All,
        ..PlaybackConfig::default()
    };

    let manager = PlaybackManager::new(config);

    assert_eq!(manager.get_volume(), 0.25);
    assert_eq!(manager.get_repeat(), RepeatMode::All);
}

// ===== Empty State =====

#[test]
fn test_every_action_on_empty_engine_is_safe() {
    let mut manager = PlaybackManager::default();

    manager.pause_song();
    manager.resume_song();
    manager.next_song();
    manager.previous_song();
    manager.seek_to(Duration::from_secs(10));
    manager.set_volume(0.3);
    manager.mute();
    manager.unmute();
    assert!(manager.remove_from_queue(0).is_none());
    assert!(!manager.reorder_queue(0, 1));
    manager.clear_queue();
    manager.toggle_shuffle();
    manager.set_repeat(RepeatMode::All);
    manager.cycle_repeat();
    manager.set_current_time(Duration::from_secs(3));
    manager.set_duration(Duration::from_secs(200));
    manager.set_is_playing(true);
    manager.play_song(&create_test_song("x", "X", "Y", 10), Some(Vec::new()));

    assert!(manager.current_song().is_none());
    assert!(!manager.is_playing());
    assert_eq!(manager.current_time(), Duration::ZERO);
    assert!(manager.get_current_index().is_none());
    assert!(manager.get_current_playlist().is_empty());
    assert!(!manager.has_next());
    assert!(!manager.has_previous());
}

// ===== Events & Snapshot =====

#[test]
fn test_events_describe_transitions() {
    let mut manager = PlaybackManager::default();
    let album = create_songs(&["1", "2"]);

    manager.play_song(&album[0], Some(album.clone()));
    let events = manager.drain_events();

    assert!(events.contains(&PlaybackEvent::PlaylistChanged { length: 2 }));
    assert!(events.contains(&PlaybackEvent::SongChanged {
        song_id: Some("1".to_string()),
        previous_song_id: None,
        source: Some(PlaybackSource::Playlist),
    }));
    assert!(events.contains(&PlaybackEvent::StateChanged { is_playing: true }));
    assert!(!manager.has_pending_events());

    manager.next_song();
    manager.next_song();
    let events = manager.drain_events();
    assert_eq!(events.last(), Some(&PlaybackEvent::PlaybackEnded));
}

#[test]
fn test_snapshot_is_consistent_copy() {
    let mut manager = playing_playlist(&["1", "2", "3"], 1);
    manager.add_to_queue(create_test_song("q", "Q", "Artist", 60));
    manager.set_volume(0.5);

    let snapshot = manager.snapshot();
    manager.next_song();

    assert_eq!(snapshot.current_song.as_ref().map(|s| s.id.as_str()), Some("2"));
    assert_eq!(snapshot.source, Some(PlaybackSource::Playlist));
    assert_eq!(snapshot.current_index, Some(1));
    assert_eq!(snapshot.queue.len(), 1);
    assert_eq!(snapshot.original_playlist.len(), 3);
    assert_eq!(snapshot.volume, 0.5);
    assert!(snapshot.is_playing);

    // Later transitions do not reach the snapshot
    assert_eq!(current_id(&manager), Some("q"));
}

#[test]
fn test_has_next_accounts_for_queue() {
    let mut manager = playing_playlist(&["1"], 0);
    assert!(!manager.has_next());

    manager.add_to_queue(create_test_song("q", "Q", "Artist", 60));
    assert!(manager.has_next());

    manager.next_song();
    assert!(!manager.has_next());

    manager.set_repeat(RepeatMode::One);
    assert!(manager.has_next());
}
