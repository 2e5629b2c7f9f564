//! # Encore Performance Benchmarks
//!
//! Benchmarks for the save/restore hot paths. The save path matters most:
//! players snapshot their queue on every backgrounding, so a save of a
//! realistic queue (a few hundred tracks) must stay cheap.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark group
//! cargo bench save
//! cargo bench restore
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use encore::state::{PlayerState, RepeatMode, ShuffleMode};
use encore::store::SessionStore;
use encore::track::TrackRecord;

/// Build a realistic queue of `len` tracks.
fn sample_tracks(len: usize) -> Vec<TrackRecord> {
    (0..len)
        .map(|i| {
            let artist_idx = i / 10 + 1;
            let album_idx = i / 5 + 1;
            TrackRecord {
                title: format!("Song {i:04}"),
                artist: format!("Artist {artist_idx}"),
                artist_id: artist_idx as i64,
                album: format!("Album {album_idx}"),
                album_id: album_idx as i64,
                duration_ms: 180_000 + (i as i64 % 120) * 1_000,
                track_number: (i % 12) as i64 + 1,
                url: format!("/music/Artist{artist_idx}/Album{album_idx}/Song{i:04}.flac"),
                media_id: i as i64 + 1,
            }
        })
        .collect()
}

fn sample_state() -> PlayerState {
    PlayerState {
        track_index: 3,
        track_position_ms: 61_500,
        shuffle: ShuffleMode::On,
        repeat: RepeatMode::All,
    }
}

fn bench_save_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("save");

    for len in [10usize, 100, 500] {
        let tracks = sample_tracks(len);
        let state = sample_state();

        group.bench_with_input(BenchmarkId::new("save_state", len), &tracks, |b, tracks| {
            let mut store = SessionStore::open_in_memory().expect("Failed to open store");
            let mut i = 0u64;
            b.iter(|| {
                // Distinct titles so every save inserts instead of replacing.
                i += 1;
                let timestamp = store
                    .save_state(tracks, &state, &format!("bench-{i}"), false)
                    .expect("Failed to save state");
                black_box(timestamp);
            });
        });
    }

    group.finish();
}

fn bench_autosave_replacement(c: &mut Criterion) {
    let tracks = sample_tracks(100);
    let state = sample_state();

    c.bench_function("save/autosave_replace_100", |b| {
        let mut store = SessionStore::open_in_memory().expect("Failed to open store");
        b.iter(|| {
            // Each save supersedes the previous autosave: delete + insert.
            let timestamp = store
                .save_state(&tracks, &state, "auto", true)
                .expect("Failed to save autosave");
            black_box(timestamp);
        });
    });
}

fn bench_restore(c: &mut Criterion) {
    let mut group = c.benchmark_group("restore");

    for len in [10usize, 100, 500] {
        let mut store = SessionStore::open_in_memory().expect("Failed to open store");
        store
            .save_state(&sample_tracks(len), &sample_state(), "auto", true)
            .expect("Failed to seed store");

        group.bench_function(BenchmarkId::new("read_playlist", len), |b| {
            b.iter(|| {
                let tracks = store.read_playlist(None).expect("Failed to read playlist");
                black_box(tracks.len());
            });
        });
    }

    group.finish();
}

fn bench_bookmark_listing(c: &mut Criterion) {
    let mut store = SessionStore::open_in_memory().expect("Failed to open store");
    let tracks = sample_tracks(20);
    for i in 0..100 {
        store
            .save_state(&tracks, &sample_state(), &format!("bookmark-{i}"), false)
            .expect("Failed to seed store");
    }

    c.bench_function("restore/bookmarks_100", |b| {
        b.iter(|| {
            let bookmarks = store.bookmarks().expect("Failed to list bookmarks");
            black_box(bookmarks.len());
        });
    });
}

criterion_group!(
    benches,
    bench_save_state,
    bench_autosave_replacement,
    bench_restore,
    bench_bookmark_listing
);
criterion_main!(benches);
