//! Catalog shuffling
//!
//! Fisher-Yates: walk `i` from the last position down to 1 and swap it with
//! a uniformly chosen position in `[0, i]`. Every permutation is equally
//! likely given a uniform random source, and no track is dropped or
//! duplicated.

use rand::Rng;

/// Shuffle tracks in place using the thread-local random source
pub fn shuffle_tracks<T>(tracks: &mut [T]) {
    shuffle_tracks_with(tracks, &mut rand::thread_rng());
}

/// Shuffle tracks in place with a caller-supplied random source
pub fn shuffle_tracks_with<T, R: Rng + ?Sized>(tracks: &mut [T], rng: &mut R) {
    if tracks.len() < 2 {
        return;
    }

    for i in (1..tracks.len()).rev() {
        let j = rng.gen_range(0..=i);
        tracks.swap(i, j);
    }
}
