//! Property-based tests for catalogs and shuffling
//!
//! Uses proptest to verify invariants across many random inputs.

use plvylist_core::{shuffle_tracks_with, Catalog, TrackField, TrackRecord};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ===== Helpers =====

fn arbitrary_track() -> impl Strategy<Value = TrackRecord> {
    (
        "[a-z0-9]{1,12}\\.mp3",                    // file
        proptest::option::of("[A-Za-z ]{0,30}"), // title
        proptest::option::of("[A-Za-z ]{0,20}"), // artist
        proptest::option::of("[A-Za-z ]{0,20}"), // album
    )
        .prop_map(|(file, title, artist, album)| TrackRecord {
            file,
            title,
            artist,
            artist_url: None,
            album,
            album_url: None,
            artwork: None,
        })
}

fn arbitrary_tracks() -> impl Strategy<Value = Vec<TrackRecord>> {
    prop::collection::vec(arbitrary_track(), 1..60)
}

fn sorted_files(catalog: &Catalog) -> Vec<String> {
    let mut files: Vec<String> = catalog.iter().map(|t| t.file.clone()).collect();
    files.sort();
    files
}

// ===== Property Tests =====

proptest! {
    /// Property: shuffle is a true permutation of the catalog
    #[test]
    fn shuffle_is_a_permutation(tracks in arbitrary_tracks(), seed in any::<u64>()) {
        let catalog = Catalog::new(tracks).unwrap();
        let shuffled = catalog.shuffled_with(&mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(shuffled.len(), catalog.len());
        prop_assert_eq!(sorted_files(&shuffled), sorted_files(&catalog));

        // Every record survives intact, not just its file
        for track in catalog.iter() {
            let before = catalog.iter().filter(|t| *t == track).count();
            let after = shuffled.iter().filter(|t| *t == track).count();
            prop_assert_eq!(before, after);
        }
    }

    /// Property: positions are permuted by identity, never duplicated
    #[test]
    fn shuffle_permutes_indices(len in 0usize..200, seed in any::<u64>()) {
        let mut indices: Vec<usize> = (0..len).collect();
        shuffle_tracks_with(&mut indices, &mut StdRng::seed_from_u64(seed));

        indices.sort_unstable();
        prop_assert_eq!(indices, (0..len).collect::<Vec<_>>());
    }

    /// Property: column visibility matches "any track supplies the field"
    #[test]
    fn has_field_matches_any(tracks in arbitrary_tracks()) {
        let catalog = Catalog::new(tracks.clone()).unwrap();

        let any_artist = tracks.iter().any(|t| t.artist.as_deref().is_some_and(|a| !a.is_empty()));
        let any_album = tracks.iter().any(|t| t.album.as_deref().is_some_and(|a| !a.is_empty()));

        prop_assert_eq!(catalog.has_field(TrackField::Artist), any_artist);
        prop_assert_eq!(catalog.has_field(TrackField::Album), any_album);
        prop_assert!(!catalog.has_field(TrackField::Artwork));
    }

    /// Property: JSON documents round through the wire shape
    #[test]
    fn json_document_preserves_order(tracks in arbitrary_tracks()) {
        let document = serde_json::json!({ "tracks": tracks });
        let catalog = Catalog::from_json(&document.to_string()).unwrap();

        prop_assert_eq!(catalog.tracks(), tracks.as_slice());
    }
}
