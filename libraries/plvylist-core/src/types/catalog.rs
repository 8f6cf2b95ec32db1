//! Catalog domain type
use crate::error::{CatalogLoadError, Result};
use crate::shuffle::shuffle_tracks_with;
use crate::types::{TrackField, TrackRecord};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ordered, non-empty list of tracks for one session
///
/// A catalog is never mutated element by element: shuffling produces a new
/// catalog that replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    tracks: Vec<TrackRecord>,
}

/// Wire shape of a catalog document
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    tracks: Vec<TrackRecord>,
}

impl Catalog {
    /// Build a catalog from records, rejecting an empty list
    pub fn new(tracks: Vec<TrackRecord>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(CatalogLoadError::Empty);
        }

        Ok(Self { tracks })
    }

    /// Parse a `{ "tracks": [...] }` document
    pub fn from_json(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;

        if let Some(position) = document.tracks.iter().position(|t| t.file.trim().is_empty()) {
            return Err(CatalogLoadError::malformed(format!(
                "track {position} has an empty file"
            )));
        }

        Self::new(document.tracks)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false for a constructed catalog; kept for API symmetry
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&TrackRecord> {
        self.tracks.get(index)
    }

    /// Whether `index` refers to a track
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.tracks.len()
    }

    /// Index of the final track
    pub fn last_index(&self) -> usize {
        self.tracks.len() - 1
    }

    /// Iterate tracks in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, TrackRecord> {
        self.tracks.iter()
    }

    /// All tracks as a slice
    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }

    /// True if at least one track supplies `field`
    ///
    /// Used to decide whether an optional column renders at all.
    pub fn has_field(&self, field: TrackField) -> bool {
        self.tracks.iter().any(|t| t.field(field).is_some())
    }

    /// New catalog holding the same tracks in a random order
    pub fn shuffled(&self) -> Self {
        self.shuffled_with(&mut rand::thread_rng())
    }

    /// New catalog shuffled with a caller-supplied random source
    pub fn shuffled_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut tracks = self.tracks.clone();
        shuffle_tracks_with(&mut tracks, rng);
        Self { tracks }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a TrackRecord;
    type IntoIter = std::slice::Iter<'a, TrackRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
