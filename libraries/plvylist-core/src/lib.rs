//! Plvylist Core
//!
//! Platform-agnostic catalog types and error handling for the Plvylist player.
//!
//! This crate provides the data the playback session works on:
//! - **Domain Types**: `TrackRecord`, `Catalog`, `TrackField`
//! - **Catalog Sources**: inline data, fetch-by-URI and harvested markup,
//!   consulted in a fixed precedence
//! - **Shuffle**: Fisher-Yates permutation of a catalog
//! - **Error Handling**: `CatalogLoadError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use plvylist_core::{Catalog, TrackField};
//!
//! let catalog = Catalog::from_json(r#"{
//!     "tracks": [
//!         { "file": "one.mp3", "title": "One", "artist": "Someone" },
//!         { "file": "two.mp3", "title": "Two" }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(catalog.len(), 2);
//! assert!(catalog.has_field(TrackField::Artist));
//! assert!(!catalog.has_field(TrackField::Album));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod shuffle;
pub mod source;
pub mod types;

pub use error::{CatalogLoadError, Result};
pub use shuffle::{shuffle_tracks, shuffle_tracks_with};
pub use source::{harvest, CatalogSource, MediaTag};
pub use types::{Catalog, TrackField, TrackRecord, EMPTY_METADATA};
