//! Catalog domain types

mod catalog;
mod track;

pub use catalog::Catalog;
pub use track::{TrackField, TrackRecord, EMPTY_METADATA};
