//! Track record domain type
use serde::{Deserialize, Serialize};

/// Placeholder shown wherever a track lacks a piece of metadata
pub const EMPTY_METADATA: &str = "--";

/// One playable item in a catalog
///
/// Only `file` is required. Every other field is optional display data and
/// is commonly missing; use the `display_*` helpers to get the placeholder
/// token instead of an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    /// Playback URI handed to the media resource
    pub file: String,

    /// Track title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Artist name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    /// Link to the artist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_url: Option<String>,

    /// Album name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Link to the album
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_url: Option<String>,

    /// Artwork image URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
}

/// Optional metadata fields of a [`TrackRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackField {
    /// [`TrackRecord::title`]
    Title,
    /// [`TrackRecord::artist`]
    Artist,
    /// [`TrackRecord::artist_url`]
    ArtistUrl,
    /// [`TrackRecord::album`]
    Album,
    /// [`TrackRecord::album_url`]
    AlbumUrl,
    /// [`TrackRecord::artwork`]
    Artwork,
}

impl TrackRecord {
    /// Create a record with only the playback URI set
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            title: None,
            artist: None,
            artist_url: None,
            album: None,
            album_url: None,
            artwork: None,
        }
    }

    /// Builder-style title setter
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder-style artist setter
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Builder-style album setter
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Builder-style artwork setter
    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }

    /// Value of an optional field, treating empty strings as absent
    pub fn field(&self, field: TrackField) -> Option<&str> {
        let value = match field {
            TrackField::Title => &self.title,
            TrackField::Artist => &self.artist,
            TrackField::ArtistUrl => &self.artist_url,
            TrackField::Album => &self.album,
            TrackField::AlbumUrl => &self.album_url,
            TrackField::Artwork => &self.artwork,
        };

        value.as_deref().filter(|v| !v.is_empty())
    }

    /// Title or the placeholder token
    pub fn display_title(&self) -> &str {
        self.field(TrackField::Title).unwrap_or(EMPTY_METADATA)
    }

    /// Artist or the placeholder token
    pub fn display_artist(&self) -> &str {
        self.field(TrackField::Artist).unwrap_or(EMPTY_METADATA)
    }

    /// Album or the placeholder token
    pub fn display_album(&self) -> &str {
        self.field(TrackField::Album).unwrap_or(EMPTY_METADATA)
    }
}
