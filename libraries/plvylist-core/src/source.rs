//! Catalog sources
//!
//! A catalog can come from three places. Exactly one is consulted per load,
//! in a fixed precedence: inline data, then a fetchable URI, then media tags
//! harvested from the host markup.

use crate::error::{CatalogLoadError, Result};
use crate::types::{Catalog, TrackRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Where the next catalog comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Records supplied directly by the host
    Inline(Vec<TrackRecord>),

    /// URI of a JSON document with a `tracks` array
    Remote(String),

    /// Declarative `<audio>`/`<source>` tags found in the host markup
    Markup(Vec<MediaTag>),
}

impl CatalogSource {
    /// Pick the single source to consult
    ///
    /// Inline data wins over a URI, which wins over markup. Blank URIs and
    /// empty tag lists count as absent. Inline data is taken even when empty
    /// so the caller gets an explicit `Empty` error rather than a silent
    /// fallback.
    pub fn resolve(
        inline: Option<Vec<TrackRecord>>,
        uri: Option<&str>,
        markup: Vec<MediaTag>,
    ) -> Option<Self> {
        if let Some(tracks) = inline {
            return Some(Self::Inline(tracks));
        }

        if let Some(uri) = uri.map(str::trim).filter(|u| !u.is_empty()) {
            return Some(Self::Remote(uri.to_string()));
        }

        if !markup.is_empty() {
            return Some(Self::Markup(markup));
        }

        None
    }

    /// Build a catalog without I/O
    ///
    /// `Remote` sources need a fetch and are handed back unchanged as the
    /// error side so the caller can route them to a loader.
    pub fn into_local_catalog(self) -> std::result::Result<Result<Catalog>, String> {
        match self {
            Self::Inline(tracks) => Ok(Catalog::new(tracks)),
            Self::Markup(tags) => Ok(harvest(&tags)),
            Self::Remote(uri) => Err(uri),
        }
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Inline(_) => "inline",
            Self::Remote(_) => "remote",
            Self::Markup(_) => "markup",
        }
    }
}

/// Attributes of one declarative media tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTag {
    attributes: BTreeMap<String, String>,
}

impl MediaTag {
    /// Empty tag
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute setter; names are matched case-insensitively
    pub fn with_attribute(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set an attribute; names are matched case-insensitively
    pub fn set_attribute(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.attributes
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Attribute value, ignoring blank values
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn owned(&self, name: &str) -> Option<String> {
        self.attribute(name).map(str::to_string)
    }

    /// Convert to a track record; `None` when the tag has no `src`
    pub fn to_track(&self) -> Option<TrackRecord> {
        let file = self.owned("src")?;

        Some(TrackRecord {
            file,
            title: self.owned("title").or_else(|| self.owned("data-title")),
            artist: self.owned("data-artist"),
            artist_url: self.owned("data-artist-url"),
            album: self.owned("data-album"),
            album_url: self.owned("data-album-url"),
            artwork: self.owned("data-artwork"),
        })
    }
}

/// Harvest a catalog from declarative media tags
pub fn harvest(tags: &[MediaTag]) -> Result<Catalog> {
    let mut tracks = Vec::with_capacity(tags.len());

    for (position, tag) in tags.iter().enumerate() {
        match tag.to_track() {
            Some(track) => tracks.push(track),
            None => warn!(position, "Skipping media tag without src"),
        }
    }

    debug!(found = tracks.len(), tags = tags.len(), "Harvested markup tracks");

    if tracks.is_empty() {
        return Err(CatalogLoadError::Empty);
    }

    Catalog::new(tracks)
}
