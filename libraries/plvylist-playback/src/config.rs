//! Component configuration
//!
//! Hosts configure the player with HTML-style attributes
//! (`file`, `placeholder`, `starting-volume`, `starting-time`,
//! `skip-forward-time`, `skip-backward-time`) or with a JSON object. Both go
//! through the `config` crate so string attribute values are coerced into
//! the typed fields.

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Artwork shown when a track has none
pub const DEFAULT_PLACEHOLDER_ARTWORK: &str = "placeholder-artwork.svg";

/// Configuration for one player instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// URI of the catalog document (`file` attribute)
    #[serde(default, alias = "file")]
    pub track_source: Option<String>,

    /// Artwork used when a track has none (`placeholder` attribute)
    #[serde(default = "default_placeholder_artwork", alias = "placeholder")]
    pub placeholder_artwork: String,

    /// Initial volume, 0-1 (default: 0.5)
    #[serde(default = "default_starting_volume")]
    pub starting_volume: f64,

    /// Offset applied to the very first track load only (default: 0)
    #[serde(default)]
    pub starting_time: f64,

    /// Media-session skip forward step in seconds (default: 30)
    #[serde(default = "default_skip_forward", alias = "skip_forward_time")]
    pub skip_forward_seconds: f64,

    /// Media-session skip backward step in seconds (default: 10)
    #[serde(default = "default_skip_backward", alias = "skip_backward_time")]
    pub skip_backward_seconds: f64,
}

fn default_placeholder_artwork() -> String {
    DEFAULT_PLACEHOLDER_ARTWORK.to_string()
}

fn default_starting_volume() -> f64 {
    0.5
}

fn default_skip_forward() -> f64 {
    30.0
}

fn default_skip_backward() -> f64 {
    10.0
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            track_source: None,
            placeholder_artwork: default_placeholder_artwork(),
            starting_volume: default_starting_volume(),
            starting_time: 0.0,
            skip_forward_seconds: default_skip_forward(),
            skip_backward_seconds: default_skip_backward(),
        }
    }
}

/// `starting-volume` -> `starting_volume`
fn attribute_key(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

impl PlayerConfig {
    /// Load from attribute name/value pairs
    ///
    /// Unknown attributes are ignored; missing ones take their defaults. The
    /// result is validated.
    pub fn from_attributes<I, K, V>(attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut settings = config::Config::builder();

        for (name, value) in attributes {
            let value: String = value.into();
            settings = settings.set_override(attribute_key(name.as_ref()), value)?;
        }

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()
    }

    /// Load from a JSON object, e.g. `{"file": "tracks.json"}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(json, config::FileFormat::Json))
            .build()?
            .try_deserialize()?;

        config.validate()
    }

    /// Clamp out-of-range values and reject non-numbers
    pub fn validate(mut self) -> Result<Self> {
        let numbers = [
            ("starting_volume", self.starting_volume),
            ("starting_time", self.starting_time),
            ("skip_forward_seconds", self.skip_forward_seconds),
            ("skip_backward_seconds", self.skip_backward_seconds),
        ];

        for (name, value) in numbers {
            if !value.is_finite() {
                return Err(PlaybackError::Config(format!("{name} must be a finite number")));
            }
        }

        if !(0.0..=1.0).contains(&self.starting_volume) {
            warn!(volume = self.starting_volume, "Starting volume out of range, clamping");
            self.starting_volume = self.starting_volume.clamp(0.0, 1.0);
        }

        self.starting_time = self.starting_time.max(0.0);
        self.skip_forward_seconds = self.skip_forward_seconds.max(0.0);
        self.skip_backward_seconds = self.skip_backward_seconds.max(0.0);

        if self
            .track_source
            .as_deref()
            .is_some_and(|s| s.trim().is_empty())
        {
            self.track_source = None;
        }

        Ok(self)
    }
}
