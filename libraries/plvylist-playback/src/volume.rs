//! Volume state mirrored from the media element
//!
//! Level and mute are independent: muting keeps the level so unmuting
//! restores it. The slider and the icon show the effective level.

use serde::{Deserialize, Serialize};

/// Level at or below which the low-volume icon is shown
pub const LOW_VOLUME_THRESHOLD: f64 = 0.45;

/// Which volume icon to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeTier {
    Off,
    Low,
    Mid,
}

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0-1)
    level: f64,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller, clamping `level` to `[0, 1]`
    pub fn new(level: f64) -> Self {
        Self {
            level: clamp_level(level),
            muted: false,
        }
    }

    /// Set volume level (0-1)
    pub fn set_level(&mut self, level: f64) {
        self.level = clamp_level(level);
    }

    /// Get current volume level (0-1)
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Set mute state
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level shown on the slider: 0 while muted
    pub fn display_level(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    /// Icon tier for the current state
    pub fn tier(&self) -> VolumeTier {
        let level = self.display_level();

        if level <= 0.0 {
            VolumeTier::Off
        } else if level <= LOW_VOLUME_THRESHOLD {
            VolumeTier::Low
        } else {
            VolumeTier::Mid
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.5)
    }
}

fn clamp_level(level: f64) -> f64 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
