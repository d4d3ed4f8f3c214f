//! Session settings
//!
//! Loaded from an optional JSON file; any field left out keeps its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_STARTING_LEVEL, PLAY_HEIGHT, PLAY_WIDTH};

/// Failure reading or writing a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play area ===
    /// Width of the visible play area in pixels
    pub play_width: f32,
    /// Height of the visible play area in pixels
    pub play_height: f32,

    // === Spawning ===
    /// Floor for the timed spawn interval (frames)
    pub min_spawn_interval: u32,
    /// Below this many monsters, one spawns every frame
    pub min_population: usize,
    /// Per-frame chance of a random power-up appearing
    pub powerup_chance: f64,

    // === Debug ===
    /// Level the session starts at
    pub starting_level: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,

            min_spawn_interval: 10,
            min_population: 2,
            powerup_chance: 0.001,

            starting_level: 1,
        }
    }
}

impl Settings {
    /// Replace out-of-range values with something playable
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.play_width.is_finite() && self.play_width > 0.0) {
            self.play_width = defaults.play_width;
        }
        if !(self.play_height.is_finite() && self.play_height > 0.0) {
            self.play_height = defaults.play_height;
        }
        self.min_spawn_interval = self.min_spawn_interval.max(1);
        self.powerup_chance = if self.powerup_chance.is_finite() {
            self.powerup_chance.clamp(0.0, 1.0)
        } else {
            defaults.powerup_chance
        };
        self.starting_level = self.starting_level.clamp(1, MAX_STARTING_LEVEL);
        self
    }

    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        Ok(settings.sanitized())
    }

    /// Read settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
