//! Session settings
//!
//! Defaults reproduce the fixed loadout and limits of the game; the headless
//! driver can override them from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SimError;
use crate::consts::{MAX_PROJECTILES, SCREEN_HEIGHT, SCREEN_WIDTH, STAR_COUNT};
use crate::sim::items::{ItemKind, LOADOUT};

/// Default RNG seed for a session
pub const DEFAULT_SEED: u64 = 0x504F_4C59;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the session RNG (effect rolls, jitter, star placement)
    pub seed: u64,
    /// Equipped items in order; duplicates stack
    pub loadout: Vec<ItemKind>,
    /// Soft cap on live projectiles
    pub max_projectiles: usize,
    /// Number of parallax stars
    pub star_count: usize,
    /// Screen layer size used for star wrapping
    pub width: f32,
    pub height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            loadout: LOADOUT.to_vec(),
            max_projectiles: MAX_PROJECTILES,
            star_count: STAR_COUNT,
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

impl Settings {
    /// Same defaults with a different seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings = serde_json::from_str(json)?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
