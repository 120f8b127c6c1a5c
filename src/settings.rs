//! Game tuning
//!
//! Loaded from an optional JSON file; any field left out keeps its default.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Ball ===
    /// Bottom-left corner at level start
    pub ball_start: Vec2,
    /// Launch direction (degrees)
    pub ball_angle: f32,
    pub ball_speed: f32,
    /// Vertical acceleration (negative pulls down)
    pub ball_gravity: f32,
    pub ball_max_speed: f32,
    pub ball_deceleration: f32,
    /// Ball passes through bricks, destroying them without bouncing
    pub thru_ball: bool,

    // === Powerups ===
    pub powerup_fall_speed: f32,
    /// Chance a destroyed brick drops a powerup (0.0 - 1.0)
    pub powerup_chance: f64,

    /// RNG seed for reproducible runs
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            ball_start: Vec2::new(BALL_START_X, BALL_START_Y),
            ball_angle: BALL_START_ANGLE,
            ball_speed: BALL_START_SPEED,
            ball_gravity: BALL_GRAVITY,
            ball_max_speed: UNBOUNDED_SPEED,
            ball_deceleration: 0.0,
            thru_ball: false,

            powerup_fall_speed: POWERUP_FALL_SPEED,
            powerup_chance: POWERUP_CHANCE,

            seed: 0,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Clamp values the simulation cannot work with
    pub(crate) fn sanitized(mut self) -> Self {
        self.powerup_chance = self.powerup_chance.clamp(0.0, 1.0);
        self.ball_deceleration = self.ball_deceleration.max(0.0);
        self.ball_max_speed = self.ball_max_speed.max(0.0);
        self
    }
}
