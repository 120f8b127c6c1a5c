//! Rectangle Destroyer - a breakout-style brick game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `settings`: Data-driven game tuning loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions (y grows upward, origin bottom-left)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_Y: f32 = 32.0;
    pub const PADDLE_WIDTH: f32 = 96.0;
    pub const PADDLE_HEIGHT: f32 = 16.0;
    pub const PADDLE_MIN_WIDTH: f32 = 64.0;
    pub const PADDLE_MAX_WIDTH: f32 = 256.0;
    /// Width change applied by expand/shrink pickups
    pub const PADDLE_RESIZE_STEP: f32 = 32.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 16.0;
    pub const BALL_START_X: f32 = 400.0;
    pub const BALL_START_Y: f32 = 200.0;
    pub const BALL_START_ANGLE: f32 = 30.0; // degrees
    pub const BALL_START_SPEED: f32 = 300.0;
    pub const BALL_GRAVITY: f32 = -10.0;

    /// Brick grid
    pub const BRICK_WIDTH: f32 = 64.0;
    pub const BRICK_HEIGHT: f32 = 24.0;
    pub const BRICK_COLUMNS: u32 = 10;
    pub const BRICK_ROWS: u32 = 6;

    /// Powerup defaults
    pub const POWERUP_WIDTH: f32 = 32.0;
    pub const POWERUP_HEIGHT: f32 = 16.0;
    pub const POWERUP_FALL_SPEED: f32 = 100.0;
    pub const POWERUP_CHANCE: f64 = 0.20;

    /// Effectively unbounded speed cap
    pub const UNBOUNDED_SPEED: f32 = 9999.0;
}

/// Unit vector for an angle in degrees
#[inline]
pub fn dir_from_degrees(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Angle of a vector in degrees, in (-180, 180]
#[inline]
pub fn degrees_of(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

/// Rotate a point around a pivot by an angle in degrees
#[inline]
pub fn rotate_about(point: Vec2, pivot: Vec2, angle_deg: f32) -> Vec2 {
    if angle_deg == 0.0 {
        return point;
    }
    pivot + Vec2::from_angle(angle_deg.to_radians()).rotate(point - pivot)
}
