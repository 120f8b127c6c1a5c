//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order for bricks and powerups)
//! - No rendering, audio or platform dependencies

pub mod anim;
pub mod body;
pub mod collision;
pub mod shapes;
pub mod state;
pub mod tick;

pub use anim::{Animation, AnimationError, AnimationSet, Animator};
pub use body::Body;
pub use collision::{
    SIGNIFICANT_DEPTH, bounce_off_paddle, overlaps_poly, overlaps_rect, paddle_bounce_angle,
    resolve_circle_rect,
};
pub use shapes::{Circle, Mtv, Polygon, Rect, segments_intersect};
pub use state::{
    Ball, Brick, BrickColor, GameEvent, GamePhase, GameState, Paddle, Powerup, PowerupKind,
    Prototype,
};
pub use tick::{TickInput, tick};
