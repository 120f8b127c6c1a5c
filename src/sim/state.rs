//! Game state and core simulation types
//!
//! Entities are plain data: a `Body` for transform + physics, an optional
//! `Animator` over shared frame data, and a stable id. The game loop owns every
//! collection and removes entities by id.

use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anim::{Animation, AnimationError, AnimationSet, Animator};
use super::body::Body;
use super::collision::{bounce_off_paddle, resolve_circle_rect};
use super::shapes::{Circle, Rect};
use crate::Settings;
use crate::consts::*;

/// Seconds a destroyed brick takes to fade out (renderer effect)
pub const FADE_OUT_SECS: f32 = 0.5;
/// Seconds a spawned powerup takes to scale in (renderer effect)
pub const SCALE_IN_SECS: f32 = 0.5;
/// Seconds a paddle resize takes to complete
pub const PADDLE_RESIZE_SECS: f32 = 0.5;

pub const ANIM_PADDLE_EXPAND: &str = "paddle-expand";
pub const ANIM_PADDLE_SHRINK: &str = "paddle-shrink";

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bricks remain
    Playing,
    /// Every brick destroyed; the ball keeps bouncing
    Cleared,
}

/// Things that happened during a tick, for audio/effects/UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BallHitWall,
    BallHitPaddle,
    /// Brick removed; play a `FADE_OUT_SECS` fade at `pos`
    BrickDestroyed { id: u32, pos: Vec2 },
    /// Powerup added; play a `SCALE_IN_SECS` scale-in
    PowerupSpawned { id: u32, kind: PowerupKind },
    PowerupCollected { id: u32, kind: PowerupKind },
    /// Powerup fell off the bottom of the world
    PowerupMissed { id: u32 },
    LevelCleared,
}

/// The ball: a body plus the circle snapshots swept collision needs
#[derive(Debug, Clone)]
pub struct Ball {
    pub body: Body,
    /// Circle before the latest integration
    pub prev_circle: Circle,
    /// Circle after the latest integration
    pub curr_circle: Circle,
    pub animator: Animator,
}

impl Ball {
    pub fn new(body: Body, animator: Animator) -> Self {
        let circle = body.circle();
        Self {
            body,
            prev_circle: circle,
            curr_circle: circle,
            animator,
        }
    }

    /// Integrate, capturing the circle immediately before and after
    pub fn integrate(&mut self, dt: f32) {
        self.prev_circle = self.body.circle();
        self.body.integrate(dt);
        self.curr_circle = self.body.circle();
        self.animator.advance(dt);
    }

    /// Swept brick collision; `true` means the brick was hit
    pub fn hits_brick(&mut self, brick: &Rect, bounce_off: bool) -> bool {
        resolve_circle_rect(
            &self.prev_circle,
            &self.curr_circle,
            brick,
            &mut self.body.velocity,
            bounce_off,
        )
    }

    pub fn hits_paddle(&mut self, paddle: &Paddle, bounce_off: bool) -> bool {
        bounce_off_paddle(&mut self.body, &paddle.rect(), bounce_off)
    }

    /// Keep the ball inside the world, reflecting off each edge it crossed
    pub fn clamp_to_bounds(&mut self, width: f32, height: f32) -> bool {
        let body = &mut self.body;
        let mut hit = false;

        if body.pos.x < 0.0 {
            body.pos.x = 0.0;
            body.mult_velocity_x(-1.0);
            hit = true;
        }
        if body.pos.x + body.width() > width {
            body.pos.x = width - body.width();
            body.mult_velocity_x(-1.0);
            hit = true;
        }
        if body.pos.y < 0.0 {
            body.pos.y = 0.0;
            body.mult_velocity_y(-1.0);
            hit = true;
        }
        if body.pos.y + body.height() > height {
            body.pos.y = height - body.height();
            body.mult_velocity_y(-1.0);
            hit = true;
        }

        if hit {
            // Brick checks run against the clamped position
            self.curr_circle = self.body.circle();
        }

        hit
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub body: Body,
    /// Width still to grow (positive) or shrink (negative)
    pub pending_resize: f32,
}

impl Paddle {
    pub fn new(width: f32) -> Self {
        let mut body = Body::new(
            Vec2::new(WORLD_WIDTH / 2.0 - width / 2.0, PADDLE_Y),
            Vec2::new(width, PADDLE_HEIGHT),
        );
        body.set_rectangle_boundary();
        Self {
            body,
            pending_resize: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn width(&self) -> f32 {
        self.body.width()
    }

    /// Centre on the pointer, clamped to the world
    pub fn follow(&mut self, pointer_x: f32, world_width: f32) {
        let width = self.width();
        self.body.pos = Vec2::new(pointer_x - width / 2.0, PADDLE_Y);
        self.clamp(world_width);
    }

    pub fn clamp(&mut self, world_width: f32) {
        let width = self.width();
        if self.body.pos.x < 0.0 {
            self.body.pos.x = 0.0;
        }
        if self.body.pos.x + width > world_width {
            self.body.pos.x = world_width - width;
        }
    }

    /// Width once any queued resize has finished
    pub fn target_width(&self) -> f32 {
        self.width() + self.pending_resize
    }

    /// Queue a gradual width change; the target stays within the min/max width
    pub fn resize_by(&mut self, delta: f32) {
        let target = (self.target_width() + delta).clamp(PADDLE_MIN_WIDTH, PADDLE_MAX_WIDTH);
        self.pending_resize = target - self.width();
    }

    /// Step any queued resize at `PADDLE_RESIZE_STEP / PADDLE_RESIZE_SECS` px/s
    pub fn update(&mut self, dt: f32) {
        if self.pending_resize == 0.0 {
            return;
        }
        let rate = PADDLE_RESIZE_STEP / PADDLE_RESIZE_SECS;
        let step = self.pending_resize.clamp(-rate * dt, rate * dt);
        self.body.size.x += step;
        self.pending_resize -= step;
        self.body.set_rectangle_boundary();
    }
}

/// Row tint of a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl BrickColor {
    /// Top row first
    pub const ROWS: [BrickColor; 6] = [
        BrickColor::Red,
        BrickColor::Orange,
        BrickColor::Yellow,
        BrickColor::Green,
        BrickColor::Blue,
        BrickColor::Purple,
    ];
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub body: Body,
    pub color: BrickColor,
}

impl Brick {
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }
}

/// Power-up types, keyed by animation name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    PaddleExpand,
    PaddleShrink,
}

impl PowerupKind {
    pub fn from_animation(name: &str) -> Option<Self> {
        match name {
            ANIM_PADDLE_EXPAND => Some(PowerupKind::PaddleExpand),
            ANIM_PADDLE_SHRINK => Some(PowerupKind::PaddleShrink),
            _ => None,
        }
    }

    /// Apply to the paddle, respecting the min/max width (including queued resizes)
    pub fn apply(self, paddle: &mut Paddle) {
        let width = paddle.target_width();
        match self {
            PowerupKind::PaddleExpand if width < PADDLE_MAX_WIDTH => {
                paddle.resize_by(PADDLE_RESIZE_STEP)
            }
            PowerupKind::PaddleShrink if width > PADDLE_MIN_WIDTH => {
                paddle.resize_by(-PADDLE_RESIZE_STEP)
            }
            _ => {}
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone)]
pub struct Powerup {
    pub id: u32,
    pub body: Body,
    pub animator: Animator,
}

impl Powerup {
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn kind(&self) -> Option<PowerupKind> {
        self.animator.active_name().and_then(PowerupKind::from_animation)
    }

    /// Switch to a uniformly chosen animation from the shared set
    pub fn randomize(&mut self, rng: &mut Pcg32) -> Result<(), AnimationError> {
        let Some(name) = self.animator.set().names().choose(rng).cloned() else {
            return Ok(());
        };
        self.animator.set_active(&name)
    }
}

/// Template entity cloned into fresh instances
///
/// Physics and transform are copied; the animation set is shared.
#[derive(Debug, Clone)]
pub struct Prototype {
    pub body: Body,
    pub animator: Option<Animator>,
}

impl Prototype {
    pub fn instance_body(&self) -> Body {
        self.body.clone()
    }

    pub fn instance_animator(&self) -> Animator {
        match &self.animator {
            Some(animator) => animator.restarted(),
            None => Animator::new(Arc::new(AnimationSet::new())),
        }
    }
}

/// Complete game state (deterministic given the seed)
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Gameplay frozen (input and rendering continue)
    pub paused: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Bricks in insertion order (checked in this order)
    pub bricks: Vec<Brick>,
    /// Powerups in insertion order (checked in this order)
    pub powerups: Vec<Powerup>,
    pub brick_prototype: Prototype,
    pub powerup_prototype: Prototype,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Build a fresh level from settings
    pub fn new(settings: Settings) -> Self {
        let settings = settings.sanitized();
        let ball = new_ball(&settings);
        let brick_prototype = brick_prototype();
        let powerup_prototype = powerup_prototype(&settings);

        let mut state = Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            phase: GamePhase::Playing,
            paused: false,
            time_ticks: 0,
            paddle: Paddle::new(PADDLE_WIDTH),
            ball,
            bricks: Vec::new(),
            powerups: Vec::new(),
            brick_prototype,
            powerup_prototype,
            events: Vec::new(),
            next_id: 1,
        };

        state.build_brick_grid();
        log::info!(
            "Level ready: {} bricks, seed {}",
            state.bricks.len(),
            state.settings.seed
        );

        state
    }

    /// Rebuild the level with the same settings and seed
    pub fn restart(&mut self) {
        log::info!("Restarting level");
        *self = Self::new(self.settings.clone());
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn build_brick_grid(&mut self) {
        for (row, color) in BrickColor::ROWS.iter().enumerate().take(BRICK_ROWS as usize) {
            for col in 0..BRICK_COLUMNS {
                let mut body = self.brick_prototype.instance_body();
                body.pos = Vec2::new(
                    8.0 + 80.0 * col as f32,
                    500.0 - (BRICK_HEIGHT + 16.0) * row as f32,
                );
                body.set_rectangle_boundary();
                let id = self.next_entity_id();
                self.bricks.push(Brick {
                    id,
                    body,
                    color: *color,
                });
            }
        }
    }

    /// Clone the powerup prototype onto a brick's origin with a random kind
    pub fn spawn_powerup(&mut self, at: &Body) -> Result<&Powerup, AnimationError> {
        let mut body = self.powerup_prototype.instance_body();
        body.move_to_origin(at);
        let mut powerup = Powerup {
            id: self.next_entity_id(),
            body,
            animator: self.powerup_prototype.instance_animator(),
        };
        powerup.randomize(&mut self.rng)?;
        self.powerups.push(powerup);
        Ok(&self.powerups[self.powerups.len() - 1])
    }
}

fn new_ball(settings: &Settings) -> Ball {
    let mut body = Body::new(settings.ball_start, Vec2::splat(BALL_SIZE));
    body.set_velocity_as(settings.ball_angle, settings.ball_speed);
    body.set_acceleration_xy(0.0, settings.ball_gravity);
    body.set_max_speed(settings.ball_max_speed);
    body.set_deceleration(settings.ball_deceleration);
    body.set_ellipse_boundary();

    let animations = AnimationSet::new().with("default", Animation::still("ball.png"));
    Ball::new(body, Animator::new(Arc::new(animations)))
}

fn brick_prototype() -> Prototype {
    let mut body = Body::new(Vec2::ZERO, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT));
    body.set_origin_center();
    Prototype {
        body,
        animator: None,
    }
}

fn powerup_prototype(settings: &Settings) -> Prototype {
    let mut body = Body::new(Vec2::ZERO, Vec2::new(POWERUP_WIDTH, POWERUP_HEIGHT));
    body.set_velocity_xy(0.0, -settings.powerup_fall_speed);
    body.set_origin_center();

    let animations = AnimationSet::new()
        .with(ANIM_PADDLE_EXPAND, Animation::still("paddle-expand.png"))
        .with(ANIM_PADDLE_SHRINK, Animation::still("paddle-shrink.png"));
    Prototype {
        body,
        animator: Some(Animator::new(Arc::new(animations))),
    }
}
