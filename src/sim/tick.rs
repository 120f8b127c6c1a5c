//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically:
//! integrate → screen bounds → paddle → bricks → powerups → removals.

use rand::Rng;

use super::collision::overlaps_rect;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal pointer position in world units (paddle centre)
    pub pointer_x: Option<f32>,
    /// Pause toggle
    pub pause: bool,
    /// Rebuild the level from the same seed
    pub restart: bool,
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.restart {
        state.restart();
        return;
    }

    if input.pause {
        state.paused = !state.paused;
        log::debug!("Paused: {}", state.paused);
    }

    // Only gameplay pauses; the caller keeps rendering
    if state.paused {
        return;
    }

    state.time_ticks += 1;
    let world_width = state.settings.world_width;
    let world_height = state.settings.world_height;

    // Paddle tracks the pointer
    if let Some(x) = input.pointer_x {
        state.paddle.follow(x, world_width);
    }
    state.paddle.update(dt);
    state.paddle.clamp(world_width);

    // Integrate all moving bodies before any collision check
    state.ball.integrate(dt);
    for powerup in &mut state.powerups {
        powerup.body.integrate(dt);
        powerup.animator.advance(dt);
    }

    // Screen edges
    if state.ball.clamp_to_bounds(world_width, world_height) {
        state.events.push(GameEvent::BallHitWall);
    }

    // Paddle
    if state.ball.hits_paddle(&state.paddle, true) {
        state.events.push(GameEvent::BallHitPaddle);
    }

    // Bricks, in insertion order
    let bounce_off = !state.settings.thru_ball;
    let mut destroyed = Vec::new();
    let mut drop_sites = Vec::new();
    for brick in &state.bricks {
        if state.ball.hits_brick(&brick.rect(), bounce_off) {
            destroyed.push(brick.id);
            state.events.push(GameEvent::BrickDestroyed {
                id: brick.id,
                pos: brick.body.pos,
            });
            if state.rng.random_bool(state.settings.powerup_chance) {
                drop_sites.push(brick.body.clone());
            }
        }
    }
    state.bricks.retain(|b| !destroyed.contains(&b.id));

    for site in &drop_sites {
        match state.spawn_powerup(site).map(|p| (p.id, p.kind())) {
            Ok((id, Some(kind))) => state.events.push(GameEvent::PowerupSpawned { id, kind }),
            Ok((id, None)) => log::warn!("Powerup {} has no known kind", id),
            Err(e) => log::warn!("Powerup spawn failed: {}", e),
        }
    }

    // Powerups, in insertion order
    let paddle_rect = state.paddle.rect();
    let mut removed = Vec::new();
    for powerup in &state.powerups {
        if overlaps_rect(&powerup.rect(), &paddle_rect) {
            if let Some(kind) = powerup.kind() {
                kind.apply(&mut state.paddle);
                state.events.push(GameEvent::PowerupCollected {
                    id: powerup.id,
                    kind,
                });
            }
            removed.push(powerup.id);
        } else if powerup.body.pos.y + powerup.body.height() < 0.0 {
            state.events.push(GameEvent::PowerupMissed { id: powerup.id });
            removed.push(powerup.id);
        }
    }
    state.powerups.retain(|p| !removed.contains(&p.id));

    if state.phase == GamePhase::Playing && state.bricks.is_empty() {
        state.phase = GamePhase::Cleared;
        state.events.push(GameEvent::LevelCleared);
        log::info!("Level cleared after {} ticks", state.time_ticks);
    }
}
