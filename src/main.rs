//! Rectangle Destroyer entry point
//!
//! Headless native runner: loads settings, then drives the simulation with an
//! autopilot paddle and logs what happens. Rendering and input live in the host
//! engine and are not part of this binary.

use std::path::PathBuf;

use rectangle_destroyer::Settings;
use rectangle_destroyer::consts::*;
use rectangle_destroyer::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rectangle Destroyer (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(PathBuf::from);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);

    let mut settings = Settings::load_or_default(settings_path.as_deref());
    if let Ok(seed) = std::env::var("RECTANGLE_DESTROYER_SEED") {
        match seed.parse() {
            Ok(seed) => settings.seed = seed,
            Err(e) => log::warn!("Ignoring RECTANGLE_DESTROYER_SEED={}: {}", seed, e),
        }
    }

    let mut state = GameState::new(settings);
    log::info!("Game initialized with seed: {}", state.settings.seed);

    // Host frames arrive at ~50 Hz; the sim runs at a fixed 60 Hz
    let frame_dt = 1.0 / 50.0;
    let frames = (seconds / frame_dt) as u32;
    let mut accumulator = 0.0;
    let mut bricks_destroyed = 0u32;
    let mut powerups_collected = 0u32;

    'frames: for _ in 0..frames {
        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // Autopilot: keep the paddle under the ball
            let input = TickInput {
                pointer_x: Some(state.ball.body.center().x),
                ..Default::default()
            };
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;

            for event in &state.events {
                log::debug!("tick {}: {:?}", state.time_ticks, event);
                match event {
                    GameEvent::BrickDestroyed { .. } => bricks_destroyed += 1,
                    GameEvent::PowerupCollected { kind, .. } => {
                        powerups_collected += 1;
                        log::info!("Collected {:?}, paddle width {}", kind, state.paddle.width());
                    }
                    _ => {}
                }
            }

            if state.phase == GamePhase::Cleared {
                break 'frames;
            }
        }
    }

    log::info!(
        "Finished after {} ticks: {} bricks destroyed, {} remaining, {} powerups collected",
        state.time_ticks,
        bricks_destroyed,
        state.bricks.len(),
        powerups_collected
    );

    match serde_json::to_string(&state.ball.body) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize ball: {}", e),
    }
}
