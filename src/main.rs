//! Flappy Trunks entry point
//!
//! Headless driver: runs the simulation at 60 fps with a simple autopilot
//! and logs what happens. Handy for checking tuning without a renderer.
//!
//! Usage: `flappy-trunks [settings.json] [seed] [seconds]`

use flappy_trunks::Settings;
use flappy_trunks::consts::SIM_DT;
use flappy_trunks::sim::{GameEvent, GameState, TickInput, update};

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = args.next().map(Settings::load).unwrap_or_default();
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);

    log::info!("Flappy Trunks (headless) starting with seed {}", seed);

    let mut state = GameState::new(settings, seed);
    let frames = (seconds / SIM_DT).round() as u64;
    let mut runs = 0u32;
    let mut best_run = 0u32;

    for _ in 0..frames {
        let input = TickInput {
            tap: autopilot(&state),
        };
        update(&mut state, &input, SIM_DT);

        for event in &state.events {
            match *event {
                GameEvent::GameOver { cause, score, .. } => {
                    runs += 1;
                    best_run = best_run.max(score);
                    log::info!("Run {} ended by {:?} with {} points", runs, cause, score);
                }
                GameEvent::Scored { score } => log::debug!("Point! ({})", score),
                _ => {}
            }
        }
    }

    println!(
        "{} frames (seed {}), {} finished runs, best run {}, high score {}",
        state.frame_count, state.seed, runs, best_run, state.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver in the browser
}

/// Tap to start, then flap whenever the player sinks below the next gap
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &GameState) -> bool {
    if !state.is_running() {
        return true;
    }

    let pos = state.player_position();
    let half = state.player.size() / 2.0;
    let target_y = state
        .trunks
        .iter()
        .find(|t| t.x() + t.size().x >= pos.x - half)
        .map(|t| state.settings.spawn_y() / 2.0 + t.offset_y())
        .unwrap_or(state.settings.screen_height / 2.0);

    pos.y < target_y && state.player_velocity().y <= 0.0
}
