//! Per-frame update
//!
//! Core game loop. One call per display frame, in this order:
//! 1. Fixed-step physics while running, dispatching contacts after each step
//! 2. Tap: jump while running, start while idle
//! 3. Playfield bounds check
//! 4. Spawn timer
//! 5. Trunk scroll and cull

use super::contact::ContactAction;
use super::state::{GameEvent, GameState, LossCause};
use crate::consts::*;

/// Input sampled once per frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// A tap/click/key press happened this frame
    pub tap: bool,
}

/// Advance the session by one display frame of `frame_dt` seconds
pub fn update(state: &mut GameState, input: &TickInput, frame_dt: f32) {
    state.events.clear();
    state.frame_count += 1;

    let frame_dt = frame_dt.clamp(0.0, MAX_FRAME_TIME);
    state.last_y = state.player_position().y;
    let was_running = state.is_running();

    if was_running {
        state.stepper.accumulate(frame_dt);
        while state.is_running() && state.stepper.consume_step() {
            physics_step(state);
        }
    }

    if input.tap {
        if !was_running {
            state.start();
        } else if state.is_running() {
            state.jump();
        }
        // A tap in the frame that lost the run is dropped; Idle stays
        // observable for at least one frame.
    }

    if !(was_running && state.is_running()) {
        return;
    }

    let (low, high) = state.settings.vertical_bounds();
    let y = state.player_position().y;
    if y < low || y > high {
        state.game_over(LossCause::OutOfBounds);
        return;
    }

    for _ in 0..state.spawner.advance(frame_dt) {
        state.spawn_trunk();
    }

    scroll_trunks(state, frame_dt);
}

/// Run one fixed physics step and react to its contacts.
///
/// Contacts arrive sorted by body id. A barrier contact ends the run at
/// once; contacts after it in the same step are dropped.
pub fn physics_step(state: &mut GameState) {
    let contacts = state
        .world
        .step(SIM_DT, VELOCITY_ITERATIONS, POSITION_ITERATIONS);

    for contact in contacts {
        match contact.rule.action {
            ContactAction::GameOver => {
                state.game_over(LossCause::Collision);
                return;
            }
            ContactAction::Score if contact.began => state.add_point(),
            ContactAction::Score | ContactAction::None => {}
        }
    }
}

/// Move every trunk left and cull the ones that left the screen
fn scroll_trunks(state: &mut GameState, frame_dt: f32) {
    let dx = state.settings.scroll_speed * frame_dt;

    for mut trunk in std::mem::take(&mut state.trunks) {
        trunk.move_x(&mut state.world, trunk.x() - dx);

        if trunk.is_off_screen() {
            log::debug!("Culled trunk {}", trunk.id);
            state.events.push(GameEvent::TrunkCulled { id: trunk.id });
            trunk.destroy(&mut state.world);
        } else {
            state.trunks.push(trunk);
        }
    }
}
