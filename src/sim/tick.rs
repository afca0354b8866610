//! Fixed timestep tick, primary input, and restart
//!
//! The three entry points the host loop calls. Each completes
//! synchronously and returns the command batch for that event.

use glam::Vec2;

use super::spawn;
use super::state::{BIRD_COLLISION_MASK, GameEvent, GamePhase, GameState};
use crate::consts::FLAP_IMPULSE;

/// Advance the controller by one fixed timestep.
///
/// Counts down the terminal roll (unaffected by the scroll rate: the
/// flourish plays while the world is frozen and can't be cancelled),
/// scrolls and retires pipes, and runs the spawn timer.
pub fn tick(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    state.time_ticks += 1;
    let mut events = Vec::new();

    if let GamePhase::GameOver { rest_ticks } = &mut state.phase {
        if *rest_ticks > 0 {
            *rest_ticks -= 1;
            if *rest_ticks == 0 {
                log::debug!("bird at rest");
            }
        }
    }

    spawn::advance_and_retire(state, dt, &mut events);
    spawn::run_spawn_timer(state, dt, &mut events);

    events
}

/// Handle the primary (one-button) input.
///
/// While running, zero the bird's vertical velocity and apply one fixed
/// upward impulse, so rapid taps never stack. Once the run is over and
/// the bird is at rest, the same button restarts. Anything else - most
/// notably taps during the terminal roll - is a no-op.
pub fn primary_input(state: &mut GameState) -> Vec<GameEvent> {
    match state.phase {
        GamePhase::Running => vec![
            GameEvent::SetBirdVelocity { vel: Vec2::ZERO },
            GameEvent::BirdImpulse {
                impulse: Vec2::new(0.0, FLAP_IMPULSE),
            },
        ],
        GamePhase::GameOver { rest_ticks: 0 } => restart(state),
        GamePhase::GameOver { .. } => Vec::new(),
    }
}

/// Reset for a new run.
///
/// Only legal once the run is over and the terminal roll has finished;
/// any other call is a silent no-op. Clears the score and the live pipe
/// set, puts the bird back at its start with its full collision mask,
/// and restores the world scroll rate.
pub fn restart(state: &mut GameState) -> Vec<GameEvent> {
    if !state.phase.at_rest() {
        return Vec::new();
    }
    log::info!("restart");

    state.score = 0;
    state.pipes.clear();
    state.phase = GamePhase::Running;
    state.scroll_rate = 1.0;

    vec![
        GameEvent::ScoreChanged { score: 0 },
        GameEvent::BirdReset {
            pos: state.geom.bird_start(),
        },
        GameEvent::SetBirdCollisionMask {
            mask: BIRD_COLLISION_MASK,
        },
        GameEvent::PipesCleared,
        GameEvent::ScrollRateChanged { rate: 1.0 },
    ]
}
