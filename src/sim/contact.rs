//! Contact classification and the scoring/game-over transitions
//!
//! `classify` is a pure function of (phase, contact pair); `on_contact`
//! applies the classified outcome to the state and emits the commands
//! the host needs to mirror it.

use std::f32::consts::PI;

use super::state::{ContactBody, ContactSide, GameEvent, GamePhase, GameState};
use super::state::{BIRD_CRASHED_COLLISION_MASK, BodyTag};
use crate::consts::{ROLL_ANGLE_PER_UNIT_Y, TERMINAL_ROLL_SECS, TERMINAL_ROLL_TICKS};

/// Outcome of one contact event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// The bird crossed a score gate
    ScoreUp,
    /// The bird touched a gem; `removed` names the side to take out of
    /// the scene, if any
    GemPickup { removed: Option<ContactSide> },
    /// Fatal contact (ground or pipe)
    Crash,
    /// Contact arrived after the run already ended
    Ignored,
}

/// Classify a contact pair without touching any state.
///
/// Precedence: a finished run ignores everything; score gates beat
/// gems; anything else is fatal.
pub fn classify(phase: GamePhase, a: &ContactBody, b: &ContactBody) -> ContactOutcome {
    if !phase.is_running() {
        return ContactOutcome::Ignored;
    }

    if a.tag == BodyTag::ScoreGate || b.tag == BodyTag::ScoreGate {
        return ContactOutcome::ScoreUp;
    }

    if a.tag == BodyTag::Gem || b.tag == BodyTag::Gem {
        return ContactOutcome::GemPickup {
            removed: gem_removal_side(a, b),
        };
    }

    ContactOutcome::Crash
}

/// Pick which side of a gem contact gets removed.
///
/// The moving side (vertical velocity != 0) survives and its still
/// counterpart is removed, which models the bird striking a pre-placed
/// gem. Two still bodies remove nothing. If both sides report motion
/// the gem side is removed; the bird is never a removal target.
fn gem_removal_side(a: &ContactBody, b: &ContactBody) -> Option<ContactSide> {
    let a_moving = a.vel.y != 0.0;
    let b_moving = b.vel.y != 0.0;
    match (a_moving, b_moving) {
        (true, false) => Some(ContactSide::B),
        (false, true) => Some(ContactSide::A),
        (true, true) => {
            if a.tag == BodyTag::Gem {
                Some(ContactSide::A)
            } else {
                Some(ContactSide::B)
            }
        }
        (false, false) => {
            log::debug!("gem contact with both sides still; nothing removed");
            None
        }
    }
}

/// Classify a contact and apply its effects.
///
/// A crash is one atomic transition: the phase flips, the world scroll
/// rate drops to zero, the bird's collision mask shrinks to the ground,
/// and the terminal roll starts. The roll angle is proportional to the
/// bird's height at impact; the world stops instantly but the bird is
/// only at rest once the roll's tick countdown finishes.
pub fn on_contact(
    state: &mut GameState,
    a: &ContactBody,
    b: &ContactBody,
) -> (ContactOutcome, Vec<GameEvent>) {
    let outcome = classify(state.phase, a, b);
    let mut events = Vec::new();

    match outcome {
        ContactOutcome::Ignored => {}
        ContactOutcome::ScoreUp => {
            state.score += 1;
            log::info!("score up -> {}", state.score);
            events.push(GameEvent::ScoreChanged { score: state.score });
        }
        ContactOutcome::GemPickup { removed } => {
            if let Some(side) = removed {
                events.push(GameEvent::RemoveContactBody { side });
            }
        }
        ContactOutcome::Crash => {
            let bird = if a.tag == BodyTag::Bird { a } else { b };
            log::info!("game over at score {}", state.score);

            state.phase = GamePhase::GameOver {
                rest_ticks: TERMINAL_ROLL_TICKS,
            };
            state.scroll_rate = 0.0;
            events.push(GameEvent::ScrollRateChanged { rate: 0.0 });
            events.push(GameEvent::SetBirdCollisionMask {
                mask: BIRD_CRASHED_COLLISION_MASK,
            });
            events.push(GameEvent::BirdRoll {
                angle: PI * bird.pos.y * ROLL_ANGLE_PER_UNIT_Y,
                duration: TERMINAL_ROLL_SECS,
            });
        }
    }

    (outcome, events)
}
