//! Deterministic game state machine
//!
//! All gameplay decisions live here. This module must be pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, physics, or platform dependencies
//!
//! Each entry point is a function of (state, event) that mutates the
//! state and returns the `GameEvent` commands for the host engine.

pub mod contact;
pub mod gap;
pub mod spawn;
pub mod state;
pub mod tick;

pub use contact::{ContactOutcome, classify, on_contact};
pub use gap::gap_center;
pub use spawn::spawn_pipe;
pub use state::{
    BIRD_COLLISION_MASK, BIRD_CRASHED_COLLISION_MASK, BodySpec, BodyTag, ContactBody, ContactSide,
    GameEvent, GamePhase, GameState, Pipe, PipePlacement,
};
pub use tick::{primary_input, restart, tick};
