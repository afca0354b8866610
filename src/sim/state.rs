//! Game state and the engine-boundary vocabulary
//!
//! Everything the host engine sees crosses through the types here:
//! contact bodies come in, `GameEvent` commands go out.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::WorldGeom;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; `rest_ticks` counts down the bird's terminal roll.
    /// The world is already frozen, the bird is at rest once it hits 0.
    GameOver { rest_ticks: u32 },
}

impl GamePhase {
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running)
    }

    /// True once the run has ended and the terminal roll has finished
    #[inline]
    pub fn at_rest(&self) -> bool {
        matches!(self, GamePhase::GameOver { rest_ticks: 0 })
    }
}

/// Collision category of a physical body. Each body carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyTag {
    Bird,
    Ground,
    Pipe,
    ScoreGate,
    Gem,
}

impl BodyTag {
    /// Category bit for the host physics masks
    #[inline]
    pub fn bit(&self) -> u32 {
        match self {
            BodyTag::Bird => 1 << 0,
            BodyTag::Ground => 1 << 1,
            BodyTag::Pipe => 1 << 2,
            BodyTag::ScoreGate => 1 << 3,
            BodyTag::Gem => 1 << 4,
        }
    }
}

/// Collision mask the bird carries while alive: it bounces off the
/// ground and pipes, everything else is contact-test only.
pub const BIRD_COLLISION_MASK: u32 = (1 << 1) | (1 << 2);
/// After a crash the bird only collides with the ground, so it can
/// fall through pipes during the terminal roll.
pub const BIRD_CRASHED_COLLISION_MASK: u32 = 1 << 1;

/// One side of a contact event, as reported by the host physics callback
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContactBody {
    pub tag: BodyTag,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl ContactBody {
    pub fn new(tag: BodyTag, pos: Vec2, vel: Vec2) -> Self {
        Self { tag, pos, vel }
    }

    /// A body that is not moving (static scenery, pre-placed gems)
    pub fn still(tag: BodyTag, pos: Vec2) -> Self {
        Self::new(tag, pos, Vec2::ZERO)
    }
}

/// Which side of a contact pair an effect applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactSide {
    A,
    B,
}

/// A rectangular body inside a pipe column, positioned relative to the
/// column anchor (the anchor starts at the spawn x, vertical origin 0,
/// and scrolls left with the world).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub tag: BodyTag,
    /// Offset of the body center from the column anchor
    pub offset: Vec2,
    pub size: Vec2,
    /// Categories whose contacts the host should report for this body
    pub contact_test: u32,
}

/// Full placement data for one pipe column: two barriers, one score
/// gate, and optionally a gem, sharing the anchor's x and gap center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipePlacement {
    pub id: u32,
    /// World x of the column anchor at spawn time
    pub x: f32,
    pub gap_center: f32,
    pub gap_height: f32,
    pub lower: BodySpec,
    pub upper: BodySpec,
    pub gate: BodySpec,
    pub gem: Option<BodySpec>,
}

/// Controller-side bookkeeping for a live pipe column.
///
/// The host owns the nodes; this record only exists so the controller
/// can retire columns once they leave the screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Current world x of the column anchor
    pub x: f32,
    pub gap_center: f32,
    pub has_gem: bool,
    /// Tick the column was spawned on
    pub spawned_at_tick: u64,
}

/// Commands and notifications emitted toward the host engine.
///
/// Every operation on the state machine returns a batch of these; the
/// host applies them in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Instantiate the bodies of a new pipe column
    PipeSpawned { placement: PipePlacement },
    /// Remove all bodies of a column that left the screen
    PipeRetired { id: u32 },
    /// Score changed (increment or restart reset)
    ScoreChanged { score: u32 },
    /// A new best score was recorded (already persisted)
    BestScoreChanged { best: u32 },
    /// Uniform rate for all scrolling layers and spawn timers (0 or 1)
    ScrollRateChanged { rate: f32 },
    /// Set the bird's velocity (used to zero it before an impulse)
    SetBirdVelocity { vel: Vec2 },
    /// Apply an impulse to the bird
    BirdImpulse { impulse: Vec2 },
    /// Play the terminal roll: rotate by `angle` radians over `duration`
    BirdRoll { angle: f32, duration: f32 },
    /// Replace the bird's collision mask
    SetBirdCollisionMask { mask: u32 },
    /// Teleport the bird to `pos` with zero velocity and rotation
    BirdReset { pos: Vec2 },
    /// Remove the node behind one side of the current contact pair
    RemoveContactBody { side: ContactSide },
    /// Remove every remaining pipe node (restart cleanup)
    PipesCleared,
}

/// Complete controller state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub geom: WorldGeom,
    pub phase: GamePhase,
    /// Points scored since the last restart
    pub score: u32,
    /// Uniform scroll/spawn rate: 1 while running, 0 after a crash
    pub scroll_rate: f32,
    /// Live pipe columns, oldest first
    pub pipes: Vec<Pipe>,
    /// Scrolled seconds accumulated toward the next spawn
    pub spawn_clock: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seeded RNG for gap placement and gem rolls
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed and world geometry
    pub fn new(seed: u64, geom: WorldGeom) -> Self {
        Self {
            seed,
            geom,
            phase: GamePhase::Running,
            score: 0,
            scroll_rate: 1.0,
            pipes: Vec::new(),
            // First column spawns on the first tick
            spawn_clock: SPAWN_INTERVAL,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new pipe column ID
    pub fn next_pipe_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_geom() -> WorldGeom {
        WorldGeom::new(Vec2::new(375.0, 667.0), 50.0, Vec2::new(34.0, 24.0))
    }

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7, test_geom());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.scroll_rate, 1.0);
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_phase_at_rest() {
        assert!(!GamePhase::Running.at_rest());
        assert!(!GamePhase::GameOver { rest_ticks: 10 }.at_rest());
        assert!(GamePhase::GameOver { rest_ticks: 0 }.at_rest());
    }

    #[test]
    fn test_tags_are_disjoint_bits() {
        let tags = [
            BodyTag::Bird,
            BodyTag::Ground,
            BodyTag::Pipe,
            BodyTag::ScoreGate,
            BodyTag::Gem,
        ];
        let mut seen = 0u32;
        for tag in tags {
            assert_eq!(seen & tag.bit(), 0);
            seen |= tag.bit();
        }
    }

    #[test]
    fn test_geom_derived_values() {
        let geom = test_geom();
        // Gap is a third of the screen, spawn two widths past the edge
        assert!((geom.gap_height() - 667.0 / 3.0).abs() < 0.001);
        assert!((geom.spawn_x() - 475.0).abs() < 0.001);
        assert!((geom.retire_x() + 50.0).abs() < 0.001);
        // Crossing spawn_x to retire_x takes PIPE_TRAVEL_SECS plus one
        // trailing width at constant speed
        let speed = geom.scroll_speed();
        assert!(speed > 0.0);
        assert!((speed - 475.0 / 4.0).abs() < 0.001);
    }
}
