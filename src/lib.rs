//! Gap Glider - a one-button side-scrolling gap game core
//!
//! The crate is the game's controller, not its engine: it decides when
//! obstacles spawn, where their gaps go, how contacts are classified,
//! and when the run ends, then emits declarative commands a host engine
//! (scene graph + 2D physics + key-value storage) executes.
//!
//! Core modules:
//! - `sim`: Deterministic game state machine (spawning, scoring, game over)
//! - `controller`: Engine-facing wrapper (wires persistence and labels)
//! - `scene`: One-time scene composition data for the host
//! - `scores`: Best-score tracking and label text
//! - `persistence`: Key-value storage abstraction

pub mod controller;
pub mod persistence;
pub mod scene;
pub mod scores;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::Controller;
pub use scores::ScoreBoard;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World gravity the host physics should apply (y points up)
    pub const WORLD_GRAVITY: (f32, f32) = (0.0, -4.0);
    /// Upward impulse applied to the bird on primary input
    pub const FLAP_IMPULSE: f32 = 15.0;

    /// Seconds between pipe spawns (in scrolled time)
    pub const SPAWN_INTERVAL: f32 = 2.0;
    /// Gap height as a fraction of screen height
    pub const GAP_HEIGHT_FRACTION: f32 = 1.0 / 3.0;
    /// Height of the band the gap center is drawn from, as a fraction
    /// of screen height (centered mid-screen)
    pub const GAP_BAND_FRACTION: f32 = 1.0 / 4.0;
    /// Seconds a pipe takes to cross the screen plus both margins
    pub const PIPE_TRAVEL_SECS: f32 = 4.0;

    /// Chance that a spawned pipe carries a gem
    pub const GEM_PROBABILITY: f64 = 0.75;
    /// Gem vertical placement range, as fractions of the gap height
    pub const GEM_FRACTION_MIN: f32 = 0.3;
    pub const GEM_FRACTION_MAX: f32 = 0.7;
    /// How many pipe widths a gem leads its pipe by
    pub const GEM_LEAD_WIDTHS: f32 = 2.5;

    /// Bird start position as fractions of screen size
    pub const BIRD_START_X_FRACTION: f32 = 0.2;
    pub const BIRD_START_Y_FRACTION: f32 = 0.7;

    /// Duration of the terminal roll after a crash
    pub const TERMINAL_ROLL_SECS: f32 = 1.0;
    /// Same, in simulation ticks (1 second at 120 Hz)
    pub const TERMINAL_ROLL_TICKS: u32 = 120;
    /// Roll angle per unit of bird height at crash time (times pi)
    pub const ROLL_ANGLE_PER_UNIT_Y: f32 = 0.01;

    /// Seconds per bird flap animation frame
    pub const FLAP_FRAME_SECS: f32 = 0.2;
    /// Seconds for one ground texture width to scroll past
    pub const GROUND_LOOP_SECS: f32 = 5.0;
    /// Seconds for one cloud texture width to scroll past
    pub const CLOUD_LOOP_SECS: f32 = 20.0;
}

/// Static world geometry the controller needs to place bodies.
///
/// Screen and sprite sizes are host-owned facts; the host hands them
/// over once at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldGeom {
    /// Visible screen size in world units
    pub screen: Vec2,
    /// Pipe barrier width
    pub pipe_w: f32,
    /// Bird sprite size
    pub bird_size: Vec2,
}

impl WorldGeom {
    pub fn new(screen: Vec2, pipe_w: f32, bird_size: Vec2) -> Self {
        Self {
            screen,
            pipe_w,
            bird_size,
        }
    }

    /// Vertical gap height between a pipe's barriers
    #[inline]
    pub fn gap_height(&self) -> f32 {
        self.screen.y * consts::GAP_HEIGHT_FRACTION
    }

    /// Leftward pipe speed in world units per second
    #[inline]
    pub fn scroll_speed(&self) -> f32 {
        (self.screen.x + self.pipe_w * 2.0) / consts::PIPE_TRAVEL_SECS
    }

    /// X where new pipes spawn (two widths past the right edge)
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.screen.x + self.pipe_w * 2.0
    }

    /// X past which a pipe is fully off screen and can be retired
    #[inline]
    pub fn retire_x(&self) -> f32 {
        -self.pipe_w
    }

    /// Bird start position
    #[inline]
    pub fn bird_start(&self) -> Vec2 {
        Vec2::new(
            self.screen.x * consts::BIRD_START_X_FRACTION,
            self.screen.y * consts::BIRD_START_Y_FRACTION,
        )
    }
}
