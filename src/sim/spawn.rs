//! Pipe spawning and retirement
//!
//! Builds full placement data for each new column and keeps the live
//! set bounded by retiring columns that scroll off the left edge.

use glam::Vec2;

use super::gap;
use super::state::{BodySpec, BodyTag, GameEvent, GameState, Pipe, PipePlacement};
use crate::consts::*;

/// Construct placement data for a column with the given gap center.
///
/// Geometry mirrors the visible layout: barriers fill everything above
/// and below the gap, the score gate sits half a bird past the column
/// spanning the full screen height, and a gem (when present) leads the
/// column by `GEM_LEAD_WIDTHS` pipe widths inside the gap.
pub fn build_placement(
    state: &GameState,
    id: u32,
    gap_center: f32,
    gem_fraction: Option<f32>,
) -> PipePlacement {
    let geom = state.geom;
    let screen_h = geom.screen.y;
    let gap_h = geom.gap_height();
    let gap_bottom = gap_center - gap_h / 2.0;
    let gap_top = gap_center + gap_h / 2.0;
    let bird_bit = BodyTag::Bird.bit();

    let lower = BodySpec {
        tag: BodyTag::Pipe,
        offset: Vec2::new(0.0, gap_bottom / 2.0),
        size: Vec2::new(geom.pipe_w, gap_bottom),
        contact_test: bird_bit,
    };
    let upper = BodySpec {
        tag: BodyTag::Pipe,
        offset: Vec2::new(0.0, (gap_top + screen_h) / 2.0),
        size: Vec2::new(geom.pipe_w, screen_h - gap_top),
        contact_test: bird_bit,
    };
    let gate = BodySpec {
        tag: BodyTag::ScoreGate,
        offset: Vec2::new(geom.pipe_w + geom.bird_size.x / 2.0, screen_h / 2.0),
        size: Vec2::new(geom.pipe_w, screen_h),
        contact_test: bird_bit,
    };
    let gem = gem_fraction.map(|frac| BodySpec {
        tag: BodyTag::Gem,
        offset: Vec2::new(
            -geom.pipe_w * GEM_LEAD_WIDTHS,
            gap_bottom + gap_h * frac,
        ),
        size: geom.bird_size,
        contact_test: bird_bit,
    });

    PipePlacement {
        id,
        x: geom.spawn_x(),
        gap_center,
        gap_height: gap_h,
        lower,
        upper,
        gate,
        gem,
    }
}

/// Spawn one pipe column: draw its gap, roll for a gem, record it, and
/// emit the placement for the host.
pub fn spawn_pipe(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let id = state.next_pipe_id();
    let screen_h = state.geom.screen.y;
    let gap_h = state.geom.gap_height();

    let gap_center = gap::gap_center(&mut state.rng, screen_h, gap_h);
    let gem_fraction = gap::gem_roll(&mut state.rng).then(|| gap::gem_fraction(&mut state.rng));

    let placement = build_placement(state, id, gap_center, gem_fraction);
    log::debug!(
        "spawn pipe {} gap_center={:.1} gem={}",
        id,
        gap_center,
        placement.gem.is_some()
    );

    state.pipes.push(Pipe {
        id,
        x: placement.x,
        gap_center,
        has_gem: placement.gem.is_some(),
        spawned_at_tick: state.time_ticks,
    });
    events.push(GameEvent::PipeSpawned { placement });
}

/// Advance live columns by one timestep and retire any that have fully
/// crossed the left edge (one pipe width past it).
pub fn advance_and_retire(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let step = state.geom.scroll_speed() * dt * state.scroll_rate;
    if step != 0.0 {
        for pipe in &mut state.pipes {
            pipe.x -= step;
        }
    }

    let retire_x = state.geom.retire_x();
    for pipe in &state.pipes {
        if pipe.x < retire_x {
            log::debug!("retire pipe {}", pipe.id);
            events.push(GameEvent::PipeRetired { id: pipe.id });
        }
    }
    state.pipes.retain(|p| p.x >= retire_x);
}

/// Run the spawn timer.
///
/// The accumulator advances in scrolled time (`dt * scroll_rate`), so a
/// crash suspends spawning by zeroing the effective rate rather than by
/// tearing the timer down; restart resumes it where it left off.
pub fn run_spawn_timer(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    state.spawn_clock += dt * state.scroll_rate;
    while state.spawn_clock >= SPAWN_INTERVAL {
        state.spawn_clock -= SPAWN_INTERVAL;
        spawn_pipe(state, events);
    }
}
