//! Engine-facing controller
//!
//! Thin wrapper that owns the pure state machine plus the session
//! context (score board, storage handle) and wires them together: every
//! host callback goes through here, and best-score persistence hangs
//! off the event stream instead of being sprinkled through the sim.

use crate::persistence::KvStore;
use crate::scores::ScoreBoard;
use crate::sim::{self, ContactBody, GameEvent, GameState};
use crate::WorldGeom;

/// One controller per game session.
///
/// All context is passed in at construction; there are no process-wide
/// singletons behind this type.
pub struct Controller {
    pub state: GameState,
    scores: ScoreBoard,
    store: Box<dyn KvStore>,
}

impl Controller {
    pub fn new(seed: u64, geom: WorldGeom, store: Box<dyn KvStore>) -> Self {
        let scores = ScoreBoard::load(store.as_ref());
        log::info!("controller ready, seed {seed}");
        Self {
            state: GameState::new(seed, geom),
            scores,
            store,
        }
    }

    /// Fixed-timestep tick
    pub fn on_tick(&mut self, dt: f32) -> Vec<GameEvent> {
        sim::tick(&mut self.state, dt)
    }

    /// Physics contact callback
    pub fn on_contact(&mut self, a: &ContactBody, b: &ContactBody) -> Vec<GameEvent> {
        let (_, mut events) = sim::on_contact(&mut self.state, a, b);
        self.track_best(&mut events);
        events
    }

    /// Primary (tap/click/space) input
    pub fn on_primary_input(&mut self) -> Vec<GameEvent> {
        sim::primary_input(&mut self.state)
    }

    /// Current score label text
    pub fn score_label(&self) -> String {
        ScoreBoard::score_label(self.state.score)
    }

    /// Current best-score label text
    pub fn best_label(&self) -> String {
        self.scores.best_label()
    }

    pub fn best(&self) -> u32 {
        self.scores.best()
    }

    /// Append a `BestScoreChanged` event (and persist) whenever a score
    /// change in the batch strictly beats the best.
    fn track_best(&mut self, events: &mut Vec<GameEvent>) {
        let scored: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ScoreChanged { score } => Some(*score),
                _ => None,
            })
            .collect();
        for score in scored {
            if let Some(best) = self.scores.record(score, self.store.as_mut()) {
                events.push(GameEvent::BestScoreChanged { best });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::scores::BEST_SCORE_KEY;
    use crate::sim::{BodyTag, ContactOutcome, GamePhase};
    use crate::consts::{SIM_DT, TERMINAL_ROLL_TICKS};
    use glam::Vec2;

    fn controller_with_best(best: i64) -> Controller {
        Controller::new(
            42,
            WorldGeom::new(Vec2::new(375.0, 667.0), 50.0, Vec2::new(34.0, 24.0)),
            Box::new(MemoryStore::with(BEST_SCORE_KEY, best)),
        )
    }

    fn bird() -> ContactBody {
        ContactBody::new(BodyTag::Bird, Vec2::new(75.0, 300.0), Vec2::new(0.0, -2.0))
    }

    fn gate() -> ContactBody {
        ContactBody::still(BodyTag::ScoreGate, Vec2::new(75.0, 333.5))
    }

    fn ground() -> ContactBody {
        ContactBody::still(BodyTag::Ground, Vec2::new(75.0, 20.0))
    }

    #[test]
    fn test_score_tracks_gate_contacts() {
        // Score equals the number of gate crossings since restart.
        let mut c = controller_with_best(0);
        for _ in 0..4 {
            c.on_contact(&bird(), &gate());
        }
        assert_eq!(c.state.score, 4);
        assert_eq!(c.score_label(), "Score:4");
    }

    #[test]
    fn test_best_written_only_on_improvement() {
        // Best starts at 5: scores 1..=5 are not improvements and
        // write nothing; 6 writes exactly once.
        let mut c = controller_with_best(5);

        for _ in 0..5 {
            let events = c.on_contact(&bird(), &gate());
            assert!(
                !events
                    .iter()
                    .any(|e| matches!(e, GameEvent::BestScoreChanged { .. }))
            );
        }
        assert_eq!(c.best(), 5);

        let events = c.on_contact(&bird(), &gate());
        assert!(events.contains(&GameEvent::BestScoreChanged { best: 6 }));
        assert_eq!(c.best(), 6);
        assert_eq!(c.best_label(), "Best Score:6");
    }

    #[test]
    fn test_best_survives_restart() {
        // Best carries over a crash/restart cycle; score resets.
        let mut c = controller_with_best(0);
        for _ in 0..3 {
            c.on_contact(&bird(), &gate());
        }
        assert_eq!(c.best(), 3);

        c.on_contact(&bird(), &ground());
        for _ in 0..TERMINAL_ROLL_TICKS {
            c.on_tick(SIM_DT);
        }
        let events = c.on_primary_input();
        assert!(events.contains(&GameEvent::ScoreChanged { score: 0 }));
        assert_eq!(c.state.score, 0);
        assert_eq!(c.best(), 3);
        assert_eq!(c.state.phase, GamePhase::Running);
    }

    #[test]
    fn test_no_scoring_while_down() {
        // Once down, gate contacts do nothing until a restart.
        let mut c = controller_with_best(0);
        c.on_contact(&bird(), &ground());
        let events = c.on_contact(&bird(), &gate());
        assert!(events.is_empty());
        assert_eq!(c.state.score, 0);

        // Classifier agrees
        let outcome = sim::classify(c.state.phase, &bird(), &gate());
        assert_eq!(outcome, ContactOutcome::Ignored);
    }

    #[test]
    fn test_labels_at_startup() {
        let c = controller_with_best(12);
        assert_eq!(c.score_label(), "Score:0");
        assert_eq!(c.best_label(), "Best Score:12");
    }
}
