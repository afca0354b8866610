//! Best-score tracking and label text
//!
//! The best score is read once at startup and written on every strict
//! improvement; ties never write.

use crate::persistence::KvStore;

/// Storage key for the persisted best score
pub const BEST_SCORE_KEY: &str = "gap_glider_best";

/// Session-long score bookkeeping
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    best: u32,
}

impl ScoreBoard {
    /// Load the persisted best score (missing or negative reads as 0)
    pub fn load(store: &dyn KvStore) -> Self {
        let best = store
            .read_int(BEST_SCORE_KEY)
            .unwrap_or(0)
            .clamp(0, u32::MAX as i64) as u32;
        log::info!("loaded best score {best}");
        Self { best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record the current score. On a strict improvement the new best
    /// is persisted immediately and returned; ties and lower scores
    /// change nothing.
    pub fn record(&mut self, score: u32, store: &mut dyn KvStore) -> Option<u32> {
        if score <= self.best {
            return None;
        }
        self.best = score;
        store.write_int(BEST_SCORE_KEY, self.best as i64);
        store.flush();
        log::info!("new best score {}", self.best);
        Some(self.best)
    }

    /// On-screen score label text
    pub fn score_label(score: u32) -> String {
        format!("Score:{score}")
    }

    /// On-screen best-score label text
    pub fn best_label(&self) -> String {
        format!("Best Score:{}", self.best)
    }
}
