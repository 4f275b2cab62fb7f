//! High score tracking
//!
//! A single best score, kept across restarts within the process and
//! persisted to a plain-text file between sessions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Best score ever observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    /// Highest score seen so far
    pub best: u64,
    /// Best score at the start of the current run
    baseline: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self {
            best,
            baseline: best,
        }
    }

    /// Raise the best score if `score` beats it; returns true when raised
    pub fn observe(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// True if `score` beats the best held when the run began
    pub fn is_new_record(&self, score: u64) -> bool {
        score > self.baseline
    }

    /// Start a new run against the current best
    pub fn begin_run(&mut self) {
        self.baseline = self.best;
    }

    /// Load from disk; any failure counts as no high score
    pub fn load(path: &Path) -> Self {
        match persistence::load_high_score(path) {
            Ok(best) => {
                log::info!("Loaded high score {}", best);
                Self::new(best)
            }
            Err(e) => {
                log::warn!("No high score loaded ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Best-effort save; failures are logged and otherwise ignored
    pub fn save(&self, path: &Path) {
        match persistence::save_high_score(path, self.best) {
            Ok(()) => log::info!("High score {} saved", self.best),
            Err(e) => log::warn!("Failed to save high score to {}: {}", path.display(), e),
        }
    }
}
