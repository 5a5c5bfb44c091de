//! Best-score bookkeeping
//!
//! A single best score lives in the key-value store. It is read when a round
//! starts and written back only when a finished round beats it. Store
//! failures never reach the game: reads fall back to 0, writes are dropped.

use crate::persistence::ScoreStore;

/// Best score persisted under one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    key: String,
    best: u64,
}

impl HighScore {
    /// Known best without touching the store
    pub fn new(key: &str, best: u64) -> Self {
        Self {
            key: key.to_string(),
            best,
        }
    }

    /// Read the best score; absent or unreadable values count as 0
    pub fn load(store: &dyn ScoreStore, key: &str) -> Self {
        let best = match store.get(key) {
            Ok(Some(best)) => {
                log::info!("Loaded high score {}", best);
                best
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("High score unavailable ({}), using 0", e);
                0
            }
        };
        Self::new(key, best)
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Whether a final score sets a new record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a final score. Returns true when it beat the previous best; the
    /// store is written only in that case and a failed write is logged.
    pub fn submit(&mut self, store: &mut dyn ScoreStore, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        match store.set(&self.key, score) {
            Ok(()) => log::info!("New high score {} saved", score),
            Err(e) => log::warn!("Could not save high score {}: {}", score, e),
        }
        true
    }
}
