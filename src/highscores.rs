//! High score leaderboard
//!
//! Tracks the top 10 winning matches in memory. The simulation core only
//! emits `HighScore` events; feeding them in here, and persisting the result
//! anywhere, is the embedding application's business. The whole structure is
//! serde-derived so a persistence collaborator can store it as it likes.

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept
pub const MAX_HIGH_SCORES: usize = 10;

/// A single winning match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Winning side's final score
    pub score: u32,
    /// Match length in milliseconds
    pub duration_ms: u64,
}

/// Leaderboard sorted by score descending, shorter match breaking ties
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a score would make the board
    pub fn qualifies(&self, score: u32, duration_ms: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .map(|worst| Self::beats(score, duration_ms, worst))
            .unwrap_or(true)
    }

    /// Record a winning match; returns the 1-indexed rank if it qualified
    pub fn add_score(&mut self, score: u32, duration_ms: u64) -> Option<usize> {
        if !self.qualifies(score, duration_ms) {
            return None;
        }

        let entry = HighScoreEntry { score, duration_ms };
        let pos = self
            .entries
            .iter()
            .position(|e| Self::beats(score, duration_ms, e))
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        log::info!("high score rank {}: {} in {}ms", pos + 1, score, duration_ms);
        Some(pos + 1)
    }

    fn beats(score: u32, duration_ms: u64, other: &HighScoreEntry) -> bool {
        score > other.score || (score == other.score && duration_ms < other.duration_ms)
    }
}
