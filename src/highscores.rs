//! High score leaderboard system
//!
//! Kept in memory; the storage layer serializes it with `to_json`/`from_json`.

use serde::{Deserialize, Serialize};

use crate::sim::RunStats;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Ticks the run lasted
    pub ticks: u64,
    /// Landings plus mid-air jumps
    pub jumps: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A run makes the board if it scored and the board has room or it beats the last entry
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0
            && (self.entries.len() < MAX_HIGH_SCORES
                || self.entries.last().is_some_and(|e| score > e.score))
    }

    /// Slot a score would take; ties rank below existing entries
    fn slot(&self, score: u64) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }

    /// 1-based rank `score` would get, if it qualifies
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.qualifies(score).then(|| self.slot(score) + 1)
    }

    /// Insert a finished run and return its 1-based rank.
    /// Entries pushed past `MAX_HIGH_SCORES` are dropped.
    pub fn add_score(&mut self, score: u64, stats: &RunStats) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let slot = self.slot(score);
        self.entries.insert(
            slot,
            HighScoreEntry {
                score,
                ticks: stats.ticks_survived,
                jumps: stats.jumps,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(slot + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The previous best to seed a session with
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse stored scores, re-sorting and trimming whatever was stored
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::debug!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }
}
