//! High score leaderboard
//!
//! Local top-10 table persisted as JSON. The remote leaderboard service is
//! an external collaborator; this is the on-device record.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Distance the run reached
    pub distance: u32,
    /// Coins banked in the run
    pub coins: u32,
    /// Biome the run ended in
    pub biome: u32,
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

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't
    /// qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a run to the leaderboard if it qualifies. Returns the rank
    /// achieved (1-indexed).
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from a JSON file; a missing or corrupt file starts
    /// a fresh table
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(err) => {
                    log::warn!("high score file unreadable ({err}), starting fresh");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("no high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save high scores as JSON
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("failed to save high scores: {err}");
                } else {
                    log::info!("high scores saved ({} entries)", self.entries.len());
                }
            }
            Err(err) => log::warn!("failed to encode high scores: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u64) -> HighScoreEntry {
        HighScoreEntry {
            score,
            distance: 100,
            coins: 5,
            biome: 1,
        }
    }

    #[test]
    fn scores_insert_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(entry(100)), Some(1));
        assert_eq!(scores.add_score(entry(300)), Some(1));
        assert_eq!(scores.add_score(entry(200)), Some(2));
        let listed: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(listed, vec![300, 200, 100]);
        assert_eq!(scores.top_score(), Some(300));
    }

    #[test]
    fn table_truncates_at_capacity() {
        let mut scores = HighScores::new();
        for s in 1..=15u64 {
            scores.add_score(entry(s * 10));
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        // The weakest surviving entry is the 10th best
        assert_eq!(scores.entries.last().map(|e| e.score), Some(60));
    }

    #[test]
    fn zero_and_weak_scores_do_not_qualify() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));
        for s in 1..=10u64 {
            scores.add_score(entry(s * 10));
        }
        assert!(!scores.qualifies(5));
        assert_eq!(scores.add_score(entry(5)), None);
        assert_eq!(scores.potential_rank(55), Some(6));
    }
}
