//! Match result scoreboard
//!
//! Persisted as JSON, tracks the ten best match results ranked by goal
//! difference.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of records to keep
pub const MAX_RECORDS: usize = 10;

/// A single finished-match record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player_goals: u32,
    pub enemy_goals: u32,
    /// Player level at the final whistle
    pub player_level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl MatchRecord {
    /// Ranking metric: goals for minus goals against
    pub fn goal_diff(&self) -> i64 {
        self.player_goals as i64 - self.enemy_goals as i64
    }
}

/// Match scoreboard, sorted by goal difference descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Scoreboard {
    pub records: Vec<MatchRecord>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Check if a result qualifies for the board: any win qualifies while
    /// there is room, otherwise it must beat the lowest entry
    pub fn qualifies(&self, goal_diff: i64) -> bool {
        if goal_diff <= 0 {
            return false;
        }
        if self.records.len() < MAX_RECORDS {
            return true;
        }
        self.records
            .last()
            .map(|r| goal_diff > r.goal_diff())
            .unwrap_or(true)
    }

    /// Get the rank a result would achieve (1-indexed, None if it does
    /// not qualify)
    pub fn potential_rank(&self, goal_diff: i64) -> Option<usize> {
        if !self.qualifies(goal_diff) {
            return None;
        }
        let rank = self.records.iter().position(|r| goal_diff > r.goal_diff());
        Some(rank.unwrap_or(self.records.len()) + 1)
    }

    /// Add a result to the board (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add_record(&mut self, record: MatchRecord) -> Option<usize> {
        let diff = record.goal_diff();
        if !self.qualifies(diff) {
            return None;
        }

        // Insertion point, sorted descending by goal difference
        let pos = self.records.iter().position(|r| diff > r.goal_diff());
        let rank = match pos {
            Some(i) => {
                self.records.insert(i, record);
                i + 1
            }
            None => {
                self.records.push(record);
                self.records.len()
            }
        };

        self.records.truncate(MAX_RECORDS);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Best goal difference on the board (if any)
    pub fn top_diff(&self) -> Option<i64> {
        self.records.first().map(|r| r.goal_diff())
    }

    /// Load the scoreboard from a JSON file, starting fresh when the file
    /// is missing or unreadable
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Scoreboard>(&json) {
                Ok(board) => {
                    log::info!("Loaded {} match records", board.records.len());
                    board
                }
                Err(err) => {
                    log::warn!("Ignoring malformed scoreboard file: {err}");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No scoreboard found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save the scoreboard as JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Scoreboard saved ({} records)", self.records.len());
        Ok(())
    }
}
