//! Leaderboard: the top ten finished rounds, kept in a JSON file
//!
//!   - One entry per finished round: score, finish time, best combo
//!   - Sorted by score, highest first; ties keep the older entry first
//!   - Written to disk immediately after every round
//!   - A missing or unreadable file starts an empty table

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::i18n::{t, Language};

/// Number of entries kept
pub const MAX_ENTRIES: usize = 10;

/// A single finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub score: u32,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub max_combo: u32,
}

/// Manages the leaderboard file
pub struct Leaderboard {
    /// Path to the leaderboard file
    path: PathBuf,
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Open the leaderboard at `path`, loading it if the file exists
    pub fn open(path: &Path) -> Self {
        let entries = if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<Vec<ScoreEntry>>(&json) {
                    Ok(mut entries) => {
                        tracing::info!("Loaded {} leaderboard entries from {}", entries.len(), path.display());
                        Self::rank(&mut entries);
                        entries
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse leaderboard {}: {}", path.display(), e);
                        Vec::new()
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read leaderboard {}: {}", path.display(), e);
                    Vec::new()
                }
            }
        } else {
            tracing::info!("No leaderboard at {}, starting fresh", path.display());
            Vec::new()
        };

        Self {
            path: path.to_path_buf(),
            entries,
        }
    }

    /// A leaderboard that never touches the disk
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Record a finished round (timestamped now) and persist. Returns the
    /// 1-based rank if the score made the table.
    pub fn record(&mut self, score: u32, max_combo: u32) -> Option<usize> {
        self.record_at(score, max_combo, Utc::now())
    }

    pub fn record_at(&mut self, score: u32, max_combo: u32, date: DateTime<Utc>) -> Option<usize> {
        let entry = ScoreEntry { score, date, max_combo };
        self.entries.push(entry.clone());
        Self::rank(&mut self.entries);
        self.save();

        let rank = self.entries.iter().rposition(|e| *e == entry).map(|i| i + 1);
        match rank {
            Some(r) => tracing::info!("Score {} entered the leaderboard at #{}", score, r),
            None => tracing::info!("Score {} did not make the top {}", score, MAX_ENTRIES),
        }
        rank
    }

    /// Stable sort by score descending, then cut to the top ten
    fn rank(entries: &mut Vec<ScoreEntry>) {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);
    }

    /// Write the table to disk
    pub fn save(&self) {
        if self.path.as_os_str().is_empty() {
            return;
        }
        match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => {
                if let Some(parent) = self.path.parent() {
                    if let Err(e) = std::fs::create_dir_all(parent) {
                        tracing::warn!("Failed to create leaderboard directory {}: {}", parent.display(), e);
                    }
                }
                match std::fs::write(&self.path, &json) {
                    Ok(_) => tracing::debug!("Saved leaderboard to {}", self.path.display()),
                    Err(e) => tracing::error!("Failed to save leaderboard: {}", e),
                }
            }
            Err(e) => tracing::error!("Failed to serialize leaderboard: {}", e),
        }
    }

    /// Display lines, "1. 1200 points (Combo: 7) - 2026-10-18".
    /// An empty table yields the single "no scores yet" line.
    pub fn lines(&self, lang: Language) -> Vec<String> {
        if self.entries.is_empty() {
            return vec![t(lang, "leaderboard_empty").to_string()];
        }
        let points = t(lang, "leaderboard_points");
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                format!(
                    "{}. {} {} (Combo: {}) - {}",
                    i + 1,
                    e.score,
                    points,
                    e.max_combo,
                    e.date.format("%Y-%m-%d")
                )
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
