//! Best goals-per-level record
//!
//! Kept in memory for the life of the process. The runner can persist it as
//! JSON between runs.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::levels::LevelId;

/// Highest total goals (player + AI) seen in a finished match, per level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScores {
    pub by_level: BTreeMap<LevelId, u32>,
}

impl BestScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best total for a level (0 if never played)
    pub fn get(&self, level: LevelId) -> u32 {
        self.by_level.get(&level).copied().unwrap_or(0)
    }

    /// Record a finished match. Returns true if it set a new best.
    pub fn record(&mut self, level: LevelId, total_goals: u32) -> bool {
        let best = self.by_level.entry(level).or_insert(0);
        if total_goals > *best {
            *best = total_goals;
            true
        } else {
            false
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_level.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load best scores from a JSON file; a missing file is an empty record
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let scores = Self::from_json(&json)?;
                log::info!("Loaded best scores for {} levels", scores.by_level.len());
                Ok(scores)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No best scores found, starting fresh");
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Best scores saved ({} levels)", self.by_level.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_maximum() {
        let mut scores = BestScores::new();
        let level = LevelId::new(2).unwrap();
        assert_eq!(scores.get(level), 0);
        assert!(scores.record(level, 4));
        assert!(!scores.record(level, 3));
        assert!(!scores.record(level, 4));
        assert_eq!(scores.get(level), 4);
        assert!(scores.record(level, 7));
        assert_eq!(scores.get(level), 7);
    }

    #[test]
    fn test_zero_goal_match_does_not_count_as_best() {
        let mut scores = BestScores::new();
        assert!(!scores.record(LevelId::FIRST, 0));
        assert_eq!(scores.get(LevelId::FIRST), 0);
    }

    #[test]
    fn test_json_round_trip_keeps_levels() {
        let mut scores = BestScores::new();
        scores.record(LevelId::new(1).unwrap(), 5);
        scores.record(LevelId::new(4).unwrap(), 2);
        let restored = BestScores::from_json(&scores.to_json().unwrap()).unwrap();
        assert_eq!(restored, scores);
    }

    #[test]
    fn test_json_rejects_unknown_level() {
        assert!(BestScores::from_json(r#"{"by_level":{"9":3}}"#).is_err());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let scores = BestScores::load("/nonexistent/cosmic_league_best.json").unwrap();
        assert!(scores.is_empty());
    }
}
