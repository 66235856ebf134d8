//! Match settings and AI difficulty presets
//!
//! Persisted as JSON next to the best-score file. Missing fields fall back to
//! defaults so older files keep loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MATCH_TIME, MAX_FRAME_DT};
use crate::error::CoreError;

/// AI difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Elite,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Elite => "Elite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "elite" => Some(Difficulty::Elite),
            _ => None,
        }
    }

    /// Seconds between AI re-evaluations (before jitter)
    pub fn reaction_delay(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Medium => 0.25,
            Difficulty::Hard => 0.1,
            Difficulty::Elite => 0.0,
        }
    }

    /// Uniform aim jitter applied to AI targets (pixels)
    pub fn aim_noise(&self) -> f32 {
        match self {
            Difficulty::Easy => 30.0,
            Difficulty::Medium => 15.0,
            Difficulty::Hard => 6.0,
            Difficulty::Elite => 1.0,
        }
    }
}

/// Match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starting AI difficulty (adaptation moves it during a match)
    pub difficulty: Difficulty,
    /// Match length in seconds
    pub match_duration: f32,
    /// Frame step ceiling in seconds
    pub max_frame_dt: f32,
    /// Level highlighted when the selection screen opens
    pub start_level: usize,
    /// Where best scores are kept between runs (None = process lifetime only)
    pub best_scores_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            match_duration: MATCH_TIME,
            max_frame_dt: MAX_FRAME_DT,
            start_level: 0,
            best_scores_path: None,
        }
    }
}

impl Settings {
    /// Settings with a given difficulty and everything else default
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Frame step ceiling, never above the engine limit
    pub fn effective_max_dt(&self) -> f32 {
        self.max_frame_dt.clamp(0.0, MAX_FRAME_DT)
    }

    /// Match length, never negative
    pub fn effective_match_duration(&self) -> f32 {
        self.match_duration.max(0.0)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(CoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
