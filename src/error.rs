//! Error types for the boundaries of the core
//!
//! Inside a tick nothing fails: geometry is floored and numeric state is
//! clamped. Errors only come from level selection, AI construction and
//! file-backed settings/scores.

use thiserror::Error;

use crate::sim::ai::AiState;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("level id {0} is outside the catalog (0..{max})", max = crate::levels::LEVEL_COUNT)]
    InvalidLevel(usize),

    #[error("transition table row for {0:?} is missing or cannot be sampled")]
    InvalidTransitionTable(AiState),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
