//! Advisory text shown by the presentation layer
//!
//! The core only picks a line from a fixed pool; layout and styling are up to
//! whoever renders it.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// How long an advisory stays up (seconds)
pub const MESSAGE_TTL: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageCategory {
    GoalPlayer,
    GoalAi,
    BoostPickup,
    HazardHit,
    LowTime,
    Victory,
    Defeat,
    Draw,
}

impl MessageCategory {
    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            MessageCategory::GoalPlayer => &[
                "Clean strike. The field bends your way.",
                "Threaded the needle. Goal!",
                "Goal! Even the void applauds that one.",
                "Lethal angle. Opponent recalibrating.",
            ],
            MessageCategory::GoalAi => &[
                "Intercept successful. Opponent scores.",
                "Defence out of position. Regroup.",
                "They found the gap. Refuel and push.",
                "Goal against. Watch the far post.",
            ],
            MessageCategory::BoostPickup => &[
                "Boost pad collected. Full thrust online.",
                "Tanks topped up. Push the pace.",
            ],
            MessageCategory::HazardHit => &[
                "Hazard contact! Trajectory destabilised.",
                "Field interference detected.",
                "Distortion hit. Correct your heading!",
            ],
            MessageCategory::LowTime => &[
                "30 seconds left. Hold nothing back.",
                "Final stretch. Every goal matters.",
            ],
            MessageCategory::Victory => &["Mission complete. Sector record updated."],
            MessageCategory::Defeat => &["Mission failed. The drone takes this sector."],
            MessageCategory::Draw => &["Stalemate. The void stays unclaimed."],
        }
    }

    /// Pick a line from this category's pool
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        self.phrases().choose(rng).copied().unwrap_or("...")
    }
}

/// A short-lived message for the HUD
#[derive(Debug, Clone, Serialize)]
pub struct Advisory {
    pub category: MessageCategory,
    pub text: &'static str,
    /// Seconds left on screen
    pub ttl: f32,
}

impl Advisory {
    pub fn new<R: Rng + ?Sized>(category: MessageCategory, rng: &mut R) -> Self {
        Self {
            category,
            text: category.pick(rng),
            ttl: MESSAGE_TTL,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.ttl <= 0.0
    }

    pub fn tick(&mut self, dt: f32) {
        self.ttl = (self.ttl - dt).max(0.0);
    }
}
