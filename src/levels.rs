//! Static level catalog
//!
//! Five arenas, loaded once and never mutated. Everything that varies per
//! level (anomaly kinds, counts, hazards, palette) is read from here by the
//! arena generator and the presentation layer.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of levels in the catalog
pub const LEVEL_COUNT: usize = 5;

/// An RGB triple, passed through to the presentation layer untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Kinds of gravity anomaly a level may spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyKind {
    BlackHole,
    Repulsor,
    Nebula,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::BlackHole => "black_hole",
            AnomalyKind::Repulsor => "repulsor",
            AnomalyKind::Nebula => "nebula",
        }
    }
}

/// Hazard families a level may enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    CrystalShards,
    /// Tag for the asteroid field; adds nothing beyond the asteroids
    SpinningRocks,
    GravityCorridors,
    PulseRings,
    LightningNodes,
}

impl HazardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::CrystalShards => "crystal_shards",
            HazardKind::SpinningRocks => "spinning_rocks",
            HazardKind::GravityCorridors => "gravity_corridors",
            HazardKind::PulseRings => "pulse_rings",
            HazardKind::LightningNodes => "lightning_nodes",
        }
    }
}

/// Immutable per-level configuration
#[derive(Debug, Clone, Serialize)]
pub struct LevelConfig {
    pub id: usize,
    pub name: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub bg: Rgb,
    /// Player-side color (also the ball glow)
    pub accent: Rgb,
    /// AI-side color
    pub accent2: Rgb,
    pub star_color: Rgb,
    pub anomaly_kinds: &'static [AnomalyKind],
    pub max_anomalies: usize,
    pub max_asteroids: usize,
    pub hazards: &'static [HazardKind],
}

impl LevelConfig {
    pub fn has_hazard(&self, kind: HazardKind) -> bool {
        self.hazards.contains(&kind)
    }
}

pub static LEVELS: [LevelConfig; LEVEL_COUNT] = [
    LevelConfig {
        id: 0,
        name: "LUNAR COLOSSEUM",
        subtitle: "The ancient arena of the moon",
        description: "Zero gravity, crater rings, classic arena",
        bg: Rgb(6, 8, 18),
        accent: Rgb(180, 200, 255),
        accent2: Rgb(100, 120, 200),
        star_color: Rgb(220, 225, 255),
        anomaly_kinds: &[AnomalyKind::Repulsor],
        max_anomalies: 1,
        max_asteroids: 0,
        hazards: &[],
    },
    LevelConfig {
        id: 1,
        name: "NEBULA RIFT",
        subtitle: "Lost in the gas clouds of Orion",
        description: "Nebula drag zones, crystal obstacles, dual tone",
        bg: Rgb(4, 0, 18),
        accent: Rgb(0, 255, 200),
        accent2: Rgb(200, 0, 255),
        star_color: Rgb(180, 100, 255),
        anomaly_kinds: &[AnomalyKind::Nebula, AnomalyKind::Repulsor],
        max_anomalies: 3,
        max_asteroids: 0,
        hazards: &[HazardKind::CrystalShards],
    },
    LevelConfig {
        id: 2,
        name: "ASTEROID GRAVEYARD",
        subtitle: "Ruins of a shattered world",
        description: "Dense asteroid field, spinning debris, high chaos",
        bg: Rgb(12, 6, 0),
        accent: Rgb(255, 140, 40),
        accent2: Rgb(160, 80, 20),
        star_color: Rgb(255, 200, 120),
        anomaly_kinds: &[AnomalyKind::Repulsor],
        max_anomalies: 2,
        max_asteroids: 5,
        hazards: &[HazardKind::SpinningRocks],
    },
    LevelConfig {
        id: 3,
        name: "BLACK HOLE STATION",
        subtitle: "Event horizon, point of no return",
        description: "Black holes, gravity corridors, maximum danger",
        bg: Rgb(8, 0, 2),
        accent: Rgb(255, 40, 80),
        accent2: Rgb(180, 0, 80),
        star_color: Rgb(255, 100, 120),
        anomaly_kinds: &[AnomalyKind::BlackHole],
        max_anomalies: 2,
        max_asteroids: 2,
        hazards: &[HazardKind::GravityCorridors],
    },
    LevelConfig {
        id: 4,
        name: "PULSAR CORE",
        subtitle: "The beating heart of a neutron star",
        description: "Pulse rings, lightning nodes, neon grid",
        bg: Rgb(0, 8, 18),
        accent: Rgb(0, 240, 255),
        accent2: Rgb(255, 240, 0),
        star_color: Rgb(100, 220, 255),
        anomaly_kinds: &[AnomalyKind::Repulsor, AnomalyKind::Nebula],
        max_anomalies: 2,
        max_asteroids: 1,
        hazards: &[HazardKind::PulseRings, HazardKind::LightningNodes],
    },
];

/// A level id known to be inside the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct LevelId(usize);

impl LevelId {
    pub const FIRST: LevelId = LevelId(0);

    /// Validate a raw level index
    pub fn new(id: usize) -> Result<Self, CoreError> {
        if id < LEVEL_COUNT {
            Ok(Self(id))
        } else {
            Err(CoreError::InvalidLevel(id))
        }
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn config(self) -> &'static LevelConfig {
        &LEVELS[self.0]
    }

    /// Next level, wrapping around the catalog
    pub fn next(self) -> Self {
        Self((self.0 + 1) % LEVEL_COUNT)
    }

    /// Previous level, wrapping around the catalog
    pub fn prev(self) -> Self {
        Self((self.0 + LEVEL_COUNT - 1) % LEVEL_COUNT)
    }

    /// Seed for this level's arena layout
    pub fn layout_seed(self) -> u64 {
        self.0 as u64 * 137 + 42
    }

    pub fn all() -> impl Iterator<Item = LevelId> {
        (0..LEVEL_COUNT).map(LevelId)
    }
}

impl TryFrom<usize> for LevelId {
    type Error = CoreError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<LevelId> for usize {
    fn from(id: LevelId) -> usize {
        id.0
    }
}

/// Look up a level by raw index
pub fn level(id: usize) -> Result<&'static LevelConfig, CoreError> {
    LevelId::new(id).map(LevelId::config)
}
