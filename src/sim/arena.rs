//! Arena layout: anomalies, boost pads, asteroids and level hazards
//!
//! A layout is generated once per match from the level's fixed seed, so the
//! same level always starts from the same arrangement. Runtime randomness
//! (lightning timing) comes from the caller's ambient RNG, never from the
//! layout seed.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_H, SCREEN_W};
use crate::levels::{AnomalyKind, HazardKind, LevelConfig, LevelId, Rgb};

/// Boost pad pickup radius
pub const BOOST_PAD_RADIUS: f32 = 22.0;
/// Seconds a collected pad stays dark
pub const BOOST_PAD_COOLDOWN: f32 = 5.0;
/// Radius a pulse ring restarts from after reaching its maximum
pub const PULSE_RING_RESET_RADIUS: f32 = 10.0;

const CRYSTAL_SHARD_COUNT: usize = 8;
const GRAVITY_CORRIDOR_COUNT: usize = 3;
const PULSE_RING_COUNT: usize = 3;
const LIGHTNING_NODE_COUNT: usize = 5;

/// Mixed into the layout seed for the decoration generator
const TERRAIN_SEED_SALT: u64 = 0x7E22_A1D5_0C0F_FEE5;

/// What an anomaly does to bodies near it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Field {
    /// Black hole: pulls within three radii
    Attract { strength: f32 },
    /// Repulsor: pushes within three radii (strength is negative)
    Repel { strength: f32 },
    /// Nebula: damps velocity inside its radius
    Drag { density: f32 },
}

/// A gravity anomaly, fixed for the whole match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravityAnomaly {
    pub pos: Vec2,
    pub radius: f32,
    pub field: Field,
}

impl GravityAnomaly {
    pub fn kind(&self) -> AnomalyKind {
        match self.field {
            Field::Attract { .. } => AnomalyKind::BlackHole,
            Field::Repel { .. } => AnomalyKind::Repulsor,
            Field::Drag { .. } => AnomalyKind::Nebula,
        }
    }

    /// Signed strength: positive attracts, negative repels
    pub fn strength(&self) -> f32 {
        match self.field {
            Field::Attract { strength } | Field::Repel { strength } => strength,
            Field::Drag { density } => density,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostPad {
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
    /// Seconds until reactivation (0 while active)
    pub cooldown: f32,
}

impl BoostPad {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: BOOST_PAD_RADIUS,
            active: true,
            cooldown: 0.0,
        }
    }

    /// Take the pad out of play until its cooldown runs out
    pub fn collect(&mut self) {
        self.active = false;
        self.cooldown = BOOST_PAD_COOLDOWN;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            self.cooldown -= dt;
            if self.cooldown <= 0.0 {
                self.cooldown = 0.0;
                self.active = true;
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingAsteroid {
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
    pub angle: f32,
    pub spin: f32,
    pub color: Rgb,
}

impl MovingAsteroid {
    /// Drift, spin, and bounce off the screen edges without losing speed
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.angle += self.spin * dt;
        if self.pos.x < self.radius {
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x > SCREEN_W - self.radius {
            self.vel.x = -self.vel.x.abs();
        }
        if self.pos.y < self.radius {
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y > SCREEN_H - self.radius {
            self.vel.y = -self.vel.y.abs();
        }
    }
}

/// Decorative rotating crystal (no collision)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrystalShard {
    pub pos: Vec2,
    pub angle: f32,
    pub size: f32,
    pub spin: f32,
}

/// Rectangle that pushes anything inside it along a fixed direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravityCorridor {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub strength: f32,
    /// Push direction (radians)
    pub direction: f32,
}

impl GravityCorridor {
    pub fn contains(&self, pos: Vec2) -> bool {
        let d = pos - self.center;
        d.x.abs() < self.width / 2.0 && d.y.abs() < self.height / 2.0
    }
}

/// Expanding ring; touching the band is a hazard hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseRing {
    pub center: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub speed: f32,
    pub color: Rgb,
}

impl PulseRing {
    pub fn update(&mut self, dt: f32) {
        self.radius += self.speed * dt;
        if self.radius > self.max_radius {
            self.radius = PULSE_RING_RESET_RADIUS;
        }
    }
}

/// Node that flickers on and off; only harmful while active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightningNode {
    pub pos: Vec2,
    /// Seconds until the next toggle
    pub timer: f32,
    pub active: bool,
    pub radius: f32,
}

impl LightningNode {
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.active = !self.active;
            self.timer = if self.active {
                rng.random_range(0.4..2.5)
            } else {
                rng.random_range(1.0..4.0)
            };
        }
    }
}

/// Everything placed in the arena for one match
#[derive(Debug, Clone, Serialize)]
pub struct ArenaLayout {
    pub level: LevelId,
    /// Seed the layout was generated from
    pub seed: u64,
    /// Seed handed to the external decoration generator
    pub terrain_seed: u64,
    pub anomalies: Vec<GravityAnomaly>,
    pub boost_pads: Vec<BoostPad>,
    pub asteroids: Vec<MovingAsteroid>,
    pub crystal_shards: Vec<CrystalShard>,
    pub gravity_corridors: Vec<GravityCorridor>,
    pub pulse_rings: Vec<PulseRing>,
    pub lightning_nodes: Vec<LightningNode>,
}

impl ArenaLayout {
    /// Build the layout for a level from its fixed seed
    pub fn generate(level: LevelId) -> Self {
        let seed = level.layout_seed();
        let cfg = level.config();
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut layout = Self {
            level,
            seed,
            terrain_seed: seed ^ TERRAIN_SEED_SALT,
            anomalies: Vec::with_capacity(cfg.max_anomalies),
            boost_pads: Vec::new(),
            asteroids: Vec::with_capacity(cfg.max_asteroids),
            crystal_shards: Vec::new(),
            gravity_corridors: Vec::new(),
            pulse_rings: Vec::new(),
            lightning_nodes: Vec::new(),
        };

        layout.place_boost_pads(&mut rng);
        layout.place_anomalies(cfg, &mut rng);
        layout.place_asteroids(cfg, &mut rng);
        for &hazard in cfg.hazards {
            layout.place_hazard(hazard, cfg, &mut rng);
        }

        log::info!(
            "Arena {} ({}): {} anomalies, {} pads, {} asteroids",
            level.index(),
            cfg.name,
            layout.anomalies.len(),
            layout.boost_pads.len(),
            layout.asteroids.len()
        );
        layout
    }

    pub fn config(&self) -> &'static LevelConfig {
        self.level.config()
    }

    fn place_boost_pads(&mut self, rng: &mut Pcg32) {
        self.boost_pads.push(BoostPad::new(Vec2::new(SCREEN_W / 2.0, SCREEN_H / 2.0)));
        let extra = rng.random_range(3..=6);
        for _ in 0..extra {
            let pos = random_point(rng, 120.0, 90.0);
            self.boost_pads.push(BoostPad::new(pos));
        }
    }

    fn place_anomalies(&mut self, cfg: &LevelConfig, rng: &mut Pcg32) {
        for _ in 0..cfg.max_anomalies {
            let kind = cfg.anomaly_kinds[rng.random_range(0..cfg.anomaly_kinds.len())];
            let pos = random_point(rng, 220.0, 130.0);
            let radius = rng.random_range(55..=115) as f32;
            let field = match kind {
                AnomalyKind::BlackHole => Field::Attract {
                    strength: rng.random_range(100.0..220.0),
                },
                AnomalyKind::Repulsor => Field::Repel {
                    strength: rng.random_range(-110.0..-50.0),
                },
                AnomalyKind::Nebula => Field::Drag {
                    density: rng.random_range(25.0..55.0),
                },
            };
            self.anomalies.push(GravityAnomaly { pos, radius, field });
        }
    }

    fn place_asteroids(&mut self, cfg: &LevelConfig, rng: &mut Pcg32) {
        // Black Hole Station drifts slower; its rocks and the Graveyard's are tinted
        let speed = if cfg.id == 3 { 60.0 } else { 80.0 };
        let color = match cfg.id {
            2 => Rgb(160, 100, 50),
            3 => Rgb(120, 20, 40),
            _ => Rgb(130, 110, 90),
        };
        for _ in 0..cfg.max_asteroids {
            let pos = random_point(rng, 200.0, 90.0);
            let radius = rng.random_range(14..=32) as f32;
            let vel = Vec2::new(
                rng.random_range(-speed..speed),
                rng.random_range(-speed * 0.8..speed * 0.8),
            );
            self.asteroids.push(MovingAsteroid {
                pos,
                radius,
                vel,
                angle: rng.random_range(0.0..TAU),
                spin: rng.random_range(-2.5..2.5),
                color,
            });
        }
    }

    fn place_hazard(&mut self, hazard: HazardKind, cfg: &LevelConfig, rng: &mut Pcg32) {
        match hazard {
            HazardKind::CrystalShards => {
                for _ in 0..CRYSTAL_SHARD_COUNT {
                    self.crystal_shards.push(CrystalShard {
                        pos: random_point(rng, 100.0, 80.0),
                        angle: rng.random_range(0.0..TAU),
                        size: rng.random_range(18..=45) as f32,
                        spin: rng.random_range(-0.8..0.8),
                    });
                }
            }
            HazardKind::SpinningRocks => {}
            HazardKind::GravityCorridors => {
                for _ in 0..GRAVITY_CORRIDOR_COUNT {
                    self.gravity_corridors.push(GravityCorridor {
                        center: random_point(rng, 200.0, 100.0),
                        width: rng.random_range(40..=80) as f32,
                        height: rng.random_range(80..=180) as f32,
                        strength: rng.random_range(150.0..300.0),
                        direction: rng.random_range(0.0..TAU),
                    });
                }
            }
            HazardKind::PulseRings => {
                for _ in 0..PULSE_RING_COUNT {
                    self.pulse_rings.push(PulseRing {
                        center: random_point(rng, 200.0, 100.0),
                        radius: PULSE_RING_RESET_RADIUS,
                        max_radius: rng.random_range(80..=160) as f32,
                        speed: rng.random_range(80.0..160.0),
                        color: cfg.accent,
                    });
                }
            }
            HazardKind::LightningNodes => {
                for _ in 0..LIGHTNING_NODE_COUNT {
                    self.lightning_nodes.push(LightningNode {
                        pos: random_point(rng, 150.0, 80.0),
                        timer: rng.random_range(1.5..4.0),
                        active: false,
                        radius: rng.random_range(50..=90) as f32,
                    });
                }
            }
        }
    }

    /// Advance pad cooldowns, asteroids and hazard animations
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        for pad in &mut self.boost_pads {
            pad.update(dt);
        }
        for asteroid in &mut self.asteroids {
            asteroid.update(dt);
        }
        for shard in &mut self.crystal_shards {
            shard.angle += shard.spin * dt;
        }
        for ring in &mut self.pulse_rings {
            ring.update(dt);
        }
        for node in &mut self.lightning_nodes {
            node.update(dt, rng);
        }
    }

    /// Nearest active boost pad to a point
    pub fn nearest_active_pad(&self, from: Vec2) -> Option<&BoostPad> {
        self.boost_pads
            .iter()
            .filter(|p| p.active)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(from)
                    .partial_cmp(&b.pos.distance_squared(from))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

/// Integer-grid point inset from the screen edges by (`mx`, `my`)
fn random_point(rng: &mut Pcg32, mx: f32, my: f32) -> Vec2 {
    let x = rng.random_range(mx as i32..=(SCREEN_W - mx) as i32);
    let y = rng.random_range(my as i32..=(SCREEN_H - my) as i32);
    Vec2::new(x as f32, y as f32)
}
