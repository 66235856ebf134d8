//! Field forces and hazard contact
//!
//! Every moving body goes through `apply_field_forces` once per tick.
//! Anomalies and corridors add up in a single pass; there is no ordering
//! between them.

use glam::Vec2;

use super::arena::{ArenaLayout, Field, GravityAnomaly, GravityCorridor};

/// Fraction of velocity a nebula removes per second
pub const NEBULA_DAMPING: f32 = 0.35;
/// Attract/repel fields reach this many radii out
pub const FIELD_REACH: f32 = 3.0;
/// Distance exponent for attract/repel falloff
pub const FIELD_FALLOFF: f32 = 1.2;
/// Half-width of a pulse ring's damaging band (before body radius)
pub const PULSE_BAND: f32 = 10.0;

/// Velocity change from a single anomaly
fn anomaly_effect(anomaly: &GravityAnomaly, pos: Vec2, vel: Vec2, mass: f32, dt: f32) -> Vec2 {
    let delta = anomaly.pos - pos;
    // Floor avoids the singularity at the center
    let dist = delta.length().max(1.0);
    match anomaly.field {
        Field::Drag { .. } => {
            if dist < anomaly.radius {
                vel * (1.0 - NEBULA_DAMPING * dt)
            } else {
                vel
            }
        }
        Field::Attract { strength } | Field::Repel { strength } => {
            if dist < anomaly.radius * FIELD_REACH && mass > 0.0 {
                let force = strength / dist.powf(FIELD_FALLOFF) * dt / mass;
                vel + delta / dist * force
            } else {
                vel
            }
        }
    }
}

fn corridor_effect(corridor: &GravityCorridor, pos: Vec2, mass: f32, dt: f32) -> Vec2 {
    if corridor.contains(pos) && mass > 0.0 {
        crate::heading(corridor.direction) * corridor.strength * dt / mass
    } else {
        Vec2::ZERO
    }
}

impl ArenaLayout {
    /// Apply every anomaly and corridor to a body's velocity
    pub fn apply_field_forces(&self, pos: Vec2, vel: Vec2, mass: f32, dt: f32) -> Vec2 {
        let mut vel = vel;
        for anomaly in &self.anomalies {
            vel = anomaly_effect(anomaly, pos, vel, mass, dt);
        }
        for corridor in &self.gravity_corridors {
            vel += corridor_effect(corridor, pos, mass, dt);
        }
        vel
    }

    /// True if a disc touches an active lightning node or a pulse ring band
    pub fn check_hazard_contact(&self, pos: Vec2, radius: f32) -> bool {
        let lightning = self
            .lightning_nodes
            .iter()
            .any(|n| n.active && pos.distance(n.pos) < n.radius + radius);
        if lightning {
            return true;
        }
        self.pulse_rings
            .iter()
            .any(|r| (pos.distance(r.center) - r.radius).abs() < PULSE_BAND + radius)
    }
}
