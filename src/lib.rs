//! Cosmic League - an arena car-ball game core
//!
//! Core modules:
//! - `sim`: Simulation (arena layout, physics, bodies, AI, match flow)
//! - `levels`: Static level catalog
//! - `settings`: Data-driven difficulty and match configuration
//! - `highscores`: Best goals-per-level record
//! - `messages`: Advisory phrase pools for the presentation layer

pub mod error;
pub mod highscores;
pub mod levels;
pub mod messages;
pub mod settings;
pub mod sim;

pub use error::CoreError;
pub use highscores::BestScores;
pub use levels::{LevelConfig, LevelId};
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels, origin top-left, y down)
    pub const SCREEN_W: f32 = 1280.0;
    pub const SCREEN_H: f32 = 720.0;

    /// Largest frame step the simulation accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Match length (seconds)
    pub const MATCH_TIME: f32 = 120.0;
    /// Low-time warning threshold (seconds)
    pub const LOW_TIME_WARNING: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 16.0;
    pub const BALL_MASS: f32 = 0.7;
    pub const BALL_MAX_SPEED: f32 = 750.0;
    pub const BALL_RESTITUTION: f32 = 0.9;

    /// Car body is 36x22; contacts use half the long side
    pub const CAR_W: f32 = 36.0;
    pub const CAR_H: f32 = 22.0;
    pub const CAR_RADIUS: f32 = 18.0;
    /// Distance cars keep from the screen edge
    pub const CAR_WALL_PAD: f32 = 30.0;
    pub const CAR_RESTITUTION: f32 = 0.6;
    /// Turn rate (degrees per second)
    pub const CAR_TURN_RATE_DEG: f32 = 220.0;
    pub const CAR_ACCEL: f32 = 400.0;
    pub const MAX_SPEED: f32 = 380.0;

    /// Boost meter
    pub const BOOST_MAX: f32 = 100.0;
    pub const BOOST_MIN_TO_FIRE: f32 = 5.0;
    pub const BOOST_RECHARGE: f32 = 8.0;
    pub const BOOST_COST: f32 = 30.0;
    /// Boost thrust, also the speed ceiling while boosting
    pub const BOOST_SPEED: f32 = 520.0;

    /// Goal mouths (22x150, centered on each side wall)
    pub const GOAL_W: f32 = 22.0;
    pub const GOAL_H: f32 = 150.0;

    /// Kickoff x offset from each side wall
    pub const KICKOFF_X: f32 = 180.0;
}

/// Wrap an angle to (-π, π]
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid lands on [-π, π); fold the lower edge over
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Unit vector for a facing angle
#[inline]
pub fn heading(angle: f32) -> glam::Vec2 {
    glam::Vec2::new(angle.cos(), angle.sin())
}
