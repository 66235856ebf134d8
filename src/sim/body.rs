//! Cars and the ball
//!
//! Both follow the same per-tick contract: field forces, integrate, trail,
//! wall clamp, then body-specific contacts against the arena.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::ArenaLayout;
use super::collision::{circle_contact, clamp_to_bounds};
use crate::consts::*;
use crate::heading;

/// Car trail length
pub const CAR_TRAIL_LENGTH: usize = 22;
/// Ball trail length
pub const BALL_TRAIL_LENGTH: usize = 16;

/// Impulse a car gets when it touches an asteroid
pub const ASTEROID_PUSH: f32 = 220.0;
/// Extra reach around a pad's radius for pickup
pub const PAD_PICKUP_MARGIN: f32 = 16.0;

/// Ball leaves an asteroid at least this fast
pub const BALL_ASTEROID_MIN_SPEED: f32 = 160.0;
/// Minimum hit impulse from a car
pub const CAR_HIT_MIN_IMPULSE: f32 = 260.0;
/// Share of car speed turned into hit impulse
pub const CAR_HIT_SPEED_FACTOR: f32 = 0.8;
/// Added impulse when the hitting car is boosting
pub const CAR_HIT_BOOST_BONUS: f32 = 200.0;
/// Share of the car's velocity the ball inherits
pub const CAR_HIT_CARRY: f32 = 0.3;
/// Recoil the car takes from a hit
pub const CAR_HIT_RECOIL: f32 = 80.0;

/// Per-tick velocity retention with and without throttle
const DRAG_COASTING: f32 = 0.992;
const DRAG_THROTTLE: f32 = 0.999;

/// Which end of the arena a car defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Defends the left goal (the human player)
    Left,
    /// Defends the right goal (the AI)
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Kickoff position for a car on this side
    pub fn kickoff_pos(self) -> Vec2 {
        match self {
            Side::Left => Vec2::new(KICKOFF_X, SCREEN_H / 2.0),
            Side::Right => Vec2::new(SCREEN_W - KICKOFF_X, SCREEN_H / 2.0),
        }
    }

    /// Initial facing: toward the opposite goal
    pub fn kickoff_angle(self) -> f32 {
        match self {
            Side::Left => 0.0,
            Side::Right => std::f32::consts::PI,
        }
    }
}

/// Per-tick control flags, already debounced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub back: bool,
    pub boost: bool,
}

/// Bounded position history, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trail {
    points: Vec<Vec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn record(&mut self, pos: Vec2) {
        self.points.insert(0, pos);
        if self.points.len() > self.capacity {
            self.points.pop();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// What a car ran into during its update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarContacts {
    /// Indices of boost pads collected this tick
    pub pads_collected: Vec<usize>,
    pub asteroid_hit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub side: Side,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle (radians)
    pub angle: f32,
    /// Boost meter, always within [0, BOOST_MAX]
    pub boost: f32,
    /// Goals scored this match
    pub score: u32,
    pub boosting: bool,
    pub trail: Trail,
    /// Counts down to zero; hazard perturbation is skipped while positive
    pub invincible: f32,
}

impl Car {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            pos: side.kickoff_pos(),
            vel: Vec2::ZERO,
            angle: side.kickoff_angle(),
            boost: BOOST_MAX,
            score: 0,
            boosting: false,
            trail: Trail::new(CAR_TRAIL_LENGTH),
            invincible: 0.0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn facing(&self) -> Vec2 {
        heading(self.angle)
    }

    /// Return to the kickoff spot at rest. Score and boost carry over.
    pub fn kickoff(&mut self) {
        self.pos = self.side.kickoff_pos();
        self.vel = Vec2::ZERO;
        self.trail.clear();
    }

    /// Steering, thrust, boost and drag for one tick
    pub fn apply_input(&mut self, controls: Controls, dt: f32) {
        let turn = CAR_TURN_RATE_DEG.to_radians() * dt;
        if controls.left {
            self.angle -= turn;
        }
        if controls.right {
            self.angle += turn;
        }

        let facing = self.facing();
        if controls.forward {
            self.vel += facing * CAR_ACCEL * dt;
        }
        if controls.back {
            self.vel -= facing * CAR_ACCEL * 0.5 * dt;
        }

        self.boosting = controls.boost && self.boost > BOOST_MIN_TO_FIRE && controls.forward;
        if self.boosting {
            self.vel += facing * BOOST_SPEED * dt;
            self.boost = (self.boost - BOOST_COST * dt).max(0.0);
        } else {
            self.boost = (self.boost + BOOST_RECHARGE * dt).min(BOOST_MAX);
        }

        let max_speed = if self.boosting { BOOST_SPEED } else { MAX_SPEED };
        self.vel = self.vel.clamp_length_max(max_speed);

        let drag = if controls.forward || controls.back {
            DRAG_THROTTLE
        } else {
            DRAG_COASTING
        };
        self.vel *= drag;
    }

    /// Physics step against the arena; collects any boost pads touched
    pub fn update(&mut self, dt: f32, arena: &mut ArenaLayout) -> CarContacts {
        let mut contacts = CarContacts::default();

        self.vel = arena.apply_field_forces(self.pos, self.vel, 1.0, dt);
        self.pos += self.vel * dt;
        self.trail.record(self.pos);
        clamp_to_bounds(&mut self.pos, &mut self.vel, CAR_WALL_PAD, CAR_RESTITUTION);

        for asteroid in &arena.asteroids {
            if let Some(contact) = circle_contact(self.pos, asteroid.pos, asteroid.radius + CAR_RADIUS) {
                self.vel += contact.normal * ASTEROID_PUSH;
                contacts.asteroid_hit = true;
            }
        }

        self.invincible = (self.invincible - dt).max(0.0);

        for (i, pad) in arena.boost_pads.iter_mut().enumerate() {
            if pad.active && self.pos.distance(pad.pos) < pad.radius + PAD_PICKUP_MARGIN {
                self.boost = BOOST_MAX;
                pad.collect();
                contacts.pads_collected.push(i);
            }
        }

        contacts
    }

    /// Random shove from a hazard, unless invincible. Returns true if applied.
    pub fn perturb<R: Rng + ?Sized>(&mut self, rng: &mut R, magnitude: f32) -> bool {
        if self.invincible > 0.0 {
            return false;
        }
        self.vel += Vec2::new(
            rng.random_range(-magnitude..=magnitude),
            rng.random_range(-magnitude..=magnitude),
        );
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Cosmetic spin phase
    pub spin: f32,
    pub trail: Trail,
}

impl Ball {
    /// A ball at center with a random kickoff velocity
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            spin: 0.0,
            trail: Trail::new(BALL_TRAIL_LENGTH),
        };
        ball.reset(rng);
        ball
    }

    /// Back to center with a fresh random velocity
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pos = Vec2::new(SCREEN_W / 2.0, SCREEN_H / 2.0);
        self.vel = Vec2::new(rng.random_range(-120.0..120.0), rng.random_range(-90.0..90.0));
        self.spin = 0.0;
        self.trail.clear();
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn update(&mut self, dt: f32, arena: &ArenaLayout) {
        self.vel = arena.apply_field_forces(self.pos, self.vel, BALL_MASS, dt);
        self.pos += self.vel * dt;
        self.spin += 0.05;
        self.trail.record(self.pos);
        clamp_to_bounds(&mut self.pos, &mut self.vel, self.radius, BALL_RESTITUTION);

        for asteroid in &arena.asteroids {
            let reach = self.radius + asteroid.radius;
            if let Some(contact) = circle_contact(self.pos, asteroid.pos, reach) {
                let speed = self.speed().max(BALL_ASTEROID_MIN_SPEED);
                self.vel = contact.normal * speed;
                // Park just outside so the next tick cannot tunnel back in.
                // Near a wall this can overshoot the bounds; the next update clamps it.
                self.pos = asteroid.pos + contact.normal * (reach + 2.0);
            }
        }

        self.vel = self.vel.clamp_length_max(BALL_MAX_SPEED);
    }

    /// Resolve a touch from a car. Returns true on contact.
    pub fn car_hit(&mut self, car: &mut Car) -> bool {
        let reach = self.radius + CAR_RADIUS;
        let Some(contact) = circle_contact(self.pos, car.pos, reach) else {
            return false;
        };
        let n = contact.normal;
        let boost_bonus = if car.boosting { CAR_HIT_BOOST_BONUS } else { 0.0 };
        let impact = (car.speed() * CAR_HIT_SPEED_FACTOR).max(CAR_HIT_MIN_IMPULSE) + boost_bonus;
        self.vel = n * impact + car.vel * CAR_HIT_CARRY;
        car.vel -= n * CAR_HIT_RECOIL;
        // May land past a wall; the next update clamps it back in
        self.pos = car.pos + n * (reach + 2.0);
        true
    }
}
