//! Match simulation
//!
//! All gameplay logic lives here:
//! - Arena layouts are seeded per level and never touch the ambient RNG
//! - Runtime randomness comes from the match's own generator
//! - Mutation order within a tick is fixed
//! - No rendering or platform dependencies

pub mod ai;
pub mod arena;
pub mod body;
pub mod collision;
pub mod physics;
pub mod state;
pub mod tick;

pub use ai::{AiBrain, AiState, TransitionTable, predict_ball, weighted_choice};
pub use arena::{
    ArenaLayout, BoostPad, CrystalShard, Field, GravityAnomaly, GravityCorridor, LightningNode,
    MovingAsteroid, PulseRing,
};
pub use body::{Ball, Car, CarContacts, Controls, Side, Trail};
pub use collision::{Contact, Rect, circle_contact, clamp_to_bounds};
pub use state::{GameEvent, MatchPhase, MatchState, Winner, goal_rect};
pub use tick::{Command, TickInput, tick};
