//! Match state
//!
//! Everything one match needs lives in `MatchState`, mutated only through
//! `tick`. The presentation layer reads fields directly and drains events.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::AiBrain;
use super::arena::ArenaLayout;
use super::body::{Ball, Car, Side};
use super::collision::Rect;
use crate::consts::*;
use crate::error::CoreError;
use crate::highscores::BestScores;
use crate::levels::LevelId;
use crate::messages::{Advisory, MessageCategory};
use crate::settings::Settings;

/// Seconds the goal flash overlay stays up
pub const GOAL_FLASH_TIME: f32 = 1.2;
/// Longest combo chain
pub const MAX_COMBO: u32 = 8;
/// Velocity kick per axis from a hazard
pub const HAZARD_KICK: f32 = 120.0;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Level picker
    SelectingLevel,
    /// Active gameplay
    Playing,
    /// Paused after a goal until acknowledged
    GoalFlash,
    /// Timer ran out
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Ai,
    Draw,
    Undecided,
}

impl Winner {
    pub fn from_scores(player: u32, ai: u32) -> Self {
        match player.cmp(&ai) {
            std::cmp::Ordering::Greater => Winner::Player,
            std::cmp::Ordering::Less => Winner::Ai,
            std::cmp::Ordering::Equal => Winner::Draw,
        }
    }
}

/// Things that happened during a tick, for audio/particles/HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A car touched the ball
    BallHit { side: Side, pos: Vec2 },
    /// `scorer` put the ball in the opposite goal
    Goal { scorer: Side, pos: Vec2 },
    BoostPickup { side: Side, pad: usize },
    HazardHit { side: Side },
    /// Fired once per match when the clock drops under the warning threshold
    LowTime,
    MatchOver { winner: Winner, player: u32, ai: u32 },
}

/// Goal mouth on a side wall
pub fn goal_rect(side: Side) -> Rect {
    let y = (SCREEN_H - GOAL_H) / 2.0;
    match side {
        Side::Left => Rect::new(0.0, y, GOAL_W, GOAL_H),
        Side::Right => Rect::new(SCREEN_W - GOAL_W, y, GOAL_W, GOAL_H),
    }
}

#[derive(Debug, Clone)]
pub struct MatchState {
    pub settings: Settings,
    pub phase: MatchPhase,
    /// Level highlighted on the selection screen
    pub selected: LevelId,
    /// Level being played
    pub level: LevelId,
    pub arena: ArenaLayout,
    /// Human car (left side)
    pub player: Car,
    /// Opponent car (right side)
    pub ai_car: Car,
    pub ball: Ball,
    /// Drives `ai_car`
    pub brain: AiBrain,
    /// Drives `player` when autopilot is on
    pub autopilot: AiBrain,
    /// Seconds remaining, never negative
    pub time_left: f32,
    /// Consecutive player goals, 1..=MAX_COMBO
    pub combo: u32,
    pub winner: Winner,
    /// Best total goals per level for this process
    pub best_scores: BestScores,
    pub(crate) advisory: Option<Advisory>,
    /// Seconds left on the goal flash overlay
    pub flash_timer: f32,
    pub low_time_warned: bool,
    pub(crate) events: Vec<GameEvent>,
    /// Ambient randomness (never the layout seed)
    pub(crate) rng: Pcg32,
}

impl MatchState {
    /// New state on the level picker, with ambient randomness from the OS
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let rng = Pcg32::from_rng(&mut rand::rng());
        Self::with_rng(settings, rng)
    }

    /// Same as `new` but reproducible
    pub fn with_ambient_seed(settings: Settings, seed: u64) -> Result<Self, CoreError> {
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(settings: Settings, mut rng: Pcg32) -> Result<Self, CoreError> {
        let selected = LevelId::new(settings.start_level)?;
        let brain = AiBrain::new(Side::Right, settings.difficulty)?;
        let autopilot = AiBrain::new(Side::Left, settings.difficulty)?;
        let ball = Ball::new(&mut rng);
        Ok(Self {
            phase: MatchPhase::SelectingLevel,
            selected,
            level: selected,
            arena: ArenaLayout::generate(selected),
            player: Car::new(Side::Left),
            ai_car: Car::new(Side::Right),
            ball,
            brain,
            autopilot,
            time_left: settings.effective_match_duration(),
            combo: 1,
            winner: Winner::Undecided,
            best_scores: BestScores::new(),
            advisory: None,
            flash_timer: 0.0,
            low_time_warned: false,
            events: Vec::new(),
            rng,
            settings,
        })
    }

    /// Carry best scores over from an earlier run
    pub fn with_best_scores(mut self, best_scores: BestScores) -> Self {
        self.best_scores = best_scores;
        self
    }

    /// Fresh match on `level`, straight into play
    pub fn start_match(&mut self, level: LevelId) {
        self.level = level;
        self.selected = level;
        self.arena = ArenaLayout::generate(level);
        self.player = Car::new(Side::Left);
        self.ai_car = Car::new(Side::Right);
        self.ball.reset(&mut self.rng);
        self.brain.reset(self.settings.difficulty);
        self.autopilot.reset(self.settings.difficulty);
        self.time_left = self.settings.effective_match_duration();
        self.combo = 1;
        self.winner = Winner::Undecided;
        self.advisory = None;
        self.flash_timer = 0.0;
        self.low_time_warned = false;
        self.phase = MatchPhase::Playing;
        log::info!(
            "Match start: level {} ({}), {} AI, {:.0}s",
            level.index(),
            level.config().name,
            self.settings.difficulty.as_str(),
            self.time_left
        );
    }

    /// Cars back to their spots, ball re-served from center
    pub fn kickoff(&mut self) {
        self.player.kickoff();
        self.ai_car.kickoff();
        self.ball.reset(&mut self.rng);
        self.phase = MatchPhase::Playing;
    }

    /// Side that just scored, if the ball sits in a goal mouth
    pub fn goal_scored(&self) -> Option<Side> {
        if goal_rect(Side::Left).contains(self.ball.pos) {
            Some(Side::Right)
        } else if goal_rect(Side::Right).contains(self.ball.pos) {
            Some(Side::Left)
        } else {
            None
        }
    }

    /// HUD label for the opponent's current state
    pub fn ai_label(&self) -> &'static str {
        self.brain.state.label()
    }

    /// Current advisory, if one is still on screen
    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref().filter(|a| !a.is_expired())
    }

    /// Take every event since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Replace the advisory unconditionally
    pub(crate) fn show_message(&mut self, category: MessageCategory) {
        self.advisory = Some(Advisory::new(category, &mut self.rng));
    }

    /// Show a message only if nothing is on screen
    pub(crate) fn offer_message(&mut self, category: MessageCategory) {
        if self.advisory().is_none() {
            self.show_message(category);
        }
    }
}
