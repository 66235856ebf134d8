//! Per-frame simulation tick
//!
//! Commands are handled first, then (while playing) one physics step in a
//! fixed order: player, AI, ball, hits, pickups, hazards, goals, clock,
//! arena timers.

use super::body::{CarContacts, Controls, Side};
use super::state::{GameEvent, HAZARD_KICK, MAX_COMBO, MatchPhase, MatchState, Winner, GOAL_FLASH_TIME};
use crate::consts::*;
use crate::levels::LevelId;
use crate::messages::MessageCategory;

/// Discrete, already-debounced commands from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Level picker: previous level
    PrevLevel,
    /// Level picker: next level
    NextLevel,
    /// Level picker: jump to a level
    Select(LevelId),
    /// Level picker: start the highlighted level
    Confirm,
    /// Dismiss the goal flash and kick off
    Acknowledge,
    /// Replay the current level
    Restart,
    /// Play the level after the highlighted one
    NextArena,
    /// Back to the level picker
    Back,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held controls for the player car
    pub controls: Controls,
    pub command: Option<Command>,
    /// Demo mode - a left-side AI drives the player car
    pub autopilot: bool,
}

/// Advance the match by one frame
pub fn tick(state: &mut MatchState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, state.settings.effective_max_dt())
    } else {
        0.0
    };

    if let Some(advisory) = state.advisory.as_mut() {
        advisory.tick(dt);
    }
    state.flash_timer = (state.flash_timer - dt).max(0.0);

    if let Some(command) = input.command {
        handle_command(state, command);
    }

    // Autopilot serves its own kickoff once the flash has played out
    if input.autopilot && state.phase == MatchPhase::GoalFlash && state.flash_timer <= 0.0 {
        state.kickoff();
    }

    if state.phase != MatchPhase::Playing {
        return;
    }

    step(state, input, dt);
}

fn handle_command(state: &mut MatchState, command: Command) {
    use MatchPhase::*;
    match (state.phase, command) {
        (SelectingLevel, Command::PrevLevel) => state.selected = state.selected.prev(),
        (SelectingLevel, Command::NextLevel) => state.selected = state.selected.next(),
        (SelectingLevel, Command::Select(level)) => state.selected = level,
        (SelectingLevel, Command::Confirm) => state.start_match(state.selected),
        (GoalFlash, Command::Acknowledge) => state.kickoff(),
        (Playing | GameOver, Command::Restart) => state.start_match(state.level),
        (Playing | GameOver, Command::NextArena) => state.start_match(state.selected.next()),
        (Playing | GameOver, Command::Back) => state.phase = SelectingLevel,
        (phase, command) => log::debug!("Ignoring {:?} during {:?}", command, phase),
    }
}

/// One physics step while playing
fn step(state: &mut MatchState, input: &TickInput, dt: f32) {
    // Player
    let controls = if input.autopilot {
        state
            .autopilot
            .get_controls(&state.player, &state.ball, &state.arena, dt, &mut state.rng)
    } else {
        input.controls
    };
    state.player.apply_input(controls, dt);
    let player_contacts = state.player.update(dt, &mut state.arena);

    // AI
    let ai_controls = state
        .brain
        .get_controls(&state.ai_car, &state.ball, &state.arena, dt, &mut state.rng);
    state.ai_car.apply_input(ai_controls, dt);
    let ai_contacts = state.ai_car.update(dt, &mut state.arena);

    // Ball, then touches (player first)
    state.ball.update(dt, &state.arena);
    if state.ball.car_hit(&mut state.player) {
        let pos = state.ball.pos;
        state.push_event(GameEvent::BallHit { side: Side::Left, pos });
    }
    if state.ball.car_hit(&mut state.ai_car) {
        let pos = state.ball.pos;
        state.push_event(GameEvent::BallHit { side: Side::Right, pos });
    }

    report_pickups(state, Side::Left, player_contacts);
    report_pickups(state, Side::Right, ai_contacts);

    for side in [Side::Left, Side::Right] {
        apply_hazards(state, side);
    }

    if let Some(scorer) = state.goal_scored() {
        score_goal(state, scorer);
    }

    // Clock
    state.time_left -= dt;
    if !state.low_time_warned && state.time_left < LOW_TIME_WARNING {
        state.low_time_warned = true;
        state.show_message(MessageCategory::LowTime);
        state.push_event(GameEvent::LowTime);
    }
    if state.time_left <= 0.0 {
        finish_match(state);
    }

    state.arena.update(dt, &mut state.rng);
}

fn report_pickups(state: &mut MatchState, side: Side, contacts: CarContacts) {
    for pad in contacts.pads_collected {
        state.push_event(GameEvent::BoostPickup { side, pad });
        if side == Side::Left {
            state.offer_message(MessageCategory::BoostPickup);
        }
    }
}

/// Random shove for a car touching a hazard
fn apply_hazards(state: &mut MatchState, side: Side) {
    let car = match side {
        Side::Left => &mut state.player,
        Side::Right => &mut state.ai_car,
    };
    let hit = state.arena.check_hazard_contact(car.pos, CAR_RADIUS)
        && car.perturb(&mut state.rng, HAZARD_KICK);
    if hit {
        state.push_event(GameEvent::HazardHit { side });
        if side == Side::Left {
            state.offer_message(MessageCategory::HazardHit);
        }
    }
}

fn score_goal(state: &mut MatchState, scorer: Side) {
    let category = match scorer {
        Side::Left => {
            state.player.score += 1;
            state.combo = (state.combo + 1).min(MAX_COMBO);
            state.brain.record_goal_against();
            state.autopilot.record_goal_for();
            MessageCategory::GoalPlayer
        }
        Side::Right => {
            state.ai_car.score += 1;
            state.combo = 1;
            state.brain.record_goal_for();
            state.autopilot.record_goal_against();
            MessageCategory::GoalAi
        }
    };
    log::info!(
        "Goal {:?}: {} - {} (combo x{})",
        scorer,
        state.player.score,
        state.ai_car.score,
        state.combo
    );
    let pos = state.ball.pos;
    state.push_event(GameEvent::Goal { scorer, pos });
    state.show_message(category);
    state.flash_timer = GOAL_FLASH_TIME;
    state.phase = MatchPhase::GoalFlash;
}

fn finish_match(state: &mut MatchState) {
    state.time_left = 0.0;
    let (player, ai) = (state.player.score, state.ai_car.score);
    let new_best = state.best_scores.record(state.level, player + ai);
    state.winner = Winner::from_scores(player, ai);
    state.show_message(match state.winner {
        Winner::Player => MessageCategory::Victory,
        Winner::Ai => MessageCategory::Defeat,
        Winner::Draw | Winner::Undecided => MessageCategory::Draw,
    });
    state.push_event(GameEvent::MatchOver {
        winner: state.winner,
        player,
        ai,
    });
    state.phase = MatchPhase::GameOver;
    log::info!(
        "Match over on level {}: {:?} {}-{}{}",
        state.level.index(),
        state.winner,
        player,
        ai,
        if new_best { " (new best)" } else { "" }
    );
}
