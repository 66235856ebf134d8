//! Cosmic League headless runner
//!
//! Plays autopilot-vs-AI matches without a window and logs the results.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cosmic_league::sim::{Command, MatchPhase, MatchState, TickInput, tick};
use cosmic_league::{BestScores, CoreError, Difficulty, LevelId, Settings};

/// Fixed frame step for headless play
const FRAME_DT: f32 = 1.0 / 60.0;
/// Safety cap on frames per match
const MAX_FRAMES: u32 = 60 * 60 * 30;

#[derive(Parser, Debug)]
#[command(name = "cosmic-league")]
#[command(about = "Play headless autopilot-vs-AI arena matches", long_about = None)]
struct Args {
    /// Settings JSON file (defaults are used when missing)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Level index to play, or `all` for the whole catalog
    #[arg(long, value_parser = parse_level)]
    level: Option<LevelChoice>,

    /// AI difficulty (easy, medium, hard, elite)
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Seed for the match's ambient RNG
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelChoice {
    All,
    One(usize),
}

fn parse_level(s: &str) -> Result<LevelChoice, String> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(LevelChoice::All);
    }
    s.parse()
        .map(LevelChoice::One)
        .map_err(|_| format!("expected a level index or `all`, got `{}`", s))
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty `{}`", s))
}

/// Play one match to the final whistle
fn play_match(state: &mut MatchState, level: LevelId) {
    state.selected = level;
    let input = TickInput {
        command: Some(Command::Confirm),
        autopilot: true,
        ..Default::default()
    };
    tick(state, &input, FRAME_DT);

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut frames = 0;
    while state.phase != MatchPhase::GameOver && frames < MAX_FRAMES {
        tick(state, &input, FRAME_DT);
        for event in state.drain_events() {
            log::trace!("{:?}", event);
        }
        frames += 1;
    }

    log::info!(
        "{}: autopilot {} - {} AI ({:?}), best total {}, AI finished as {}",
        level.config().name,
        state.player.score,
        state.ai_car.score,
        state.winner,
        state.best_scores.get(level),
        state.ai_label()
    );
    // Back to the picker for the next level
    state.phase = MatchPhase::SelectingLevel;
}

fn run(args: Args) -> Result<(), CoreError> {
    let mut settings = args.settings.map(Settings::load_or_default).unwrap_or_default();
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(LevelChoice::One(level)) = args.level {
        settings.start_level = level;
    }

    let best_scores = match settings.best_scores_path.as_deref() {
        Some(path) => BestScores::load(path)?,
        None => BestScores::new(),
    };

    let scores_path = settings.best_scores_path.clone();
    let start = LevelId::new(settings.start_level)?;
    let mut state = match args.seed {
        Some(seed) => MatchState::with_ambient_seed(settings, seed)?,
        None => MatchState::new(settings)?,
    }
    .with_best_scores(best_scores);

    let levels: Vec<LevelId> = if args.level == Some(LevelChoice::All) {
        LevelId::all().collect()
    } else {
        vec![start]
    };
    for level in levels {
        play_match(&mut state, level);
    }

    if let Some(path) = scores_path {
        state.best_scores.save(path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Cosmic League (headless) starting...");

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_accepts_index_or_all() {
        let args = Args::try_parse_from(["cosmic-league", "--level", "all"]).unwrap();
        assert_eq!(args.level, Some(LevelChoice::All));
        let args = Args::try_parse_from(["cosmic-league", "--level", "3"]).unwrap();
        assert_eq!(args.level, Some(LevelChoice::One(3)));
        assert!(Args::try_parse_from(["cosmic-league", "--level", "three"]).is_err());
    }

    #[test]
    fn test_difficulty_uses_preset_names() {
        let args =
            Args::try_parse_from(["cosmic-league", "--difficulty", "Elite", "--seed", "7"]).unwrap();
        assert_eq!(args.difficulty, Some(Difficulty::Elite));
        assert_eq!(args.seed, Some(7));
        assert!(Args::try_parse_from(["cosmic-league", "--difficulty", "brutal"]).is_err());
    }

    #[test]
    fn test_no_flags_means_defaults() {
        let args = Args::try_parse_from(["cosmic-league"]).unwrap();
        assert!(args.settings.is_none() && args.level.is_none());
        assert!(args.difficulty.is_none() && args.seed.is_none());
    }
}
