//! Turn-based Pokemon battle engine.
//!
//! A [`battle::BattleSession`] owns one single battle between two team leads.
//! The host submits the player's move, the session resolves it, lets the
//! opponent policy answer, and reports what happened as a [`battle::TurnOutcome`].

pub mod batch;
pub mod battle;
pub mod battle_log;
pub mod config;
pub mod damage;
pub mod effect;
pub mod error;
pub mod model;
pub mod moves;
pub mod playback;
pub mod policy;
pub mod roster;
pub mod types;

use crate::battle::BattleSession;
use crate::config::BattleSetupConfig;
use crate::error::BattleError;
use crate::model::{BattlePokemon, SavedTeam};
use anyhow::Context;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

/// Commonly used exports for hosts.
pub mod prelude {
    pub use crate::battle::{
        Achievement, Action, BattleResult, BattleSession, Controller, HpSnapshot, Phase,
        TurnOutcome,
    };
    pub use crate::config::{BattleFormat, BattleRules, BattleSetupConfig, Difficulty, OpponentType};
    pub use crate::effect::{MoveEffect, StandardEffect, StateDelta, TypeChartEffect};
    pub use crate::error::BattleError;
    pub use crate::model::{BaseStats, BattleMove, BattlePokemon, MoveCategory, Side, Winner};
    pub use crate::policy::{GreedyPolicy, MovePolicy, RandomPolicy};
}

/// Starts a battle with the default setup.
pub fn start_battle(
    player_team: Vec<BattlePokemon>,
    opponent_team: Vec<BattlePokemon>,
    seed: u64,
) -> Result<BattleSession, BattleError> {
    BattleSession::start(player_team, opponent_team, seed)
}

pub fn load_team(path: &Path) -> anyhow::Result<Vec<BattlePokemon>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read team file at {}", path.display()))?;
    let team: SavedTeam = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse team JSON from {}", path.display()))?;
    let battle_team = roster::to_battle_team(&team)
        .with_context(|| format!("Team '{}' cannot battle", team.name))?;
    Ok(battle_team)
}

pub fn load_config(path: &Path) -> anyhow::Result<BattleSetupConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let config = BattleSetupConfig::from_json(&raw)
        .with_context(|| format!("Failed to parse config JSON from {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub team_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    /// Used when no config file is given.
    pub preset: Option<BattleSetupConfig>,
    pub seed: u64,
    pub moves: Vec<usize>,
    pub auto: Option<config::Difficulty>,
    pub sims: usize,
    pub delay_ms: u64,
    pub json: bool,
}

/// Resolves the player team, config and opponent the CLI flags describe.
pub fn prepare(
    opts: &CliOptions,
) -> anyhow::Result<(Vec<BattlePokemon>, Vec<BattlePokemon>, BattleSetupConfig)> {
    let config = match &opts.config_path {
        Some(path) => load_config(path)?,
        None => opts.preset.clone().unwrap_or_default(),
    };
    let player = match &opts.team_path {
        Some(path) => load_team(path)?,
        None => roster::quick_start_team()?,
    };
    let mut rng = SmallRng::seed_from_u64(opts.seed);
    let opponent = roster::opponent_for(config.opponent_type, &mut rng)?;
    Ok((player, opponent, config))
}

fn play_scripted(session: &mut BattleSession, moves: &[usize]) {
    for &index in moves {
        if session.is_terminal() {
            break;
        }
        let action = if session.legal_actions(model::Side::Player) == [battle::Action::Struggle] {
            battle::Action::Struggle
        } else {
            battle::Action::Move(index)
        };
        match session.act(model::Side::Player, action) {
            Ok(outcome) if outcome.is_terminal() => break,
            Ok(_) => {}
            Err(err) => log::warn!("move {index} rejected: {err}"),
        }
    }
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    let (player, opponent, config) = prepare(&opts)?;

    if opts.sims > 0 {
        let difficulty = opts.auto.unwrap_or_default();
        let summary =
            batch::simulate_many(&player, &opponent, &config, difficulty, opts.sims, opts.seed)?;
        if opts.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!(
                "{} battles: {} won, {} lost, {} drawn, {} unfinished (win rate {:.4}, {:.1} turns on average)",
                summary.sims,
                summary.player_wins,
                summary.opponent_wins,
                summary.draws,
                summary.unfinished,
                summary.win_rate(),
                summary.average_turns()
            );
        }
        return Ok(());
    }

    let mut session = BattleSession::with_config(player, opponent, config, opts.seed)?;
    match opts.auto {
        Some(difficulty) => {
            let mut policy = policy::policy_for(difficulty);
            let mut rng = SmallRng::seed_from_u64(opts.seed.wrapping_add(1));
            batch::autoplay(&mut session, policy.as_mut(), &mut rng);
        }
        None => play_scripted(&mut session, &opts.moves),
    }

    let mut stdout = std::io::stdout();
    match session.result() {
        Some(result) if opts.json => println!("{}", serde_json::to_string_pretty(result)?),
        Some(result) => {
            playback::replay(
                &result.battle_log,
                std::time::Duration::from_millis(opts.delay_ms),
                &mut stdout,
            )?;
            println!(
                "Winner: {:?} after {} turns, {} EXP",
                result.winner, result.turns, result.experience_gained
            );
            for achievement in result.achievements() {
                println!("Achievement: {achievement:?}");
            }
        }
        None => {
            playback::replay(
                session.log(),
                std::time::Duration::from_millis(opts.delay_ms),
                &mut stdout,
            )?;
            let player = session.active(model::Side::Player);
            let opponent = session.active(model::Side::Opponent);
            println!(
                "Battle not finished: {} {}/{} HP ({:.0}%), {} {}/{} HP ({:.0}%)",
                player.name,
                player.current_hp,
                player.max_hp,
                player.hp_percent(),
                opponent.name,
                opponent.current_hp,
                opponent.max_hp,
                opponent.hp_percent()
            );
            let benched = session.team(model::Side::Player).len() - 1;
            if benched > 0 {
                println!("{benched} team member(s) did not take part");
            }
        }
    }
    Ok(())
}
