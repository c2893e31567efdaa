use crate::battle::{Action, BattleResult, BattleSession, Phase};
use crate::config::{BattleSetupConfig, Difficulty};
use crate::error::BattleError;
use crate::model::{BattlePokemon, Side, Winner};
use crate::policy::{policy_for, MovePolicy};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

/// Safety cap for policy-vs-policy battles.
pub const MAX_AUTOPLAY_TURNS: u32 = 1000;

/// Drives the player side with `policy` until the battle ends.
///
/// Returns `None` if the cap is hit or the opponent waits for external input.
pub fn autoplay(
    session: &mut BattleSession,
    policy: &mut dyn MovePolicy,
    rng: &mut SmallRng,
) -> Option<BattleResult> {
    while !session.is_terminal() && session.turns() < MAX_AUTOPLAY_TURNS {
        if session.phase() != Phase::AwaitingChoice(Side::Player) {
            return None;
        }
        let legal = session.legal_actions(Side::Player);
        let action = if legal == [Action::Struggle] {
            Action::Struggle
        } else {
            let choice = policy.choose(
                session.active(Side::Player),
                session.active(Side::Opponent),
                rng,
            );
            if legal.contains(&Action::Move(choice)) {
                Action::Move(choice)
            } else {
                legal[0]
            }
        };
        if let Err(err) = session.act(Side::Player, action) {
            log::warn!("autoplay action {action:?} rejected: {err}");
            return None;
        }
    }
    session.result().cloned()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub sims: usize,
    pub player_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
    pub unfinished: usize,
    pub total_turns: u64,
}

impl BatchSummary {
    /// Player win rate counting draws as half a win.
    pub fn win_rate(&self) -> f64 {
        if self.sims == 0 {
            return 0.0;
        }
        (self.player_wins as f64 + 0.5 * self.draws as f64) / self.sims as f64
    }

    pub fn average_turns(&self) -> f64 {
        let finished = self.sims - self.unfinished;
        if finished == 0 {
            return 0.0;
        }
        self.total_turns as f64 / finished as f64
    }

    fn record(&mut self, result: Option<&BattleResult>) {
        self.sims += 1;
        match result {
            Some(result) => {
                self.total_turns += result.turns as u64;
                match result.winner {
                    Winner::Player => self.player_wins += 1,
                    Winner::Opponent => self.opponent_wins += 1,
                    Winner::Draw => self.draws += 1,
                }
            }
            None => self.unfinished += 1,
        }
    }
}

fn battle_seed(seed: u64, index: usize) -> u64 {
    let mut rng = SmallRng::seed_from_u64(seed ^ ((index as u64) << 32) ^ index as u64);
    rng.gen()
}

/// Plays `sims` independent seeded battles in parallel.
///
/// The opponent follows `config.difficulty`; the player side follows `player_difficulty`.
pub fn simulate_many(
    player: &[BattlePokemon],
    opponent: &[BattlePokemon],
    config: &BattleSetupConfig,
    player_difficulty: Difficulty,
    sims: usize,
    seed: u64,
) -> Result<BatchSummary, BattleError> {
    config.validate()?;
    let results: Vec<Option<BattleResult>> = (0..sims)
        .into_par_iter()
        .map(|index| -> Result<Option<BattleResult>, BattleError> {
            let seed = battle_seed(seed, index);
            let mut session = BattleSession::with_config(
                player.to_vec(),
                opponent.to_vec(),
                config.clone(),
                seed,
            )?;
            let mut policy = policy_for(player_difficulty);
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
            Ok(autoplay(&mut session, policy.as_mut(), &mut rng))
        })
        .collect::<Result<_, _>>()?;

    let mut summary = BatchSummary::default();
    for result in &results {
        summary.record(result.as_ref());
    }
    Ok(summary)
}
