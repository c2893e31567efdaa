//! Single-battle session: turn ownership, move resolution and termination.

use crate::battle_log::BattleLog;
use crate::config::BattleSetupConfig;
use crate::effect::{struggle_recoil, MoveEffect, StandardEffect, StateDelta};
use crate::error::BattleError;
use crate::model::{BattlePokemon, Side, Winner};
use crate::moves::struggle;
use crate::policy::{policy_for, MovePolicy, RandomPolicy};
use crate::roster::validate_team;
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

/// Experience awarded to the player for a win.
pub const VICTORY_EXPERIENCE: u32 = 100;
/// Wins in at most this many turns count as a quick victory.
pub const QUICK_VICTORY_TURNS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingChoice(Side),
    Resolving(Side),
    Terminal(Winner),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Move(usize),
    /// Only legal once every move of the active combatant is out of PP.
    Struggle,
}

/// Who picks the moves for a side.
pub enum Controller {
    /// Choices arrive through [`BattleSession::act`].
    External,
    /// The session asks the policy as soon as the side owns the turn.
    Policy(Box<dyn MovePolicy>),
}

impl Controller {
    pub fn policy(policy: impl MovePolicy + 'static) -> Self {
        Controller::Policy(Box::new(policy))
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Controller::External => f.write_str("External"),
            Controller::Policy(policy) => write!(f, "Policy({})", policy.name()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HpSnapshot {
    pub name: String,
    pub current_hp: u32,
    pub max_hp: u32,
}

impl From<&BattlePokemon> for HpSnapshot {
    fn from(pokemon: &BattlePokemon) -> Self {
        Self {
            name: pokemon.name.clone(),
            current_hp: pokemon.current_hp,
            max_hp: pokemon.max_hp,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Achievement {
    QuickVictory,
    HighExp,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleResult {
    pub winner: Winner,
    pub turns: u32,
    pub player_pokemon_remaining: u32,
    pub opponent_pokemon_remaining: u32,
    pub experience_gained: u32,
    pub battle_log: Vec<String>,
}

impl BattleResult {
    pub fn achievements(&self) -> Vec<Achievement> {
        let mut earned = Vec::new();
        if self.winner != Winner::Player {
            return earned;
        }
        if self.turns <= QUICK_VICTORY_TURNS {
            earned.push(Achievement::QuickVictory);
        }
        if self.experience_gained >= VICTORY_EXPERIENCE {
            earned.push(Achievement::HighExp);
        }
        earned
    }
}

/// Everything one call to [`BattleSession::act`] changed.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    /// Log lines appended during this call, in resolution order.
    pub events: Vec<String>,
    pub player: HpSnapshot,
    pub opponent: HpSnapshot,
    pub turn_owner: Side,
    pub result: Option<BattleResult>,
}

impl TurnOutcome {
    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }
}

/// Authoritative state of one battle between the two team leads.
pub struct BattleSession {
    player_team: Vec<BattlePokemon>,
    opponent_team: Vec<BattlePokemon>,
    phase: Phase,
    turn_owner: Side,
    busy: bool,
    turns: u32,
    log: BattleLog,
    rng: SmallRng,
    opponent_control: Controller,
    effect: Box<dyn MoveEffect>,
    config: BattleSetupConfig,
    result: Option<BattleResult>,
}

impl BattleSession {
    /// Starts a battle with the default setup and a random-move opponent.
    pub fn start(
        player_team: Vec<BattlePokemon>,
        opponent_team: Vec<BattlePokemon>,
        seed: u64,
    ) -> Result<Self, BattleError> {
        validate_team(&player_team)?;
        validate_team(&opponent_team)?;
        let mut log = BattleLog::new();
        log.log_start();
        info!(
            "battle started: {} vs {} (seed {seed})",
            player_team[0].name, opponent_team[0].name
        );
        Ok(Self {
            player_team,
            opponent_team,
            phase: Phase::AwaitingChoice(Side::Player),
            turn_owner: Side::Player,
            busy: false,
            turns: 0,
            log,
            rng: SmallRng::seed_from_u64(seed),
            opponent_control: Controller::policy(RandomPolicy),
            effect: Box::new(StandardEffect),
            config: BattleSetupConfig::default(),
            result: None,
        })
    }

    /// Starts a battle after validating `config`; the opponent policy follows its difficulty.
    pub fn with_config(
        player_team: Vec<BattlePokemon>,
        opponent_team: Vec<BattlePokemon>,
        config: BattleSetupConfig,
        seed: u64,
    ) -> Result<Self, BattleError> {
        config.validate()?;
        let mut session = Self::start(player_team, opponent_team, seed)?;
        session.opponent_control = Controller::Policy(policy_for(config.difficulty));
        session.config = config;
        Ok(session)
    }

    pub fn with_opponent(mut self, controller: Controller) -> Self {
        self.opponent_control = controller;
        self
    }

    pub fn with_effect(mut self, effect: impl MoveEffect + 'static) -> Self {
        self.effect = Box::new(effect);
        self
    }

    /// The player's move choice. The autonomous opponent replies within the same call.
    pub fn select_move(&mut self, move_index: usize) -> Result<TurnOutcome, BattleError> {
        self.act(Side::Player, Action::Move(move_index))
    }

    /// Resolves `action` for `side`, then any autonomous reply.
    ///
    /// A rejected action leaves the session exactly as it was.
    pub fn act(&mut self, side: Side, action: Action) -> Result<TurnOutcome, BattleError> {
        self.check_action(side, action)?;
        let mark = self.log.len();
        self.busy = true;
        let mut next = Some((side, action));
        while let Some((actor, action)) = next.take() {
            if self.resolve(actor, action) {
                break;
            }
            let owner = actor.opponent();
            self.turn_owner = owner;
            self.phase = Phase::AwaitingChoice(owner);
            next = self.autonomous_action(owner).map(|action| (owner, action));
        }
        self.busy = false;
        Ok(self.outcome(mark))
    }

    /// Actions `side` may currently submit.
    pub fn legal_actions(&self, side: Side) -> Vec<Action> {
        let active = self.active(side);
        if !active.has_usable_move() {
            return vec![Action::Struggle];
        }
        active.usable_moves().map(|(idx, _)| Action::Move(idx)).collect()
    }

    /// Ends the session early, handing back the transcript so far.
    pub fn abandon(self) -> Vec<String> {
        info!("battle abandoned after {} turns", self.turns);
        self.log.lines().to_vec()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn_owner(&self) -> Side {
        self.turn_owner
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Terminal(_))
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn result(&self) -> Option<&BattleResult> {
        self.result.as_ref()
    }

    pub fn log(&self) -> &[String] {
        self.log.lines()
    }

    pub fn config(&self) -> &BattleSetupConfig {
        &self.config
    }

    pub fn active(&self, side: Side) -> &BattlePokemon {
        match side {
            Side::Player => &self.player_team[0],
            Side::Opponent => &self.opponent_team[0],
        }
    }

    pub fn team(&self, side: Side) -> &[BattlePokemon] {
        match side {
            Side::Player => &self.player_team,
            Side::Opponent => &self.opponent_team,
        }
    }

    fn check_action(&self, side: Side, action: Action) -> Result<(), BattleError> {
        if self.busy {
            return Err(BattleError::Busy);
        }
        match self.phase {
            Phase::Terminal(_) => return Err(BattleError::Finished),
            Phase::Resolving(_) => return Err(BattleError::Busy),
            Phase::AwaitingChoice(owner) if owner != side => {
                return Err(BattleError::NotYourTurn(side))
            }
            Phase::AwaitingChoice(_) => {}
        }
        let active = self.active(side);
        match action {
            Action::Move(index) => {
                let mv = active
                    .moves
                    .get(index)
                    .ok_or(BattleError::InvalidMoveIndex {
                        index,
                        available: active.moves.len(),
                    })?;
                if !mv.is_usable() {
                    if !active.has_usable_move() {
                        return Err(BattleError::NoUsableMove(side));
                    }
                    return Err(BattleError::OutOfPp { index });
                }
            }
            Action::Struggle => {
                if active.has_usable_move() {
                    return Err(BattleError::MovesRemaining);
                }
            }
        }
        Ok(())
    }

    /// Picks the move for a policy-driven side, or `None` when the side waits for input.
    fn autonomous_action(&mut self, side: Side) -> Option<Action> {
        if side == Side::Player {
            return None;
        }
        let policy = match &mut self.opponent_control {
            Controller::Policy(policy) => policy,
            Controller::External => return None,
        };
        let actor = &self.opponent_team[0];
        let target = &self.player_team[0];
        if !actor.has_usable_move() {
            return Some(Action::Struggle);
        }
        let choice = policy.choose(actor, target, &mut self.rng);
        if actor.moves.get(choice).is_some_and(|mv| mv.is_usable()) {
            return Some(Action::Move(choice));
        }
        let fallback = actor.usable_moves().map(|(idx, _)| idx).next();
        warn!(
            "{} policy chose unusable slot {choice} for {}, using slot {fallback:?}",
            policy.name(),
            actor.name
        );
        fallback.map(Action::Move)
    }

    /// Runs one move through the pipeline. Returns true when the battle ended.
    fn resolve(&mut self, side: Side, action: Action) -> bool {
        self.phase = Phase::Resolving(side);
        self.turns += 1;
        let (attacker, defender) = match side {
            Side::Player => (&mut self.player_team[0], &mut self.opponent_team[0]),
            Side::Opponent => (&mut self.opponent_team[0], &mut self.player_team[0]),
        };

        let mv = match action {
            Action::Move(index) => {
                let slot = &mut attacker.moves[index];
                slot.current_pp -= 1;
                slot.clone()
            }
            Action::Struggle => {
                self.log.log_no_pp(&attacker.name);
                struggle()
            }
        };
        self.log.log_move(&attacker.name, &mv.name);

        let mut deltas = self.effect.apply(&mv, attacker, defender, &mut self.rng);
        if action == Action::Struggle {
            deltas.push(StateDelta::Recoil(struggle_recoil(attacker)));
        }
        for delta in deltas {
            match delta {
                StateDelta::Damage(amount) => {
                    defender.take_damage(amount);
                    self.log.log_damage(amount);
                }
                StateDelta::Recoil(amount) => {
                    attacker.take_damage(amount);
                    self.log.log_recoil(&attacker.name, amount);
                }
                StateDelta::NoEffect => self.log.log_no_effect(),
            }
        }
        debug!(
            "turn {}: {} used {} ({} {}/{}, {} {}/{})",
            self.turns,
            attacker.name,
            mv.name,
            attacker.name,
            attacker.current_hp,
            attacker.max_hp,
            defender.name,
            defender.current_hp,
            defender.max_hp
        );

        if defender.is_fainted() {
            self.log.log_faint(&defender.name);
        }
        if attacker.is_fainted() {
            self.log.log_faint(&attacker.name);
        }
        let winner = match (attacker.is_fainted(), defender.is_fainted()) {
            (false, false) => return false,
            (true, true) => Winner::Draw,
            (false, true) => Winner::from(side),
            (true, false) => Winner::from(side.opponent()),
        };
        self.finish(winner);
        true
    }

    fn finish(&mut self, winner: Winner) {
        self.phase = Phase::Terminal(winner);
        let experience_gained = if winner == Winner::Player {
            VICTORY_EXPERIENCE
        } else {
            0
        };
        let result = BattleResult {
            winner,
            turns: self.turns,
            player_pokemon_remaining: u32::from(!self.player_team[0].is_fainted()),
            opponent_pokemon_remaining: u32::from(!self.opponent_team[0].is_fainted()),
            experience_gained,
            battle_log: self.log.lines().to_vec(),
        };
        info!("battle over after {} turns: {:?}", self.turns, winner);
        self.result = Some(result);
    }

    fn outcome(&self, mark: usize) -> TurnOutcome {
        TurnOutcome {
            events: self.log.since(mark).to_vec(),
            player: HpSnapshot::from(self.active(Side::Player)),
            opponent: HpSnapshot::from(self.active(Side::Opponent)),
            turn_owner: self.turn_owner,
            result: self.result.clone(),
        }
    }
}

impl std::fmt::Debug for BattleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleSession")
            .field("player", &HpSnapshot::from(self.active(Side::Player)))
            .field("opponent", &HpSnapshot::from(self.active(Side::Opponent)))
            .field("phase", &self.phase)
            .field("turns", &self.turns)
            .field("opponent_control", &self.opponent_control)
            .finish()
    }
}
