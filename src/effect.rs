//! Move effect stage of the turn pipeline.
//!
//! An effect inspects the move and both combatants and returns the state
//! changes to apply. The session applies them in order and narrates each one.

use crate::damage::{calculate_damage, move_base_damage, roll_damage};
use crate::model::{BattleMove, BattlePokemon};
use crate::types::type_effectiveness;
use rand::RngCore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateDelta {
    /// HP loss on the defending combatant.
    Damage(u32),
    /// HP loss on the acting combatant.
    Recoil(u32),
    /// The move resolved without changing any state.
    NoEffect,
}

pub trait MoveEffect: Send + Sync {
    fn apply(
        &self,
        mv: &BattleMove,
        attacker: &BattlePokemon,
        defender: &BattlePokemon,
        rng: &mut dyn RngCore,
    ) -> Vec<StateDelta>;
}

/// Formula damage for physical/special moves, nothing for status moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardEffect;

impl MoveEffect for StandardEffect {
    fn apply(
        &self,
        mv: &BattleMove,
        attacker: &BattlePokemon,
        defender: &BattlePokemon,
        rng: &mut dyn RngCore,
    ) -> Vec<StateDelta> {
        if !mv.is_damaging() {
            return vec![StateDelta::NoEffect];
        }
        match calculate_damage(mv, attacker, defender, rng) {
            0 => vec![StateDelta::NoEffect],
            damage => vec![StateDelta::Damage(damage)],
        }
    }
}

/// Standard formula scaled by the type chart. Immunities resolve to no effect.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeChartEffect;

impl MoveEffect for TypeChartEffect {
    fn apply(
        &self,
        mv: &BattleMove,
        attacker: &BattlePokemon,
        defender: &BattlePokemon,
        rng: &mut dyn RngCore,
    ) -> Vec<StateDelta> {
        let base = move_base_damage(mv, attacker, defender);
        if base == 0 {
            return vec![StateDelta::NoEffect];
        }
        let multiplier = type_effectiveness(&mv.move_type, &defender.types);
        let rolled = roll_damage(base, rng);
        let damage = (rolled as f64 * multiplier).floor() as u32;
        if damage == 0 {
            vec![StateDelta::NoEffect]
        } else {
            vec![StateDelta::Damage(damage)]
        }
    }
}

/// HP the user loses when it struggles.
pub fn struggle_recoil(user: &BattlePokemon) -> u32 {
    (user.max_hp / 4).max(1)
}
