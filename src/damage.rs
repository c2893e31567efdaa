use crate::model::{BattleMove, BattlePokemon, MoveCategory};
use rand::{Rng, RngCore};

pub const MIN_ROLL: f64 = 0.85;
pub const MAX_ROLL: f64 = 1.0;

/// `floor(((2L/5 + 2) * P * A / D) / 50 + 2)`, evaluated exactly.
///
/// `2L/5 + 2` is rewritten as `(2L + 10) / 5` so the whole quotient is a
/// single integer division and never suffers float rounding.
pub fn base_damage(level: u8, power: u32, attack: u32, defense: u32) -> u32 {
    let defense = defense.max(1) as u64;
    let numerator = (2 * level as u64 + 10)
        .saturating_mul(power as u64)
        .saturating_mul(attack as u64);
    let quotient = numerator / (5 * 50 * defense);
    quotient.saturating_add(2).min(u32::MAX as u64) as u32
}

/// Inclusive bounds of the rolled damage for a given base.
pub fn damage_range(base: u32) -> (u32, u32) {
    let min = (base as u64 * 85 / 100) as u32;
    (min, base)
}

/// Applies a uniform roll in `[0.85, 1.00]` to `base`.
pub fn roll_damage(base: u32, rng: &mut dyn RngCore) -> u32 {
    let roll: f64 = rng.gen_range(MIN_ROLL..=MAX_ROLL);
    apply_roll(base, roll)
}

pub fn apply_roll(base: u32, roll: f64) -> u32 {
    let (min, max) = damage_range(base);
    let rolled = (base as f64 * roll.clamp(MIN_ROLL, MAX_ROLL)).floor() as u32;
    rolled.clamp(min, max)
}

/// Attack and defense stats the move's category pairs up, or `None` for status moves.
pub fn offense_defense(
    category: MoveCategory,
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
) -> Option<(u32, u32)> {
    match category {
        MoveCategory::Physical => Some((attacker.stats.attack, defender.stats.defense)),
        MoveCategory::Special => Some((
            attacker.stats.special_attack,
            defender.stats.special_defense,
        )),
        MoveCategory::Status => None,
    }
}

/// Base damage of `mv` from `attacker` into `defender` before the random roll.
///
/// Returns 0 for non-damaging moves; callers treat those as "no effect"
/// rather than running them through the formula.
pub fn move_base_damage(mv: &BattleMove, attacker: &BattlePokemon, defender: &BattlePokemon) -> u32 {
    if !mv.is_damaging() {
        return 0;
    }
    match offense_defense(mv.category, attacker, defender) {
        Some((attack, defense)) => base_damage(attacker.level, mv.power, attack, defense),
        None => 0,
    }
}

pub fn calculate_damage(
    mv: &BattleMove,
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
    rng: &mut dyn RngCore,
) -> u32 {
    let base = move_base_damage(mv, attacker, defender);
    if base == 0 {
        return 0;
    }
    roll_damage(base, rng)
}
