use crate::config::Difficulty;
use crate::damage::move_base_damage;
use crate::model::BattlePokemon;
use rand::seq::SliceRandom;
use rand::RngCore;

/// Move selection for a side the engine drives on its own.
///
/// Implementations return a slot in `actor.moves`. The session only asks when
/// the actor has at least one usable move, and replaces an unusable answer
/// with the first usable slot.
pub trait MovePolicy: Send {
    fn choose(&mut self, actor: &BattlePokemon, target: &BattlePokemon, rng: &mut dyn RngCore)
        -> usize;

    fn name(&self) -> &'static str;
}

/// Uniform choice among the slots that still have PP.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl MovePolicy for RandomPolicy {
    fn choose(
        &mut self,
        actor: &BattlePokemon,
        _target: &BattlePokemon,
        rng: &mut dyn RngCore,
    ) -> usize {
        let usable: Vec<usize> = actor.usable_moves().map(|(idx, _)| idx).collect();
        usable.choose(rng).copied().unwrap_or(0)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Picks the usable move with the highest pre-roll damage; lowest slot wins ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPolicy;

impl MovePolicy for GreedyPolicy {
    fn choose(
        &mut self,
        actor: &BattlePokemon,
        target: &BattlePokemon,
        _rng: &mut dyn RngCore,
    ) -> usize {
        let mut best: Option<(usize, u32)> = None;
        for (idx, mv) in actor.usable_moves() {
            let expected = move_base_damage(mv, actor, target);
            match best {
                Some((_, top)) if top >= expected => {}
                _ => best = Some((idx, expected)),
            }
        }
        best.map(|(idx, _)| idx).unwrap_or(0)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Always plays the same slot. Useful for scripted opponents.
#[derive(Clone, Copy, Debug)]
pub struct FixedPolicy(pub usize);

impl MovePolicy for FixedPolicy {
    fn choose(
        &mut self,
        _actor: &BattlePokemon,
        _target: &BattlePokemon,
        _rng: &mut dyn RngCore,
    ) -> usize {
        self.0
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

pub fn policy_for(difficulty: Difficulty) -> Box<dyn MovePolicy> {
    match difficulty {
        Difficulty::Easy | Difficulty::Medium => Box::new(RandomPolicy),
        Difficulty::Hard => Box::new(GreedyPolicy),
    }
}
