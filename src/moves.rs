//! Static move table used when building battle-ready combatants.

use crate::model::{BattleMove, MoveCategory};
use phf::phf_map;

/// Compile-time move description; turned into a [`BattleMove`] with full PP.
#[derive(Clone, Copy, Debug)]
pub struct MoveEntry {
    pub id: u32,
    pub name: &'static str,
    pub move_type: &'static str,
    pub category: MoveCategory,
    pub power: u32,
    pub accuracy: u8,
    pub pp: u8,
}

impl MoveEntry {
    pub fn to_battle_move(&self) -> BattleMove {
        BattleMove::new(
            self.id,
            self.name,
            self.move_type,
            self.category,
            self.power,
            self.accuracy,
            self.pp,
        )
    }
}

const fn entry(
    id: u32,
    name: &'static str,
    move_type: &'static str,
    category: MoveCategory,
    power: u32,
    accuracy: u8,
    pp: u8,
) -> MoveEntry {
    MoveEntry {
        id,
        name,
        move_type,
        category,
        power,
        accuracy,
        pp,
    }
}

pub static MOVE_DEX: phf::Map<&'static str, MoveEntry> = phf_map! {
    "tackle" => entry(33, "Tackle", "normal", MoveCategory::Physical, 40, 100, 35),
    "quick-attack" => entry(98, "Quick Attack", "normal", MoveCategory::Physical, 40, 100, 30),
    "rest" => entry(156, "Rest", "psychic", MoveCategory::Status, 0, 100, 10),
    "hyper-beam" => entry(63, "Hyper Beam", "normal", MoveCategory::Special, 150, 90, 5),
    "thunderbolt" => entry(85, "Thunderbolt", "electric", MoveCategory::Special, 90, 100, 15),
    "iron-tail" => entry(231, "Iron Tail", "steel", MoveCategory::Physical, 100, 75, 15),
    "agility" => entry(97, "Agility", "psychic", MoveCategory::Status, 0, 100, 30),
    "flamethrower" => entry(53, "Flamethrower", "fire", MoveCategory::Special, 90, 100, 15),
    "dragon-claw" => entry(337, "Dragon Claw", "dragon", MoveCategory::Physical, 80, 100, 15),
    "air-slash" => entry(403, "Air Slash", "flying", MoveCategory::Special, 75, 95, 15),
    "roost" => entry(355, "Roost", "flying", MoveCategory::Status, 0, 100, 10),
    "struggle" => entry(165, "Struggle", "normal", MoveCategory::Physical, 50, 100, 1),
};

/// Moves handed to combatants whose source data carries no move list.
pub const DEFAULT_MOVESET: [&str; 4] = ["tackle", "quick-attack", "rest", "hyper-beam"];

pub fn normalize_move_name(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn get_move(name: &str) -> Option<&'static MoveEntry> {
    MOVE_DEX.get(normalize_move_name(name).as_str())
}

pub fn default_moveset() -> Vec<BattleMove> {
    DEFAULT_MOVESET
        .iter()
        .filter_map(|name| MOVE_DEX.get(*name))
        .map(MoveEntry::to_battle_move)
        .collect()
}

/// Fallback action for a combatant with no PP left on any move.
pub fn struggle() -> BattleMove {
    match MOVE_DEX.get("struggle") {
        Some(entry) => entry.to_battle_move(),
        None => BattleMove::new(165, "Struggle", "normal", MoveCategory::Physical, 50, 100, 1),
    }
}
