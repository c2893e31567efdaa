//! Elemental type multipliers.
//!
//! The default damage pipeline ignores types entirely; these multipliers are
//! only consulted by [`crate::effect::TypeChartEffect`].

const SUPER: &[(&str, &[&str])] = &[
    ("fire", &["grass", "ice", "bug", "steel"]),
    ("water", &["fire", "ground", "rock"]),
    ("electric", &["water", "flying"]),
    ("grass", &["water", "ground", "rock"]),
    ("ice", &["grass", "ground", "flying", "dragon"]),
    ("fighting", &["normal", "ice", "rock", "dark", "steel"]),
    ("poison", &["grass", "fairy"]),
    ("ground", &["fire", "electric", "poison", "rock", "steel"]),
    ("flying", &["grass", "fighting", "bug"]),
    ("psychic", &["fighting", "poison"]),
    ("bug", &["grass", "psychic", "dark"]),
    ("rock", &["fire", "ice", "flying", "bug"]),
    ("ghost", &["ghost", "psychic"]),
    ("dragon", &["dragon"]),
    ("dark", &["psychic", "ghost"]),
    ("steel", &["rock", "ice", "fairy"]),
    ("fairy", &["fighting", "dragon", "dark"]),
];

const RESISTED: &[(&str, &[&str])] = &[
    ("normal", &["rock", "steel"]),
    ("fire", &["fire", "water", "rock", "dragon"]),
    ("water", &["water", "grass", "dragon"]),
    ("electric", &["electric", "grass", "dragon"]),
    ("grass", &["fire", "grass", "poison", "flying", "bug", "dragon", "steel"]),
    ("ice", &["fire", "water", "ice", "steel"]),
    ("fighting", &["poison", "flying", "psychic", "bug", "fairy"]),
    ("poison", &["poison", "ground", "rock", "ghost"]),
    ("ground", &["grass", "bug"]),
    ("flying", &["electric", "rock", "steel"]),
    ("psychic", &["psychic", "steel"]),
    ("bug", &["fire", "fighting", "poison", "flying", "ghost", "steel", "fairy"]),
    ("rock", &["fighting", "ground", "steel"]),
    ("ghost", &["dark"]),
    ("dragon", &["steel"]),
    ("dark", &["fighting", "dark", "fairy"]),
    ("steel", &["fire", "water", "electric", "steel"]),
    ("fairy", &["fire", "poison", "steel"]),
];

const IMMUNE: &[(&str, &[&str])] = &[
    ("normal", &["ghost"]),
    ("electric", &["ground"]),
    ("fighting", &["ghost"]),
    ("poison", &["steel"]),
    ("ground", &["flying"]),
    ("psychic", &["dark"]),
    ("ghost", &["normal"]),
    ("dragon", &["fairy"]),
];

fn listed(table: &[(&str, &[&str])], attacking: &str, defending: &str) -> bool {
    table
        .iter()
        .find(|(atk, _)| *atk == attacking)
        .map(|(_, targets)| targets.contains(&defending))
        .unwrap_or(false)
}

pub fn single_multiplier(attacking: &str, defending: &str) -> f64 {
    let atk = attacking.to_ascii_lowercase();
    let def = defending.to_ascii_lowercase();
    if listed(IMMUNE, &atk, &def) {
        0.0
    } else if listed(SUPER, &atk, &def) {
        2.0
    } else if listed(RESISTED, &atk, &def) {
        0.5
    } else {
        1.0
    }
}

/// Product of the multipliers against every defending type; unknown types are neutral.
pub fn type_effectiveness(move_type: &str, defender_types: &[String]) -> f64 {
    defender_types
        .iter()
        .map(|t| single_multiplier(move_type, t))
        .product()
}
