//! Building battle-ready teams from saved teams and the built-in presets.

use crate::config::OpponentType;
use crate::error::BattleError;
use crate::model::{BaseStats, BattleMove, BattlePokemon, SavedPokemon, SavedTeam};
use crate::moves::{default_moveset, get_move, MoveEntry};
use rand::seq::SliceRandom;
use rand::RngCore;

/// Level every converted combatant battles at.
pub const BATTLE_LEVEL: u8 = 50;
pub const MAX_TEAM_SIZE: usize = 6;
pub const MAX_MOVES: usize = 4;

const SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

fn sprite_url(id: u32) -> String {
    format!("{SPRITE_BASE}/{id}.png")
}

fn moves_from_names(pokemon: &str, names: &[&str]) -> Result<Vec<BattleMove>, BattleError> {
    names
        .iter()
        .map(|name| {
            get_move(name).map(MoveEntry::to_battle_move).ok_or_else(|| {
                BattleError::InvalidTeam(format!("{pokemon} knows unknown move '{name}'"))
            })
        })
        .collect()
}

pub fn to_battle_pokemon(saved: &SavedPokemon) -> Result<BattlePokemon, BattleError> {
    if saved.moves.len() > MAX_MOVES {
        return Err(BattleError::InvalidTeam(format!(
            "{} has {} moves, at most {MAX_MOVES} are allowed",
            saved.name,
            saved.moves.len()
        )));
    }
    let moves = if saved.moves.is_empty() {
        default_moveset()
    } else {
        let names: Vec<&str> = saved.moves.iter().map(String::as_str).collect();
        moves_from_names(&saved.name, &names)?
    };
    let mut pokemon = BattlePokemon::new(
        saved.id,
        saved.name.clone(),
        saved.types.clone(),
        BATTLE_LEVEL,
        saved.stats.clone(),
        moves,
    );
    pokemon.sprite = if saved.sprite.is_empty() {
        sprite_url(saved.id)
    } else {
        saved.sprite.clone()
    };
    Ok(pokemon)
}

pub fn to_battle_team(team: &SavedTeam) -> Result<Vec<BattlePokemon>, BattleError> {
    if team.pokemon.is_empty() {
        return Err(BattleError::InvalidTeam(format!("team '{}' is empty", team.name)));
    }
    if team.pokemon.len() > MAX_TEAM_SIZE {
        return Err(BattleError::InvalidTeam(format!(
            "team '{}' has {} Pokemon, at most {MAX_TEAM_SIZE} are allowed",
            team.name,
            team.pokemon.len()
        )));
    }
    team.pokemon.iter().map(to_battle_pokemon).collect()
}

fn preset(
    id: u32,
    name: &str,
    types: &[&str],
    stats: BaseStats,
    moves: &[&str],
) -> Result<BattlePokemon, BattleError> {
    let mut pokemon = BattlePokemon::new(
        id,
        name,
        types.iter().map(|t| t.to_string()).collect(),
        BATTLE_LEVEL,
        stats,
        moves_from_names(name, moves)?,
    );
    pokemon.sprite = sprite_url(id);
    Ok(pokemon)
}

pub fn pikachu() -> Result<BattlePokemon, BattleError> {
    preset(
        25,
        "pikachu",
        &["electric"],
        BaseStats {
            hp: 100,
            attack: 90,
            defense: 70,
            special_attack: 110,
            special_defense: 80,
            speed: 120,
        },
        &["thunderbolt", "quick-attack", "iron-tail", "agility"],
    )
}

pub fn charizard() -> Result<BattlePokemon, BattleError> {
    preset(
        6,
        "charizard",
        &["fire", "flying"],
        BaseStats {
            hp: 150,
            attack: 120,
            defense: 90,
            special_attack: 130,
            special_defense: 100,
            speed: 110,
        },
        &["flamethrower", "dragon-claw", "air-slash", "roost"],
    )
}

/// One-Pokemon team for players who skip team selection.
pub fn quick_start_team() -> Result<Vec<BattlePokemon>, BattleError> {
    Ok(vec![pikachu()?])
}

pub fn default_opponent() -> Result<Vec<BattlePokemon>, BattleError> {
    Ok(vec![charizard()?])
}

pub fn opponent_for(
    opponent_type: OpponentType,
    rng: &mut dyn RngCore,
) -> Result<Vec<BattlePokemon>, BattleError> {
    match opponent_type {
        OpponentType::Ai => default_opponent(),
        OpponentType::Random => {
            let pool = [pikachu()?, charizard()?];
            let pick = pool
                .choose(rng)
                .cloned()
                .ok_or_else(|| BattleError::InvalidTeam("empty opponent pool".to_string()))?;
            Ok(vec![pick])
        }
        OpponentType::Custom => Err(BattleError::Unsupported(
            "custom opponents are not available".to_string(),
        )),
    }
}

/// Checks the invariants a team must hold before a battle can start.
pub fn validate_team(team: &[BattlePokemon]) -> Result<(), BattleError> {
    if team.is_empty() {
        return Err(BattleError::InvalidTeam("team is empty".to_string()));
    }
    if team.len() > MAX_TEAM_SIZE {
        return Err(BattleError::InvalidTeam(format!(
            "team has {} Pokemon, at most {MAX_TEAM_SIZE} are allowed",
            team.len()
        )));
    }
    if team[0].is_fainted() {
        return Err(BattleError::InvalidTeam(format!(
            "{} cannot lead the team with no HP left",
            team[0].name
        )));
    }
    for pokemon in team {
        if pokemon.moves.is_empty() || pokemon.moves.len() > MAX_MOVES {
            return Err(BattleError::InvalidTeam(format!(
                "{} must know between 1 and {MAX_MOVES} moves",
                pokemon.name
            )));
        }
        if pokemon.current_hp > pokemon.max_hp {
            return Err(BattleError::InvalidTeam(format!(
                "{} has {} HP out of {}",
                pokemon.name, pokemon.current_hp, pokemon.max_hp
            )));
        }
        if let Some(mv) = pokemon.moves.iter().find(|mv| mv.current_pp > mv.pp) {
            return Err(BattleError::InvalidTeam(format!(
                "{}'s {} has {} PP out of {}",
                pokemon.name, mv.name, mv.current_pp, mv.pp
            )));
        }
    }
    Ok(())
}
