use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Which side of the field a combatant or an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player,
    Opponent,
    Draw,
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => Winner::Player,
            Side::Opponent => Winner::Opponent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    #[serde(rename = "special-attack")]
    pub special_attack: u32,
    #[serde(rename = "special-defense")]
    pub special_defense: u32,
    pub speed: u32,
}

fn default_accuracy() -> u8 {
    100
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleMove {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    #[serde(default)]
    pub power: u32,
    /// Carried for display; hit rolls are not part of the simulation.
    #[serde(default = "default_accuracy")]
    pub accuracy: u8,
    pub pp: u8,
    pub current_pp: u8,
    pub category: MoveCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BattleMove {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        move_type: impl Into<String>,
        category: MoveCategory,
        power: u32,
        accuracy: u8,
        pp: u8,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            move_type: move_type.into(),
            power,
            accuracy,
            pp,
            current_pp: pp,
            category,
            description: None,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.current_pp > 0
    }

    pub fn is_damaging(&self) -> bool {
        self.power > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattlePokemon {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    #[serde(default)]
    pub sprite: String,
    pub level: u8,
    pub current_hp: u32,
    pub max_hp: u32,
    pub stats: BaseStats,
    pub moves: Vec<BattleMove>,
}

impl BattlePokemon {
    /// Builds a combatant at full health.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        types: Vec<String>,
        level: u8,
        stats: BaseStats,
        moves: Vec<BattleMove>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            types,
            sprite: String::new(),
            level,
            current_hp: stats.hp,
            max_hp: stats.hp,
            stats,
            moves,
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Saturating HP loss; returns the HP actually removed.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let dealt = damage.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    pub fn usable_moves(&self) -> impl Iterator<Item = (usize, &BattleMove)> {
        self.moves.iter().enumerate().filter(|(_, mv)| mv.is_usable())
    }

    pub fn has_usable_move(&self) -> bool {
        self.moves.iter().any(BattleMove::is_usable)
    }

    pub fn hp_percent(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f32 * 100.0 / self.max_hp as f32
    }
}

/// A team as persisted by the team builder: species data only, no battle state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTeam {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub pokemon: Vec<SavedPokemon>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPokemon {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    #[serde(default)]
    pub sprite: String,
    pub stats: BaseStats,
    #[serde(default)]
    pub moves: Vec<String>,
}
