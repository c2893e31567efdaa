use crate::error::BattleError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleFormat {
    #[default]
    Single,
    Double,
    Triple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentType {
    /// The default trainer opponent.
    #[default]
    Ai,
    /// Opponent drawn from the quick-start pool.
    Random,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Rule set carried with a battle. None of these are enforced by the engine yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRules {
    #[serde(default)]
    pub level_cap: Option<u8>,
    #[serde(default)]
    pub allow_legendaries: bool,
    /// Seconds per move choice.
    #[serde(default)]
    pub turn_time_limit: Option<u32>,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            level_cap: Some(50),
            allow_legendaries: false,
            turn_time_limit: Some(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleSetupConfig {
    #[serde(default)]
    pub battle_type: BattleFormat,
    #[serde(default)]
    pub opponent_type: OpponentType,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub rules: BattleRules,
}

impl BattleSetupConfig {
    pub fn validate(&self) -> Result<(), BattleError> {
        match self.battle_type {
            BattleFormat::Single => {}
            other => {
                return Err(BattleError::Unsupported(format!(
                    "{other:?} battles are not available, only single battles"
                )))
            }
        }
        if self.opponent_type == OpponentType::Custom {
            return Err(BattleError::Unsupported(
                "custom opponents are not available".to_string(),
            ));
        }
        Ok(())
    }

    /// Easy AI opponent at level 30.
    pub fn quick_battle() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            rules: BattleRules {
                level_cap: Some(30),
                allow_legendaries: false,
                turn_time_limit: None,
            },
            ..Self::default()
        }
    }

    /// Opponent drawn from the preset pool at level 50.
    pub fn random_battle() -> Self {
        Self {
            opponent_type: OpponentType::Random,
            difficulty: Difficulty::Medium,
            rules: BattleRules {
                level_cap: Some(50),
                allow_legendaries: false,
                turn_time_limit: None,
            },
            ..Self::default()
        }
    }

    /// Hard AI at level 100 with legendaries allowed.
    pub fn expert() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            rules: BattleRules {
                level_cap: Some(100),
                allow_legendaries: true,
                turn_time_limit: None,
            },
            ..Self::default()
        }
    }

    /// Looks up a one-click preset by name: `quick`, `random` or `expert`.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "quick" => Some(Self::quick_battle()),
            "random" => Some(Self::random_battle()),
            "expert" | "hard" => Some(Self::expert()),
            _ => None,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
