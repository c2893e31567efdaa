use crate::model::Side;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("Move slot {index} does not exist ({available} moves available)")]
    InvalidMoveIndex { index: usize, available: usize },

    #[error("Move slot {index} has no PP left")]
    OutOfPp { index: usize },

    #[error("A move is still being resolved")]
    Busy,

    #[error("The battle is already over")]
    Finished,

    #[error("It is not the {0:?} side's turn")]
    NotYourTurn(Side),

    #[error("The {0:?} side has no move with PP left and must struggle")]
    NoUsableMove(Side),

    #[error("Struggle is only allowed once every move is out of PP")]
    MovesRemaining,

    #[error("Invalid team: {0}")]
    InvalidTeam(String),

    #[error("Unsupported setup: {0}")]
    Unsupported(String),
}

impl BattleError {
    /// Rejected choices that leave the session untouched and may be retried.
    pub fn is_invalid_action(&self) -> bool {
        matches!(
            self,
            BattleError::InvalidMoveIndex { .. }
                | BattleError::OutOfPp { .. }
                | BattleError::Busy
                | BattleError::Finished
                | BattleError::NotYourTurn(_)
                | BattleError::MovesRemaining
        )
    }
}
