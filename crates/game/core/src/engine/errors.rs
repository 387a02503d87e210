//! Error types for turn resolution.

use crate::error::{ErrorSeverity, GameError};

/// Conditions that end the simulation mid-turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("player was killed by {killer} (hp {hp})")]
    PlayerDead { killer: String, hp: i32 },
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PlayerDead { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PlayerDead { .. } => "TURN_PLAYER_DEAD",
        }
    }
}
