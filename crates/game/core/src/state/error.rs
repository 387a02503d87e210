//! Load-time structural errors.
//!
//! Every variant is fatal: a level or world that fails to build is discarded
//! whole and no turn ever runs on it.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("invalid glyph {glyph:?} at {position} in level {level}")]
    InvalidGlyph {
        level: String,
        glyph: char,
        position: Position,
    },

    #[error("level {level} has no rows")]
    Empty { level: String },

    #[error("level {level} places the player twice ({first} and {second})")]
    DuplicatePlayer {
        level: String,
        first: Position,
        second: Position,
    },

    #[error("starting level {level} has no player start glyph")]
    MissingPlayer { level: String },

    #[error("two monsters start at {position} in level {level}")]
    MonsterOverlap { level: String, position: Position },

    #[error("unknown level {name}")]
    UnknownLevel { name: String },

    #[error("duplicate level name {name}")]
    DuplicateLevel { name: String },

    #[error("portal endpoint {position} is outside level {level}")]
    PortalOutOfBounds { level: String, position: Position },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidGlyph { .. } => "MAP_INVALID_GLYPH",
            Self::Empty { .. } => "MAP_EMPTY",
            Self::DuplicatePlayer { .. } => "MAP_DUPLICATE_PLAYER",
            Self::MissingPlayer { .. } => "MAP_MISSING_PLAYER",
            Self::MonsterOverlap { .. } => "MAP_MONSTER_OVERLAP",
            Self::UnknownLevel { .. } => "MAP_UNKNOWN_LEVEL",
            Self::DuplicateLevel { .. } => "MAP_DUPLICATE_LEVEL",
            Self::PortalOutOfBounds { .. } => "MAP_PORTAL_OUT_OF_BOUNDS",
        }
    }
}
