use crate::error::{ErrorSeverity, GameError};

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of lines each level's circular event log retains.
    pub event_log_capacity: usize,
    /// Starting stats for the player character.
    pub player: PlayerConfig,
}

impl GameConfig {
    pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self {
            event_log_capacity: Self::DEFAULT_EVENT_LOG_CAPACITY,
            player: PlayerConfig::default(),
        }
    }

    pub fn with_event_log_capacity(mut self, capacity: usize) -> Self {
        self.event_log_capacity = capacity;
        self
    }

    pub fn with_player(mut self, player: PlayerConfig) -> Self {
        self.player = player;
        self
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_log_capacity == 0 {
            return Err(ConfigError::ZeroEventLogCapacity);
        }
        self.player.validate()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Starting stats for the player.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    pub name: String,
    pub glyph: char,
    pub hp: i32,
    pub strength: i32,
    pub speed: f64,
    pub sight_range: i32,
}

impl PlayerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed > 0.0) {
            return Err(ConfigError::NonPositiveSpeed {
                name: self.name.clone(),
                speed: self.speed,
            });
        }
        validate_sight_range(&self.name, self.sight_range)
    }
}

/// Largest sight radius any character may have.
pub const MAX_SIGHT_RANGE: i32 = 64;

pub(crate) fn validate_sight_range(name: &str, range: i32) -> Result<(), ConfigError> {
    if range < 0 {
        return Err(ConfigError::NegativeSightRange {
            name: name.to_string(),
            range,
        });
    }
    if range > MAX_SIGHT_RANGE {
        return Err(ConfigError::SightRangeTooLarge {
            name: name.to_string(),
            range,
            max: MAX_SIGHT_RANGE,
        });
    }
    Ok(())
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Dralanor".to_string(),
            glyph: '@',
            hp: 20,
            strength: 20,
            speed: 1.0,
            sight_range: 7,
        }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("event log capacity must be at least 1")]
    ZeroEventLogCapacity,

    #[error("{name} has non-positive speed {speed}")]
    NonPositiveSpeed { name: String, speed: f64 },

    #[error("{name} has negative sight range {range}")]
    NegativeSightRange { name: String, range: i32 },

    #[error("{name} has sight range {range}, above the limit of {max}")]
    SightRangeTooLarge { name: String, range: i32, max: i32 },

    #[error("monster template {name} uses reserved glyph {glyph:?}")]
    ReservedGlyph { name: String, glyph: char },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroEventLogCapacity => "CONFIG_ZERO_EVENT_LOG",
            Self::NonPositiveSpeed { .. } => "CONFIG_NON_POSITIVE_SPEED",
            Self::NegativeSightRange { .. } => "CONFIG_NEGATIVE_SIGHT_RANGE",
            Self::SightRangeTooLarge { .. } => "CONFIG_SIGHT_RANGE_TOO_LARGE",
            Self::ReservedGlyph { .. } => "CONFIG_RESERVED_GLYPH",
        }
    }
}
