//! Deterministic dungeon rules shared by the runtime and tools.
//!
//! `game-core` defines the tile grid, line of sight, pathfinding, characters,
//! combat and the level graph, and exposes pure synchronous APIs over them.
//! All state mutation flows through [`engine::GameEngine`]; display clients
//! only ever see [`LevelSnapshot`] copies.
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod fov;
pub mod map;
pub mod pathfinding;
pub mod state;

pub use combat::AttackOutcome;
pub use config::{ConfigError, GameConfig, MAX_SIGHT_RANGE, PlayerConfig};
pub use engine::{GameEngine, PlayerAction, TurnError, TurnReport};
pub use error::{ErrorSeverity, GameError};
pub use map::parse_level;
pub use state::{
    CardinalDirection, Character, EventLog, GameEvent, Level, LevelSnapshot, MapError, Monster,
    MonsterCatalog, MonsterTemplate, Overlay, Player, Portal, Position, TerrainKind, Tile, World,
};
