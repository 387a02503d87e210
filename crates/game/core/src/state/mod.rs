//! Authoritative game state representation.
//!
//! This module owns the tile grid, characters, levels and the world graph.
//! Runtime layers read it through [`LevelSnapshot`] copies and mutate it
//! exclusively through [`crate::engine::GameEngine`].
mod actor;
mod common;
mod error;
mod level;
mod snapshot;
mod tile;
mod world;

pub use actor::{Character, Monster, MonsterCatalog, MonsterTemplate, Player};
pub use common::{CardinalDirection, Position};
pub use error::MapError;
pub use level::{EventLog, GameEvent, Level, Portal};
pub use snapshot::LevelSnapshot;
pub use tile::{Overlay, TerrainKind, Tile};
pub use world::World;
