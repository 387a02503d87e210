//! Data-driven dungeon content and its loaders.
//!
//! Reads the files a dungeon is assembled from:
//! - Level layouts (`maps/*.map` glyph grids, one level per file)
//! - The world file (starting level plus portal links)
//! - Monster catalogs (RON)
//! - Game configuration (TOML)
//!
//! Everything is turned into `game-core` types up front; a failure anywhere
//! aborts loading and no partial level or world is returned.

pub mod loaders;

pub use loaders::{
    ConfigLoader, ContentFactory, DungeonContent, LoadResult, MapLoader, MonsterLoader,
    PortalLink, WorldFile, WorldLoader,
};
