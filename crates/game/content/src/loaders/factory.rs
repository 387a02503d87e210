//! Content factory for assembling a dungeon from a data directory.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, Level, MonsterCatalog, World};

use crate::loaders::{ConfigLoader, LoadResult, MapLoader, MonsterLoader, WorldFile, WorldLoader};

/// Everything needed to start a simulation.
#[derive(Clone, Debug)]
pub struct DungeonContent {
    pub config: GameConfig,
    pub monsters: MonsterCatalog,
    pub world: World,
}

/// Content factory that loads all dungeon content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml     (optional)
/// ├── monsters.ron    (optional)
/// ├── world.txt
/// └── maps/
///     ├── level1.map
///     └── level2.map
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const MONSTERS_FILE: &'static str = "monsters.ron";
    pub const WORLD_FILE: &'static str = "world.txt";
    pub const MAPS_DIR: &'static str = "maps";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loads `config.toml`, or the default configuration when absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(target: "content", "no {} found, using defaults", Self::CONFIG_FILE);
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Loads `monsters.ron`, or the built-in Rat and Spider when absent.
    pub fn load_monsters(&self) -> LoadResult<MonsterCatalog> {
        let path = self.data_dir.join(Self::MONSTERS_FILE);
        if !path.exists() {
            tracing::debug!(target: "content", "no {} found, using defaults", Self::MONSTERS_FILE);
            return Ok(MonsterCatalog::default());
        }
        MonsterLoader::load(&path)
    }

    /// Loads every level under `maps/`.
    pub fn load_levels(
        &self,
        catalog: &MonsterCatalog,
        event_capacity: usize,
    ) -> LoadResult<Vec<Level>> {
        MapLoader::load_dir(&self.data_dir.join(Self::MAPS_DIR), catalog, event_capacity)
    }

    /// Loads `world.txt`.
    pub fn load_world_file(&self) -> LoadResult<WorldFile> {
        WorldLoader::load(&self.data_dir.join(Self::WORLD_FILE))
    }

    /// Loads config, monsters, levels and the world file, then assembles
    /// the world.
    pub fn load(&self) -> LoadResult<DungeonContent> {
        let config = self.load_config()?;
        let monsters = self.load_monsters()?;
        let levels = self.load_levels(&monsters, config.event_log_capacity)?;
        let world_file = self.load_world_file()?;
        let world = world_file.build(levels, &config.player)?;

        tracing::info!(
            target: "content",
            data_dir = %self.data_dir.display(),
            start = world.current_level_name(),
            "content loaded"
        );
        Ok(DungeonContent {
            config,
            monsters,
            world,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
