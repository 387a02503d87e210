//! Level layout loader.
//!
//! A `.map` file is a plain glyph grid, one text line per row. The file stem
//! names the level.

use std::path::{Path, PathBuf};

use game_core::{Level, MonsterCatalog, parse_level};

use crate::loaders::{LoadResult, read_file};

/// Loader for `.map` glyph grids.
pub struct MapLoader;

impl MapLoader {
    pub const EXTENSION: &'static str = "map";

    /// Loads a single level, named after the file stem.
    pub fn load(path: &Path, catalog: &MonsterCatalog, event_capacity: usize) -> LoadResult<Level> {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| anyhow::anyhow!("Map file has no usable name: {}", path.display()))?;
        let content = read_file(path)?;
        let rows: Vec<&str> = content.lines().collect();

        let level = parse_level(name, &rows, catalog, event_capacity)
            .map_err(|e| anyhow::anyhow!("Invalid map {}: {}", path.display(), e))?;

        tracing::debug!(
            target: "content::map",
            level = level.name(),
            width = level.width(),
            height = level.height(),
            monsters = level.monsters().len(),
            "level loaded"
        );
        Ok(level)
    }

    /// Loads every `.map` file in `dir`, ordered by file name.
    pub fn load_dir(
        dir: &Path,
        catalog: &MonsterCatalog,
        event_capacity: usize,
    ) -> LoadResult<Vec<Level>> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read map directory {}: {}", dir.display(), e))?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == Self::EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            anyhow::bail!("No .{} files found in {}", Self::EXTENSION, dir.display());
        }

        paths
            .iter()
            .map(|path| Self::load(path, catalog, event_capacity))
            .collect()
    }
}
