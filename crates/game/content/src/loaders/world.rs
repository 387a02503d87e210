//! World file loader.
//!
//! The world file is comma separated. The first row names the starting
//! level; every other row is one portal:
//!
//! ```text
//! level1
//! level1, 24, 6, level2, 1, 1
//! ```
//!
//! Blank lines are ignored and fields are trimmed.

use std::path::Path;

use game_core::{Level, PlayerConfig, Position, World};

use crate::loaders::{LoadResult, read_file};

/// One portal row of a world file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalLink {
    /// 1-based line number in the source file.
    pub line: usize,
    pub from_level: String,
    pub from: Position,
    pub to_level: String,
    pub to: Position,
}

/// Parsed world file: the starting level and the portal graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldFile {
    pub start: String,
    pub portals: Vec<PortalLink>,
}

impl WorldFile {
    /// Assembles a [`World`] from loaded levels and registers every portal.
    ///
    /// Level names that do not match a loaded level and portal endpoints
    /// outside their level are rejected with the offending line.
    pub fn build(
        &self,
        levels: impl IntoIterator<Item = Level>,
        player: &PlayerConfig,
    ) -> LoadResult<World> {
        let mut world = World::new(levels, &self.start, player)
            .map_err(|e| anyhow::anyhow!("Invalid world: {}", e))?;

        for link in &self.portals {
            world
                .add_portal(&link.from_level, link.from, &link.to_level, link.to)
                .map_err(|e| anyhow::anyhow!("World file line {}: {}", link.line, e))?;
            tracing::debug!(
                target: "content::world",
                from_level = %link.from_level,
                from = %link.from,
                to_level = %link.to_level,
                to = %link.to,
                "portal registered"
            );
        }

        tracing::info!(
            target: "content::world",
            start = %self.start,
            levels = world.level_names().count(),
            portals = self.portals.len(),
            "world assembled"
        );
        Ok(world)
    }
}

/// Loader for world files.
pub struct WorldLoader;

impl WorldLoader {
    pub fn load(path: &Path) -> LoadResult<WorldFile> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid world file {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<WorldFile> {
        let mut rows = content
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, first) = rows
            .next()
            .ok_or_else(|| anyhow::anyhow!("World file is empty"))?;
        let start = first
            .split(',')
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| anyhow::anyhow!("Line 1: missing starting level name"))?
            .to_string();

        let portals = rows
            .map(|(line, row)| parse_portal(line, row))
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(WorldFile { start, portals })
    }
}

fn parse_portal(line: usize, row: &str) -> LoadResult<PortalLink> {
    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    let [from_level, x, y, to_level, to_x, to_y] = fields.as_slice() else {
        anyhow::bail!("Line {line}: expected 6 fields, found {}", fields.len());
    };

    Ok(PortalLink {
        line,
        from_level: from_level.to_string(),
        from: Position::new(coordinate(line, x)?, coordinate(line, y)?),
        to_level: to_level.to_string(),
        to: Position::new(coordinate(line, to_x)?, coordinate(line, to_y)?),
    })
}

fn coordinate(line: usize, field: &str) -> LoadResult<i32> {
    field
        .parse()
        .map_err(|e| anyhow::anyhow!("Line {line}: invalid coordinate {field:?}: {e}"))
}
