use crate::pathfinding;
use crate::state::{
    Level, MapError, Monster, MonsterCatalog, Overlay, Position, TerrainKind, Tile,
};

/// Parses a glyph grid into a level.
///
/// Door, stair, player and monster glyphs hide the terrain beneath them; those
/// tiles start as [`TerrainKind::Pending`] and take the terrain of the nearest
/// reachable floor once the whole grid is known. Any unknown glyph aborts the
/// parse.
pub fn parse_level<S: AsRef<str>>(
    name: &str,
    rows: &[S],
    catalog: &MonsterCatalog,
    event_capacity: usize,
) -> Result<Level, MapError> {
    if rows.is_empty() {
        return Err(MapError::Empty {
            level: name.to_string(),
        });
    }

    let mut grid = Vec::with_capacity(rows.len());
    let mut player_start: Option<Position> = None;
    let mut monsters = Vec::new();

    for (y, row) in rows.iter().enumerate() {
        let mut tiles = Vec::with_capacity(row.as_ref().len());
        for (x, glyph) in row.as_ref().chars().enumerate() {
            let position = Position::new(x as i32, y as i32);
            let tile = match glyph {
                ' ' | '\t' | '\r' | '\n' => Tile::BLANK,
                '#' => Tile::new(TerrainKind::StoneWall, Overlay::None),
                '.' => Tile::new(TerrainKind::DirtFloor, Overlay::None),
                '|' => Tile::new(TerrainKind::Pending, Overlay::ClosedDoor),
                '/' => Tile::new(TerrainKind::Pending, Overlay::OpenDoor),
                'u' => Tile::new(TerrainKind::Pending, Overlay::UpStair),
                'd' => Tile::new(TerrainKind::Pending, Overlay::DownStair),
                '@' => {
                    if let Some(first) = player_start {
                        return Err(MapError::DuplicatePlayer {
                            level: name.to_string(),
                            first,
                            second: position,
                        });
                    }
                    player_start = Some(position);
                    Tile::new(TerrainKind::Pending, Overlay::None)
                }
                other => match catalog.get(other) {
                    Some(template) => {
                        monsters.push(Monster::from_template(template, position));
                        Tile::new(TerrainKind::Pending, Overlay::None)
                    }
                    None => {
                        return Err(MapError::InvalidGlyph {
                            level: name.to_string(),
                            glyph: other,
                            position,
                        });
                    }
                },
            };
            tiles.push(tile);
        }
        grid.push(tiles);
    }

    let mut level = Level::new(name, grid, event_capacity);
    if let Some(start) = player_start {
        level.set_player_start(start);
    }
    for monster in monsters {
        level.add_monster(monster)?;
    }
    resolve_pending(&mut level);

    Ok(level)
}

fn resolve_pending(level: &mut Level) {
    for y in 0..level.height() {
        for x in 0..level.width() {
            let position = Position::new(x as i32, y as i32);
            if level
                .tile(position)
                .is_some_and(|tile| tile.terrain == TerrainKind::Pending)
            {
                let terrain = pathfinding::bfs_floor(level, position);
                if let Some(tile) = level.tile_mut(position) {
                    tile.terrain = terrain;
                }
            }
        }
    }
}
