//! Plain-text rendering of level snapshots.
use std::fmt::Write;

use game_core::{LevelSnapshot, Position, Tile};

/// Glyph for one cell: actors only where currently visible, remembered
/// terrain where seen, blank elsewhere.
fn cell(snapshot: &LevelSnapshot, position: Position, tile: &Tile) -> char {
    if tile.visible {
        if snapshot.player.position == position {
            return snapshot.player.glyph;
        }
        if let Some(monster) = snapshot.monsters.get(&position) {
            return monster.character.glyph;
        }
    }
    if tile.seen { tile.glyph() } else { ' ' }
}

/// Renders the map, a status line and the event log, oldest line first.
pub fn render_frame(snapshot: &LevelSnapshot) -> String {
    let mut out = String::new();

    for (y, row) in snapshot.tiles.iter().enumerate() {
        let line: String = row
            .iter()
            .enumerate()
            .map(|(x, tile)| cell(snapshot, Position::new(x as i32, y as i32), tile))
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let player = &snapshot.player;
    let _ = writeln!(
        out,
        "{} | turn {} | {} HP {} STR {} | {}",
        snapshot.level, snapshot.turn, player.name, player.hp, player.strength, snapshot.last_event
    );
    for line in snapshot.events_in_order() {
        let _ = writeln!(out, "  {line}");
    }
    out
}

#[cfg(test)]
mod tests {
    use game_core::{GameEngine, MonsterCatalog, PlayerAction, PlayerConfig, World, parse_level};

    use super::*;

    fn world(rows: &[&str], sight_range: i32) -> World {
        let level = parse_level("level1", rows, &MonsterCatalog::default(), 10).unwrap();
        let player = PlayerConfig {
            sight_range,
            ..PlayerConfig::default()
        };
        World::new([level], "level1", &player).unwrap()
    }

    #[test]
    fn draws_visible_actors_and_hides_unseen_tiles() {
        let snapshot = world(&["#####", "#@.R#", "#####", "     ", "#...#"], 3).snapshot();
        let frame = render_frame(&snapshot);
        let lines: Vec<&str> = frame.lines().collect();

        assert!(lines[0].starts_with("###"));
        assert_eq!(lines[1], "#@.R#");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "");
        assert!(lines[5].starts_with("level1 | turn 0 | Dralanor HP 20"));
    }

    #[test]
    fn remembered_tiles_lose_their_monsters() {
        let mut snapshot = world(&["@.R"], 7).snapshot();
        assert_eq!(render_frame(&snapshot).lines().next(), Some("@.R"));

        snapshot.tiles[0][2].visible = false;
        assert_eq!(render_frame(&snapshot).lines().next(), Some("@.."));
    }

    #[test]
    fn event_log_follows_the_map() {
        let mut world = world(&["@R"], 7);
        GameEngine::new(&mut world).step(PlayerAction::Search).unwrap();
        let frame = render_frame(&world.snapshot());
        assert!(frame.ends_with("  Rat attacked Dralanor for 5\n"), "{frame}");
    }
}
