use std::collections::BTreeMap;

use super::{Character, EventLog, GameEvent, Level, Monster, Player, Position, Tile};

/// Immutable copy of the current level handed to display clients.
///
/// Clients share one `Arc<LevelSnapshot>` per broadcast; nothing they do can
/// reach the engine's state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSnapshot {
    pub level: String,
    pub turn: u64,
    pub tiles: Vec<Vec<Tile>>,
    pub player: Character,
    pub monsters: BTreeMap<Position, Monster>,
    pub events: EventLog,
    pub last_event: GameEvent,
}

impl LevelSnapshot {
    pub fn capture(level: &Level, player: &Player, turn: u64) -> Self {
        Self {
            level: level.name().to_string(),
            turn,
            tiles: level.rows().to_vec(),
            player: player.character.clone(),
            monsters: level.monsters().clone(),
            events: level.events().clone(),
            last_event: level.last_event(),
        }
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        self.tiles
            .get(position.y as usize)?
            .get(position.x as usize)
    }

    /// Event lines from oldest to newest.
    pub fn events_in_order(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.iter()
    }

    /// Positions currently inside the player's line of sight.
    pub fn visible_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, tile)| tile.visible)
                .map(move |(x, _)| Position::new(x as i32, y as i32))
        })
    }
}
