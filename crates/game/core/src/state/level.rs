use std::collections::BTreeMap;

use super::{Monster, Position, Tile};
use crate::state::error::MapError;

/// Feedback tag describing what the last resolved turn did on a level.
///
/// Clients use it to pick a sound or animation without diffing snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameEvent {
    #[default]
    None,
    Move,
    DoorOpen,
    /// The player struck a monster.
    Attack,
    /// A monster struck the player.
    Hit,
    /// The player arrived through a portal.
    Portal,
}

/// One-directional link from a tile to a position on another level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Portal {
    pub level: String,
    pub position: Position,
}

impl Portal {
    pub fn new(level: impl Into<String>, position: Position) -> Self {
        Self {
            level: level.into(),
            position,
        }
    }
}

/// Fixed-capacity ring of human-readable event lines.
///
/// `cursor` is the slot the next line will be written to, so the newest line
/// sits just before it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLog {
    lines: Vec<String>,
    cursor: usize,
}

impl EventLog {
    /// Creates an empty log. A capacity of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: vec![String::new(); capacity.max(1)],
            cursor: 0,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines[self.cursor] = line.into();
        self.cursor = (self.cursor + 1) % self.lines.len();
    }

    pub fn capacity(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Raw slots in storage order; unwritten slots are empty strings.
    pub fn slots(&self) -> &[String] {
        &self.lines
    }

    /// Written lines from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        let (newer, older) = self.lines.split_at(self.cursor);
        older
            .iter()
            .chain(newer.iter())
            .filter(|line| !line.is_empty())
            .map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        let index = (self.cursor + self.lines.len() - 1) % self.lines.len();
        let line = self.lines[index].as_str();
        (!line.is_empty()).then_some(line)
    }
}

/// A single named floor of the dungeon.
///
/// The tile grid is rectangular; monsters are keyed by their own position
/// and portals are fixed once the world is assembled.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    name: String,
    tiles: Vec<Vec<Tile>>,
    width: usize,
    pub(crate) monsters: BTreeMap<Position, Monster>,
    portals: BTreeMap<Position, Portal>,
    player_start: Option<Position>,
    pub(crate) events: EventLog,
    pub(crate) last_event: GameEvent,
}

impl Level {
    /// Builds a level from raw rows, padding ragged rows with blank tiles.
    pub fn new(name: impl Into<String>, mut tiles: Vec<Vec<Tile>>, event_capacity: usize) -> Self {
        let width = tiles.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut tiles {
            row.resize(width, Tile::BLANK);
        }
        Self {
            name: name.into(),
            tiles,
            width,
            monsters: BTreeMap::new(),
            portals: BTreeMap::new(),
            player_start: None,
            events: EventLog::new(event_capacity),
            last_event: GameEvent::None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.tiles.len()
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        if !self.in_range(position) {
            return None;
        }
        Some(&self.tiles[position.y as usize][position.x as usize])
    }

    pub(crate) fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        if !self.in_range(position) {
            return None;
        }
        Some(&mut self.tiles[position.y as usize][position.x as usize])
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> + '_ {
        self.tiles.iter_mut().flatten()
    }

    pub fn player_start(&self) -> Option<Position> {
        self.player_start
    }

    pub(crate) fn set_player_start(&mut self, position: Position) {
        self.player_start = Some(position);
    }

    pub fn monsters(&self) -> &BTreeMap<Position, Monster> {
        &self.monsters
    }

    pub fn monster_at(&self, position: Position) -> Option<&Monster> {
        self.monsters.get(&position)
    }

    /// Places a monster at its own position. Fails if the tile is taken.
    pub fn add_monster(&mut self, monster: Monster) -> Result<(), MapError> {
        let position = monster.position();
        if self.monsters.contains_key(&position) {
            return Err(MapError::MonsterOverlap {
                level: self.name.clone(),
                position,
            });
        }
        self.monsters.insert(position, monster);
        Ok(())
    }

    pub fn portals(&self) -> &BTreeMap<Position, Portal> {
        &self.portals
    }

    pub fn portal_at(&self, position: Position) -> Option<&Portal> {
        self.portals.get(&position)
    }

    pub(crate) fn insert_portal(&mut self, from: Position, portal: Portal) {
        self.portals.insert(from, portal);
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn add_event(&mut self, line: impl Into<String>) {
        self.events.push(line);
    }

    pub fn last_event(&self) -> GameEvent {
        self.last_event
    }

    /// True when every monster key matches the monster's own position and no
    /// monster stands on `player`.
    pub fn occupancy_consistent(&self, player: Position) -> bool {
        self.monsters
            .iter()
            .all(|(key, monster)| *key == monster.position() && *key != player)
    }
}
