use std::collections::BTreeMap;

use crate::config::PlayerConfig;
use crate::fov;
use crate::state::error::MapError;
use crate::state::{Level, LevelSnapshot, Player, Portal, Position};

/// Every level of the dungeon plus the single player roaming them.
///
/// The set of levels is fixed at construction. Exactly one level is
/// "current": the one the player stands on and clients observe.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub(crate) levels: BTreeMap<String, Level>,
    pub(crate) current: String,
    pub(crate) player: Player,
    pub(crate) turn: u64,
}

impl World {
    /// Assembles a world and places the player on `start`'s player glyph.
    ///
    /// Visibility of the starting level is computed before returning, so the
    /// first broadcast already shows what the player can see.
    pub fn new(
        levels: impl IntoIterator<Item = Level>,
        start: &str,
        player: &PlayerConfig,
    ) -> Result<Self, MapError> {
        let mut by_name = BTreeMap::new();
        for level in levels {
            let name = level.name().to_string();
            if by_name.insert(name.clone(), level).is_some() {
                return Err(MapError::DuplicateLevel { name });
            }
        }

        let start_level = by_name
            .get_mut(start)
            .ok_or_else(|| MapError::UnknownLevel {
                name: start.to_string(),
            })?;
        let position = start_level
            .player_start()
            .ok_or_else(|| MapError::MissingPlayer {
                level: start.to_string(),
            })?;

        let player = Player::new(player, position);
        fov::recompute_visibility(start_level, &player.character);

        Ok(Self {
            levels: by_name,
            current: start.to_string(),
            player,
            turn: 0,
        })
    }

    /// Registers a one-directional portal. A round trip needs two calls.
    pub fn add_portal(
        &mut self,
        from_level: &str,
        from: Position,
        to_level: &str,
        to: Position,
    ) -> Result<(), MapError> {
        let target = self
            .levels
            .get(to_level)
            .ok_or_else(|| MapError::UnknownLevel {
                name: to_level.to_string(),
            })?;
        if !target.in_range(to) {
            return Err(MapError::PortalOutOfBounds {
                level: to_level.to_string(),
                position: to,
            });
        }

        let source = self
            .levels
            .get_mut(from_level)
            .ok_or_else(|| MapError::UnknownLevel {
                name: from_level.to_string(),
            })?;
        if !source.in_range(from) {
            return Err(MapError::PortalOutOfBounds {
                level: from_level.to_string(),
                position: from,
            });
        }
        source.insert_portal(from, Portal::new(to_level, to));
        Ok(())
    }

    pub fn current_level_name(&self) -> &str {
        &self.current
    }

    pub fn current_level(&self) -> &Level {
        // `current` is only ever set to a key present in `levels`.
        &self.levels[&self.current]
    }

    pub fn level(&self, name: &str) -> Option<&Level> {
        self.levels.get(name)
    }

    pub fn level_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.levels.keys().map(String::as_str)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Number of turns resolved so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Owned copy of the current level for display clients.
    pub fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot::capture(self.current_level(), &self.player, self.turn)
    }

    /// Splits the borrow so the current level and the player can be mutated together.
    pub(crate) fn current_mut(&mut self) -> (&mut Level, &mut Player) {
        let level = self
            .levels
            .get_mut(&self.current)
            .unwrap_or_else(|| unreachable!("current level {} is always registered", self.current));
        (level, &mut self.player)
    }
}
