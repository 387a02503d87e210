//! Grid queries and map construction.
//!
//! Walkability and transparency are the two predicates every other system is
//! built on: pathfinding expands along [`Level::can_walk`] and rays stop at
//! the first tile that fails [`Level::can_see_through`].
mod builder;

pub use builder::parse_level;

use crate::fov;
use crate::state::{Character, Level, Overlay, Position};

impl Level {
    pub fn in_range(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.width()
            && (position.y as usize) < self.height()
    }

    /// True when a character could step onto `position` right now.
    ///
    /// Walls, blank space, closed doors and monsters block movement.
    /// The player's own tile is not treated as occupied.
    pub fn can_walk(&self, position: Position) -> bool {
        self.is_open(position) && !self.monsters.contains_key(&position)
    }

    /// Like [`Level::can_walk`] but monsters do not block sight.
    pub fn can_see_through(&self, position: Position) -> bool {
        self.is_open(position)
    }

    fn is_open(&self, position: Position) -> bool {
        match self.tile(position) {
            Some(tile) => !tile.terrain.is_solid() && tile.overlay != Overlay::ClosedDoor,
            None => false,
        }
    }

    pub fn is_closed_door(&self, position: Position) -> bool {
        self.tile(position)
            .is_some_and(|tile| tile.overlay == Overlay::ClosedDoor)
    }

    /// Opens a closed door and recomputes what `viewer` can see.
    ///
    /// Returns false and changes nothing if there is no closed door at
    /// `position`.
    pub fn open_door(&mut self, position: Position, viewer: &Character) -> bool {
        match self.tile_mut(position) {
            Some(tile) if tile.overlay == Overlay::ClosedDoor => {
                tile.overlay = Overlay::OpenDoor;
            }
            _ => return false,
        }
        fov::recompute_visibility(self, viewer);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::state::{MonsterCatalog, Player};

    fn level(rows: &[&str]) -> Level {
        parse_level("test", rows, &MonsterCatalog::default(), 8).unwrap()
    }

    #[test]
    fn walls_doors_and_monsters_block_walking() {
        let level = level(&["#####", "#.|R#", "#####"]);
        assert!(level.can_walk(Position::new(1, 1)));
        assert!(!level.can_walk(Position::new(0, 1)));
        assert!(!level.can_walk(Position::new(2, 1)));
        assert!(!level.can_walk(Position::new(3, 1)));
        assert!(!level.can_walk(Position::new(-1, 1)));
        assert!(!level.can_walk(Position::new(5, 1)));
    }

    #[test]
    fn monsters_do_not_block_sight() {
        let level = level(&["#####", "#.|R#", "#####"]);
        assert!(level.can_see_through(Position::new(3, 1)));
        assert!(!level.can_see_through(Position::new(2, 1)));
        assert!(!level.can_see_through(Position::new(0, 0)));
    }

    #[test]
    fn opening_a_door_makes_it_walkable_once() {
        let mut level = level(&["#####", "#@|.#", "#####"]);
        let player = Player::new(&PlayerConfig::default(), Position::new(1, 1));
        let door = Position::new(2, 1);

        assert!(level.open_door(door, &player.character));
        assert_eq!(level.tile(door).map(|t| t.overlay), Some(Overlay::OpenDoor));
        assert!(level.can_walk(door));
        assert!(!level.open_door(door, &player.character));
    }

    #[test]
    fn opening_a_door_reveals_the_room_behind_it() {
        let mut level = level(&["#######", "#@|...#", "#######"]);
        let player = Player::new(&PlayerConfig::default(), Position::new(1, 1));
        fov::recompute_visibility(&mut level, &player.character);
        let behind = Position::new(4, 1);
        assert!(!level.tile(behind).is_some_and(|t| t.visible));

        level.open_door(Position::new(2, 1), &player.character);
        assert!(level.tile(behind).is_some_and(|t| t.visible && t.seen));
    }
}
