use crate::combat;
use crate::pathfinding;
use crate::state::{GameEvent, Level, Monster, Player, Position};

use super::{GameEngine, TurnError};

impl GameEngine<'_> {
    /// Gives every monster on the current level one update, in key order.
    ///
    /// Each monster is lifted out of the map while it acts and reinserted
    /// under its final position, so its key never goes stale. A monster can
    /// only step onto tiles no other monster holds, which means it can never
    /// land on the key of a monster that has yet to act.
    pub(crate) fn run_monsters(&mut self) -> Result<(), TurnError> {
        let (level, player) = self.world.current_mut();
        let order: Vec<Position> = level.monsters.keys().copied().collect();

        for key in order {
            let Some(mut monster) = level.monsters.remove(&key) else {
                continue;
            };
            update_monster(level, player, &mut monster);
            let killer = (!player.character.is_alive()).then(|| monster.character.name.clone());
            level.monsters.insert(monster.position(), monster);

            if let Some(killer) = killer {
                return Err(TurnError::PlayerDead {
                    killer,
                    hp: player.character.hp,
                });
            }
        }

        Ok(())
    }
}

/// One monster turn: accrue speed, chase the player along the A* path, and
/// attack instead of stepping onto the player's tile.
///
/// Without a path the turn is passed and this turn's accrual is forfeited.
/// Unspent action points carry over, capped at one turn's worth (never below
/// one point) so a blocked monster cannot bank a burst of moves.
fn update_monster(level: &mut Level, player: &mut Player, monster: &mut Monster) {
    let character = &mut monster.character;
    character.ap += character.speed;

    let target = player.position();
    let path = pathfinding::astar(level, character.position, target);
    if path.is_empty() {
        character.ap -= character.speed;
        return;
    }

    for &step in path.iter().skip(1) {
        if character.ap < 1.0 {
            break;
        }
        if step == target {
            combat::attack(level, character, &mut player.character, GameEvent::Hit);
            break;
        }
        if level.monsters.contains_key(&step) {
            break;
        }
        character.position = step;
        character.ap -= 1.0;
    }

    character.ap = character.ap.min(character.speed.max(1.0));
}
