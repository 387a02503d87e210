use crate::combat;
use crate::fov;
use crate::state::{GameEvent, Portal, Position};

use super::{GameEngine, TurnError};

impl GameEngine<'_> {
    /// Resolves the player stepping towards `target`.
    ///
    /// A monster on `target` is attacked instead of moved into; a walkable
    /// tile is entered (possibly through a portal); a closed door is opened
    /// without moving. Anything else is a wasted step.
    pub fn resolve_movement(&mut self, target: Position) -> Result<(), TurnError> {
        let (level, player) = self.world.current_mut();

        if let Some(mut monster) = level.monsters.remove(&target) {
            combat::attack(
                level,
                &mut player.character,
                &mut monster.character,
                GameEvent::Attack,
            );
            if monster.character.is_alive() {
                level.monsters.insert(target, monster);
            }
            return Ok(());
        }

        if level.can_walk(target) {
            self.move_to(target);
            return Ok(());
        }

        if level.open_door(target, &player.character) {
            level.last_event = GameEvent::DoorOpen;
        }
        Ok(())
    }

    /// Puts the player on `to`, following a portal if one starts there.
    ///
    /// The caller has already checked that `to` is walkable.
    pub fn move_to(&mut self, to: Position) {
        match self.world.current_level().portal_at(to).cloned() {
            Some(portal) => self.traverse(to, portal),
            None => self.step_within_level(to),
        }
    }

    fn step_within_level(&mut self, to: Position) {
        let (level, player) = self.world.current_mut();
        player.character.position = to;
        level.last_event = GameEvent::Move;
        fov::recompute_visibility(level, &player.character);
    }

    fn traverse(&mut self, entrance: Position, portal: Portal) {
        let blocked = self
            .world
            .level(&portal.level)
            .is_none_or(|target| target.monster_at(portal.position).is_some());
        if blocked {
            self.step_within_level(entrance);
            let (level, _) = self.world.current_mut();
            level.add_event(format!("Something blocks the way to {}", portal.level));
            return;
        }

        self.world.current = portal.level;
        let (level, player) = self.world.current_mut();
        player.character.position = portal.position;
        level.last_event = GameEvent::Portal;
        fov::recompute_visibility(level, &player.character);
    }
}
