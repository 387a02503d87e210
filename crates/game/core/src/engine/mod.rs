//! Turn resolution for the current level.
//!
//! [`GameEngine`] borrows the [`World`] mutably for the duration of one turn:
//! it resolves the player's action, then gives every monster on the (possibly
//! new) current level one update. Nothing else mutates the world.
mod errors;
mod movement;
mod turns;

pub use errors::TurnError;

use crate::state::{CardinalDirection, GameEvent, Position, World};

/// What the player asked to do this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    Move(CardinalDirection),
    /// Stay in place for one turn; monsters still act.
    Search,
}

/// Summary of a resolved turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u64,
    pub level: String,
    pub event: GameEvent,
    pub player: Position,
    /// Newest line of the current level's event log, if any.
    pub message: Option<String>,
}

pub struct GameEngine<'a> {
    world: &'a mut World,
}

impl<'a> GameEngine<'a> {
    pub fn new(world: &'a mut World) -> Self {
        Self { world }
    }

    /// Resolves one player action followed by one update per monster.
    ///
    /// Returns [`TurnError::PlayerDead`] as soon as the player's HP drops to
    /// zero; the world is left as it was at that moment.
    pub fn step(&mut self, action: PlayerAction) -> Result<TurnReport, TurnError> {
        self.world.turn += 1;
        self.world.current_mut().0.last_event = GameEvent::None;

        match action {
            PlayerAction::Move(direction) => {
                let target = direction.step(self.world.player.position());
                self.resolve_movement(target)?;
            }
            PlayerAction::Search => {}
        }

        self.run_monsters()?;

        let level = self.world.current_level();
        Ok(TurnReport {
            turn: self.world.turn,
            level: level.name().to_string(),
            event: level.last_event(),
            player: self.world.player.position(),
            message: level.events().latest().map(str::to_string),
        })
    }

    pub fn world(&self) -> &World {
        self.world
    }
}
