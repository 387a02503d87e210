//! Input values accepted by the turn worker.
use std::fmt;

use game_core::{CardinalDirection, PlayerAction};

/// Identifies one registered display client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(pub u32);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client#{}", self.0)
    }
}

/// A request from an input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Input {
    /// No key pressed; resolves nothing.
    None,
    Up,
    Down,
    Left,
    Right,
    Search,
    /// Stop the whole simulation.
    QuitGame,
    /// The given client's window closed; stop broadcasting to it.
    CloseWindow(ClientId),
}

impl Input {
    /// The player action this input resolves to, if it starts a turn.
    pub fn action(self) -> Option<PlayerAction> {
        let direction = match self {
            Self::Up => CardinalDirection::Up,
            Self::Down => CardinalDirection::Down,
            Self::Left => CardinalDirection::Left,
            Self::Right => CardinalDirection::Right,
            Self::Search => return Some(PlayerAction::Search),
            Self::None | Self::QuitGame | Self::CloseWindow(_) => return None,
        };
        Some(PlayerAction::Move(direction))
    }
}
