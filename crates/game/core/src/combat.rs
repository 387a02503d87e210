//! Deterministic melee resolution.
//!
//! An attack always lands for exactly the attacker's strength; there is no
//! variance and no armor.
use crate::state::{Character, GameEvent, Level};

/// Result of a single attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub damage: i32,
    /// True when the defender's HP dropped to zero or below.
    pub killed: bool,
}

/// Resolves `attacker` striking `defender` and records it on `level`.
///
/// Spends one action point, subtracts strength from the defender's HP, appends
/// a log line and tags the level's last event with `event`. Removing a dead
/// monster is left to the caller, which owns the monster map entry.
pub fn attack(
    level: &mut Level,
    attacker: &mut Character,
    defender: &mut Character,
    event: GameEvent,
) -> AttackOutcome {
    attacker.ap -= 1.0;
    let damage = attacker.strength;
    defender.hp -= damage;

    let killed = !defender.is_alive();
    if killed {
        level.add_event(format!("{} killed {}", attacker.name, defender.name));
    } else {
        level.add_event(format!(
            "{} attacked {} for {}",
            attacker.name, defender.name, damage
        ));
    }
    level.last_event = event;

    AttackOutcome { damage, killed }
}
