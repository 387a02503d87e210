//! Best-effort turn event bus.

mod bus;

pub use bus::{EventBus, TurnEvent};
