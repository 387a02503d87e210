//! Runtime orchestration for the dungeon simulation.
//!
//! A single background task owns the [`game_core::World`]: it drains player
//! input from a shared queue, resolves turns through
//! [`game_core::GameEngine`] and fans the resulting level snapshot out to
//! every registered display client. Consumers embed [`Runtime`] to register
//! clients and start the task, then drive it through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`broadcast`] holds the per-client snapshot channels and their policy
//! - [`events`] provides the best-effort turn event bus
//! - `workers` keeps the turn loop internal to the crate
pub mod api;
pub mod broadcast;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{ClientId, Input, Result, RuntimeError, RuntimeHandle};
pub use broadcast::{BroadcastPolicy, BroadcastReport};
pub use events::{EventBus, TurnEvent};
pub use runtime::{
    ClientConnection, RunningRuntime, Runtime, RuntimeBuilder, RuntimeConfig, Termination,
};
