//! High-level runtime orchestrator.
//!
//! The runtime owns the turn worker, wires up the input queue, client
//! channels and event bus, and exposes a builder-based API for clients to
//! drive the simulation.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_core::World;

use crate::api::{ClientId, Result, RuntimeError, RuntimeHandle};
use crate::broadcast::{BroadcastPolicy, Broadcaster, SnapshotReceiver};
use crate::events::EventBus;
use crate::workers::TurnWorker;

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Capacity of the shared input queue.
    pub input_buffer_size: usize,
    /// Frames buffered per client before the broadcast policy applies.
    pub client_buffer_size: usize,
    /// Capacity of the turn event bus.
    pub event_buffer_size: usize,
    pub broadcast_policy: BroadcastPolicy,
}

impl RuntimeConfig {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("input_buffer_size", self.input_buffer_size),
            ("client_buffer_size", self.client_buffer_size),
            ("event_buffer_size", self.event_buffer_size),
        ] {
            if value == 0 {
                return Err(RuntimeError::InvalidConfig { field });
            }
        }
        Ok(())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            input_buffer_size: 32,
            client_buffer_size: 1,
            event_buffer_size: 100,
            broadcast_policy: BroadcastPolicy::Block,
        }
    }
}

/// Why the turn worker stopped.
#[derive(Debug, Clone, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Termination {
    /// `QuitGame` was received.
    Quit,
    /// The last client closed its window or dropped its receiver.
    NoClients,
    /// A monster brought the player's HP to zero or below.
    PlayerDied { killer: String, hp: i32 },
    /// Every input sender was dropped.
    InputClosed,
}

/// A registered display client: its identity and its snapshot stream.
pub struct ClientConnection {
    pub id: ClientId,
    pub snapshots: SnapshotReceiver,
    pub handle: RuntimeHandle,
}

impl ClientConnection {
    /// Waits for the next level snapshot. `None` once the runtime stopped
    /// broadcasting to this client.
    pub async fn next_snapshot(&mut self) -> Option<std::sync::Arc<game_core::LevelSnapshot>> {
        self.snapshots.recv().await
    }

    /// Tells the runtime this client's window closed.
    pub async fn close(self) -> Result<()> {
        self.handle.close_window(self.id).await
    }
}

/// Configured runtime whose turn worker has not started yet.
///
/// Clients must be registered before [`Runtime::start`] so that each one
/// receives the initial snapshot.
pub struct Runtime {
    config: RuntimeConfig,
    world: World,
    handle: RuntimeHandle,
    input_rx: mpsc::Receiver<crate::api::Input>,
    broadcaster: Broadcaster,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Registers a display client.
    pub fn add_client(&mut self) -> ClientConnection {
        let (id, snapshots) = self.broadcaster.register(self.config.client_buffer_size);
        tracing::debug!(target: "runtime", client = %id, "client registered");
        ClientConnection {
            id,
            snapshots,
            handle: self.handle(),
        }
    }

    /// Spawns the turn worker, which immediately broadcasts the initial
    /// snapshot to every registered client.
    pub fn start(self) -> Result<RunningRuntime> {
        if self.broadcaster.is_empty() {
            return Err(RuntimeError::NoClients);
        }

        let worker = TurnWorker::new(
            self.world,
            self.input_rx,
            self.broadcaster,
            self.handle.event_bus().clone(),
        );
        let worker_handle = tokio::spawn(worker.run());

        Ok(RunningRuntime {
            handle: self.handle,
            worker_handle,
        })
    }
}

/// Runtime whose turn worker is running.
pub struct RunningRuntime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<Termination>,
}

impl RunningRuntime {
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.worker_handle.is_finished()
    }

    /// Waits for the turn worker to stop and reports why.
    ///
    /// Dropping this runtime's own handle first means the worker also stops
    /// once every other handle is gone.
    pub async fn wait(self) -> Result<Termination> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world: Option<World>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn broadcast_policy(mut self, policy: BroadcastPolicy) -> Self {
        self.config.broadcast_policy = policy;
        self
    }

    /// Set the world the runtime will own (required).
    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        let world = self.world.ok_or(RuntimeError::MissingWorld)?;
        self.config.validate()?;

        let (input_tx, input_rx) = mpsc::channel(self.config.input_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(input_tx, event_bus);
        let broadcaster = Broadcaster::new(self.config.broadcast_policy);

        tracing::debug!(target: "runtime", config = ?self.config, "runtime built");

        Ok(Runtime {
            config: self.config,
            world,
            handle,
            input_rx,
            broadcaster,
        })
    }
}
