//! Cloneable façade for feeding input to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing. Any number of input
//! collaborators may hold a clone; the turn worker serializes what they send.
use tokio::sync::{broadcast, mpsc};

use super::errors::{Result, RuntimeError};
use super::input::{ClientId, Input};
use crate::events::{EventBus, TurnEvent};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    input_tx: mpsc::Sender<Input>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(input_tx: mpsc::Sender<Input>, event_bus: EventBus) -> Self {
        Self {
            input_tx,
            event_bus,
        }
    }

    /// Queues an input, waiting for room if the queue is full.
    pub async fn send(&self, input: Input) -> Result<()> {
        self.input_tx
            .send(input)
            .await
            .map_err(|_| RuntimeError::InputChannelClosed)
    }

    /// Blocking variant of [`send`](Self::send) for threads outside the
    /// async runtime. Panics if called from within an async context.
    pub fn blocking_send(&self, input: Input) -> Result<()> {
        self.input_tx
            .blocking_send(input)
            .map_err(|_| RuntimeError::InputChannelClosed)
    }

    pub async fn quit(&self) -> Result<()> {
        self.send(Input::QuitGame).await
    }

    pub async fn close_window(&self, client: ClientId) -> Result<()> {
        self.send(Input::CloseWindow(client)).await
    }

    /// Subscribe to turn events.
    ///
    /// The bus is best-effort: a subscriber that falls behind sees
    /// `RecvError::Lagged` and loses the oldest events.
    pub fn subscribe(&self) -> broadcast::Receiver<TurnEvent> {
        self.event_bus.subscribe()
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
