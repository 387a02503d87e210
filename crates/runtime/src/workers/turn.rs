//! Turn worker that owns the authoritative [`World`].
//!
//! Receives [`Input`] from any number of [`crate::RuntimeHandle`]s, resolves
//! turns via [`GameEngine`], and hands every resulting snapshot to the
//! [`Broadcaster`]. It is the only task that ever touches the world.

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, trace};

use game_core::{GameEngine, PlayerAction, TurnError, World};

use crate::api::{ClientId, Input};
use crate::broadcast::Broadcaster;
use crate::events::{EventBus, TurnEvent};
use crate::runtime::Termination;

pub struct TurnWorker {
    world: World,
    input_rx: mpsc::Receiver<Input>,
    broadcaster: Broadcaster,
    event_bus: EventBus,
}

impl TurnWorker {
    pub fn new(
        world: World,
        input_rx: mpsc::Receiver<Input>,
        broadcaster: Broadcaster,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::engine",
            level = world.current_level_name(),
            clients = broadcaster.len(),
            policy = %broadcaster.policy(),
            "TurnWorker initialized"
        );

        Self {
            world,
            input_rx,
            broadcaster,
            event_bus,
        }
    }

    /// Main worker loop. Runs until a terminal condition is reached.
    pub async fn run(mut self) -> Termination {
        if let ControlFlow::Break(termination) = self.publish_snapshot().await {
            return self.finish(termination);
        }

        loop {
            let Some(input) = self.input_rx.recv().await else {
                return self.finish(Termination::InputClosed);
            };
            debug!(target: "runtime::engine", %input, "input received");

            if let ControlFlow::Break(termination) = self.handle_input(input).await {
                return self.finish(termination);
            }
        }
    }

    async fn handle_input(&mut self, input: Input) -> ControlFlow<Termination> {
        match input {
            Input::QuitGame => ControlFlow::Break(Termination::Quit),
            Input::CloseWindow(client) => self.close_client(client),
            _ => match input.action() {
                Some(action) => self.resolve_turn(action).await,
                None => {
                    trace!(target: "runtime::engine", "idle input ignored");
                    ControlFlow::Continue(())
                }
            },
        }
    }

    fn close_client(&mut self, client: ClientId) -> ControlFlow<Termination> {
        if self.broadcaster.remove(client) {
            info!(
                target: "runtime::engine",
                %client,
                remaining = self.broadcaster.len(),
                "client closed"
            );
        } else {
            debug!(target: "runtime::engine", %client, "close requested for unknown client");
        }

        if self.broadcaster.is_empty() {
            ControlFlow::Break(Termination::NoClients)
        } else {
            ControlFlow::Continue(())
        }
    }

    async fn resolve_turn(&mut self, action: PlayerAction) -> ControlFlow<Termination> {
        let outcome = GameEngine::new(&mut self.world).step(action);
        let report = match outcome {
            Ok(report) => report,
            Err(TurnError::PlayerDead { killer, hp }) => {
                error!(
                    target: "runtime::engine",
                    turn = self.world.turn(),
                    %killer,
                    hp,
                    "player died"
                );
                return ControlFlow::Break(Termination::PlayerDied { killer, hp });
            }
        };

        debug!(
            target: "runtime::engine",
            turn = report.turn,
            level = %report.level,
            event = %report.event,
            player = %report.player,
            "turn resolved"
        );
        self.event_bus.publish(TurnEvent::from(report));
        self.publish_snapshot().await
    }

    /// Broadcasts the current level. Breaks once no client is left.
    async fn publish_snapshot(&mut self) -> ControlFlow<Termination> {
        let snapshot = Arc::new(self.world.snapshot());
        let report = self.broadcaster.broadcast(snapshot).await;
        trace!(
            target: "runtime::engine",
            turn = self.world.turn(),
            delivered = report.delivered,
            dropped = report.dropped.len(),
            "snapshot broadcast"
        );

        if self.broadcaster.is_empty() {
            ControlFlow::Break(Termination::NoClients)
        } else {
            ControlFlow::Continue(())
        }
    }

    fn finish(self, termination: Termination) -> Termination {
        info!(
            target: "runtime::engine",
            turn = self.world.turn(),
            %termination,
            "TurnWorker stopped"
        );
        termination
    }
}
