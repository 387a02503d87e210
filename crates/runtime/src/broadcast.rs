//! Fan-out of level snapshots to display clients.
//!
//! Each client owns the receiving half of a bounded channel. Snapshots are
//! sent in registration order, so every client observes frames in turn
//! order. What happens when a client's buffer is full is decided by
//! [`BroadcastPolicy`].
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use game_core::LevelSnapshot;

use crate::api::ClientId;

pub type SnapshotSender = mpsc::Sender<Arc<LevelSnapshot>>;
pub type SnapshotReceiver = mpsc::Receiver<Arc<LevelSnapshot>>;

/// Behavior when a client has not consumed its previous frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum BroadcastPolicy {
    /// Wait for every client in turn. A stalled client stalls the engine.
    #[default]
    #[strum(serialize = "block")]
    Block,
    /// Skip clients whose buffer is full; they miss that frame.
    #[strum(to_string = "drop", serialize = "drop_if_full")]
    DropIfFull,
}

/// Outcome of one fan-out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    /// Clients that missed this frame under [`BroadcastPolicy::DropIfFull`].
    pub dropped: Vec<ClientId>,
    /// Clients whose receiver was gone; they are no longer registered.
    pub disconnected: Vec<ClientId>,
}

struct ClientChannel {
    id: ClientId,
    tx: SnapshotSender,
}

/// Registered client channels, in registration order.
pub struct Broadcaster {
    clients: Vec<ClientChannel>,
    policy: BroadcastPolicy,
    next_id: u32,
}

impl Broadcaster {
    pub fn new(policy: BroadcastPolicy) -> Self {
        Self {
            clients: Vec::new(),
            policy,
            next_id: 0,
        }
    }

    /// Opens a channel for a new client with room for `buffer` frames.
    pub fn register(&mut self, buffer: usize) -> (ClientId, SnapshotReceiver) {
        let id = ClientId(self.next_id);
        self.next_id += 1;
        let (tx, rx) = mpsc::channel(buffer.max(1));
        self.clients.push(ClientChannel { id, tx });
        (id, rx)
    }

    /// Drops the sending half for `id`. Returns false for unknown clients.
    pub fn remove(&mut self, id: ClientId) -> bool {
        let before = self.clients.len();
        self.clients.retain(|client| client.id != id);
        self.clients.len() != before
    }

    pub fn policy(&self) -> BroadcastPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn client_ids(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.clients.iter().map(|client| client.id)
    }

    /// Sends `snapshot` to every client, in registration order.
    ///
    /// Clients whose receiver has been dropped are unregistered.
    pub async fn broadcast(&mut self, snapshot: Arc<LevelSnapshot>) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        for client in &self.clients {
            let delivered = match self.policy {
                BroadcastPolicy::Block => client.tx.send(Arc::clone(&snapshot)).await.is_ok(),
                BroadcastPolicy::DropIfFull => match client.tx.try_send(Arc::clone(&snapshot)) {
                    Ok(()) => true,
                    Err(TrySendError::Full(_)) => {
                        tracing::debug!(
                            target: "runtime::broadcast",
                            client = %client.id,
                            turn = snapshot.turn,
                            "client buffer full, frame dropped"
                        );
                        report.dropped.push(client.id);
                        continue;
                    }
                    Err(TrySendError::Closed(_)) => false,
                },
            };

            if delivered {
                report.delivered += 1;
            } else {
                tracing::warn!(
                    target: "runtime::broadcast",
                    client = %client.id,
                    "client receiver dropped without closing, unregistering"
                );
                report.disconnected.push(client.id);
            }
        }

        if !report.disconnected.is_empty() {
            self.clients
                .retain(|client| !report.disconnected.contains(&client.id));
        }
        report
    }
}
