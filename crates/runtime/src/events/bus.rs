//! Turn event bus implementation.

use tokio::sync::broadcast;

use game_core::{GameEvent, Position, TurnReport};

/// Lightweight summary of a resolved turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEvent {
    pub turn: u64,
    pub level: String,
    pub event: GameEvent,
    pub player: Position,
    /// Newest line of the level's event log.
    pub message: Option<String>,
}

impl From<TurnReport> for TurnEvent {
    fn from(report: TurnReport) -> Self {
        Self {
            turn: report.turn,
            level: report.level,
            event: report.event,
            player: report.player,
            message: report.message,
        }
    }
}

/// Broadcast channel of [`TurnEvent`]s.
///
/// Publishing never waits: subscribers that lag lose old events instead of
/// stalling the turn worker.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<TurnEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: TurnEvent) {
        if self.tx.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!(target: "runtime::events", "no turn event subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TurnEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(turn: u64) -> TurnEvent {
        TurnEvent {
            turn,
            level: "level1".to_string(),
            event: GameEvent::Move,
            player: Position::ORIGIN,
            message: None,
        }
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::with_capacity(4);
        bus.publish(event(1));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn lagging_subscriber_loses_oldest_events() {
        let bus = EventBus::with_capacity(2);
        let mut rx = bus.subscribe();
        for turn in 1..=3 {
            bus.publish(event(turn));
        }

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(1))
        ));
        assert_eq!(rx.recv().await.unwrap().turn, 2);
        assert_eq!(rx.recv().await.unwrap().turn, 3);
    }
}
