//! Event sinks for committed transfers
//!
//! The ledger hands every committed transfer to exactly one [`EventSink`].
//! Sinks never report failure back: an event nobody listens to is dropped.

use crate::core::traits::EventSink;
use crate::types::TransferEvent;
use tokio::sync::broadcast;

/// Sink that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &TransferEvent) {}
}

/// Sink that writes one structured log line per event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &TransferEvent) {
        tracing::info!(
            target: "transfer_ledger::events",
            sender = %event.sender,
            receiver = %event.receiver,
            amount = %event.amount,
            keyword = %event.keyword,
            timestamp = event.timestamp,
            "transfer recorded"
        );
    }
}

/// Sink that publishes events on a broadcast channel
///
/// Subscribers that fall more than `capacity` events behind lose the oldest
/// ones, as with any `tokio::sync::broadcast` receiver.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<TransferEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        BroadcastSink { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TransferEvent> {
        self.sender.subscribe()
    }
}

impl EventSink for BroadcastSink {
    fn emit(&self, event: &TransferEvent) {
        // No subscribers is not an error
        let _ = self.sender.send(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountId;

    fn sample_event() -> TransferEvent {
        TransferEvent {
            sender: AccountId::from("alice"),
            receiver: AccountId::from("bob"),
            amount: 100,
            message: "hi".to_string(),
            timestamp: 1_700_000_000,
            keyword: "greeting".to_string(),
        }
    }

    #[test]
    fn test_broadcast_sink_delivers_to_subscribers() {
        let sink = BroadcastSink::new(16);
        let mut first = sink.subscribe();
        let mut second = sink.subscribe();

        sink.emit(&sample_event());

        assert_eq!(first.try_recv().unwrap(), sample_event());
        assert_eq!(second.try_recv().unwrap(), sample_event());
    }

    #[test]
    fn test_broadcast_sink_without_subscribers_does_not_fail() {
        let sink = BroadcastSink::new(4);
        sink.emit(&sample_event());

        // A late subscriber only sees later events
        let mut late = sink.subscribe();
        assert!(late.try_recv().is_err());
    }

    #[test]
    fn test_null_and_tracing_sinks_accept_events() {
        NullSink.emit(&sample_event());
        TracingSink.emit(&sample_event());
    }
}
