//! Event relay: ordered, fire-and-forget delivery from the worker to the UI.
//!
//! Backed by an unbounded tokio channel so `emit` never blocks the worker.
//! When the receiving side is gone, events are dropped silently.

use chrono::{DateTime, Local};
use tokio::sync::mpsc;

use mediagrab_core::download::UiEvent;
use mediagrab_core::ports::EventEmitterPort;

/// Receiving half handed to the UI surface.
pub type EventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Sending half, implementing [`EventEmitterPort`].
#[derive(Debug, Clone)]
pub struct EventRelay {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl EventRelay {
    /// Create a relay and the receiver the UI drains.
    pub fn channel() -> (Self, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Whether the UI side has dropped its receiver.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl EventEmitterPort for EventRelay {
    fn emit(&self, event: UiEvent) {
        let event = match event {
            UiEvent::LogLine { text } => UiEvent::LogLine {
                text: timestamped(&Local::now(), &text),
            },
            other => other,
        };
        if self.tx.send(event).is_err() {
            tracing::trace!(target: "mediagrab.relay", "event dropped, receiver closed");
        }
    }

    fn clone_box(&self) -> Box<dyn EventEmitterPort> {
        Box::new(self.clone())
    }
}

/// Prefix a log line with `[HH:MM:SS]`.
fn timestamped(at: &DateTime<Local>, text: &str) -> String {
    format!("[{}] {text}", at.format("%H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (relay, mut rx) = EventRelay::channel();
        relay.emit(UiEvent::status("one", Some(1)));
        relay.emit(UiEvent::status("two", Some(2)));
        relay.emit(UiEvent::info("three", "x"));

        assert_eq!(rx.recv().await, Some(UiEvent::status("one", Some(1))));
        assert_eq!(rx.recv().await, Some(UiEvent::status("two", Some(2))));
        assert_eq!(rx.recv().await, Some(UiEvent::info("three", "x")));
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (relay, rx) = EventRelay::channel();
        drop(rx);
        assert!(relay.is_closed());
        relay.emit(UiEvent::log("nobody listens"));
    }

    #[tokio::test]
    async fn test_log_lines_are_timestamped() {
        let (relay, mut rx) = EventRelay::channel();
        relay.clone_box().emit(UiEvent::log("hello"));

        let Some(UiEvent::LogLine { text }) = rx.recv().await else {
            panic!("expected a log line");
        };
        assert!(text.starts_with('['));
        assert!(text.ends_with("] hello"));
        assert_eq!(text.len(), "[00:00:00] hello".len());
    }

    #[test]
    fn test_timestamp_format() {
        let at = Local.with_ymd_and_hms(2024, 1, 2, 7, 8, 9).unwrap();
        assert_eq!(timestamped(&at, "msg"), "[07:08:09] msg");
    }
}
