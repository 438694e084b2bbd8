//! Injected event observer.
//!
//! The engine has no process-wide logger. Anything worth reporting (an
//! operation started or finished, a history eviction, an undo) goes to an
//! [`Observer`] handed in by the caller. [`NoopObserver`] is the default.
//! [`TracingObserver`] forwards to `tracing`, and [`MemoryObserver`]
//! collects events for inspection.
//!
//! ```rust
//! use unmess_core::observer::{EventKind, MemoryObserver, Observer};
//!
//! let obs = MemoryObserver::default();
//! obs.on_event(EventKind::Undo, "undo stack: 2");
//! assert_eq!(obs.events().len(), 1);
//! ```

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// An algorithm is about to run.
    OperationStarted,
    /// An algorithm finished; the message carries its timing.
    OperationCompleted,
    /// A new image state was loaded.
    StateLoaded,
    /// A state was reset to its original image.
    StateReset,
    /// A state was pushed onto the undo stack.
    HistorySaved,
    /// The oldest undo entry was dropped to respect capacity.
    HistoryEvicted,
    /// Pending redo entries were discarded by a new save.
    RedoDiscarded,
    /// An undo was performed (or requested with nothing to undo).
    Undo,
    /// A redo was performed (or requested with nothing to redo).
    Redo,
    /// History was cleared.
    HistoryCleared,
}

impl EventKind {
    /// Short stable name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OperationStarted => "operation_started",
            Self::OperationCompleted => "operation_completed",
            Self::StateLoaded => "state_loaded",
            Self::StateReset => "state_reset",
            Self::HistorySaved => "history_saved",
            Self::HistoryEvicted => "history_evicted",
            Self::RedoDiscarded => "redo_discarded",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::HistoryCleared => "history_cleared",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives engine events.
pub trait Observer: Send + Sync {
    /// Called once per event, synchronously, on the calling thread.
    fn on_event(&self, kind: EventKind, message: &str);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    #[inline]
    fn on_event(&self, _kind: EventKind, _message: &str) {}
}

/// Forwards events to `tracing` under the `unmess` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_event(&self, kind: EventKind, message: &str) {
        match kind {
            EventKind::OperationStarted
            | EventKind::HistorySaved
            | EventKind::HistoryEvicted
            | EventKind::RedoDiscarded => {
                tracing::debug!(target: "unmess", event = %kind, "{message}")
            }
            _ => tracing::info!(target: "unmess", event = %kind, "{message}"),
        }
    }
}

/// A recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event kind.
    pub kind: EventKind,
    /// Human-readable detail.
    pub message: String,
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemoryObserver {
    events: Mutex<Vec<Event>>,
}

impl MemoryObserver {
    /// Snapshot of all recorded events.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded kinds, in order.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|e| e.kind)
            .collect()
    }

    /// Number of events of `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.kind == kind)
            .count()
    }
}

impl Observer for MemoryObserver {
    fn on_event(&self, kind: EventKind, message: &str) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Event {
                kind,
                message: message.to_string(),
            });
    }
}
