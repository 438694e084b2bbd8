//! Bounded undo/redo history.
//!
//! [`HistoryManager`] keeps two stacks of shared [`ImageState`]s and a byte
//! counter. All mutation happens under a single mutex, so the manager can
//! be shared between threads behind an `Arc`.
//!
//! Invariants, held after every call:
//!
//! - the undo stack never exceeds the capacity; the oldest entry is evicted
//! - saving a state empties the redo stack
//! - `total_memory_used` is the sum of `size_bytes` over every retained state
//!
//! `undo` moves the top state onto the redo stack and returns the new top,
//! i.e. the state that preceded it. `redo` moves it back and returns it.

use crate::state::ImageState;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};
use unmess_core::config::DEFAULT_HISTORY_CAPACITY;
use unmess_core::validate::require_positive;
use unmess_core::{EventKind, NoopObserver, Observer, Result};

const MB: f64 = 1024.0 * 1024.0;

#[derive(Default)]
struct Stacks {
    undo: VecDeque<Arc<ImageState>>,
    redo: Vec<Arc<ImageState>>,
    total_memory_used: u64,
}

/// Thread-safe bounded history of image states.
pub struct HistoryManager {
    capacity: usize,
    stacks: Mutex<Stacks>,
    observer: Arc<dyn Observer>,
}

impl HistoryManager {
    /// Creates an empty history holding at most `capacity` undo states.
    ///
    /// # Errors
    ///
    /// [`unmess_core::Error::OutOfRange`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_observer(capacity, Arc::new(NoopObserver))
    }

    /// Like [`new`](Self::new), reporting history events to `observer`.
    pub fn with_observer(capacity: usize, observer: Arc<dyn Observer>) -> Result<Self> {
        let capacity = require_positive(capacity, "history capacity")?;
        info!(capacity, "History initialized");
        Ok(Self {
            capacity,
            stacks: Mutex::new(Stacks::default()),
            observer,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Stacks> {
        self.stacks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pushes `state`, evicting the oldest entry at capacity and discarding
    /// any redo states.
    pub fn save_state(&self, state: Arc<ImageState>) {
        let mut s = self.lock();

        if s.undo.len() >= self.capacity {
            if let Some(evicted) = s.undo.pop_front() {
                s.total_memory_used -= evicted.size_bytes();
                self.observer.on_event(
                    EventKind::HistoryEvicted,
                    &format!("evicted oldest state ({} bytes)", evicted.size_bytes()),
                );
            }
        }

        s.total_memory_used += state.size_bytes();
        s.undo.push_back(state);

        if !s.redo.is_empty() {
            let freed: u64 = s.redo.iter().map(|st| st.size_bytes()).sum();
            let dropped = s.redo.len();
            s.redo.clear();
            s.total_memory_used -= freed;
            self.observer.on_event(
                EventKind::RedoDiscarded,
                &format!("discarded {dropped} redo states"),
            );
        }

        debug!(
            undo = s.undo.len(),
            memory_mb = s.total_memory_used as f64 / MB,
            "State saved"
        );
        self.observer.on_event(
            EventKind::HistorySaved,
            &format!("undo={} redo={}", s.undo.len(), s.redo.len()),
        );
    }

    /// Steps back.
    ///
    /// Returns the state below the undone one, or `None` if the undo stack
    /// was empty or held a single state.
    pub fn undo(&self) -> Option<Arc<ImageState>> {
        let mut s = self.lock();
        let Some(top) = s.undo.pop_back() else {
            debug!("Undo requested but history is empty");
            return None;
        };
        s.redo.push(top);
        let previous = s.undo.back().cloned();

        info!(undo = s.undo.len(), redo = s.redo.len(), "Undo performed");
        self.observer.on_event(
            EventKind::Undo,
            &format!("undo={} redo={}", s.undo.len(), s.redo.len()),
        );
        previous
    }

    /// Steps forward, returning the restored state.
    pub fn redo(&self) -> Option<Arc<ImageState>> {
        let mut s = self.lock();
        let Some(next) = s.redo.pop() else {
            debug!("Redo requested but redo stack is empty");
            return None;
        };
        s.undo.push_back(Arc::clone(&next));

        info!(undo = s.undo.len(), redo = s.redo.len(), "Redo performed");
        self.observer.on_event(
            EventKind::Redo,
            &format!("undo={} redo={}", s.undo.len(), s.redo.len()),
        );
        Some(next)
    }

    /// Drops every state and zeroes the counter.
    pub fn clear(&self) {
        let mut s = self.lock();
        let (undo, redo) = (s.undo.len(), s.redo.len());
        *s = Stacks::default();

        info!(undo, redo, "History cleared");
        self.observer.on_event(
            EventKind::HistoryCleared,
            &format!("removed {undo} undo and {redo} redo states"),
        );
    }

    /// Returns `true` if the undo stack is non-empty.
    pub fn can_undo(&self) -> bool {
        !self.lock().undo.is_empty()
    }

    /// Returns `true` if the redo stack is non-empty.
    pub fn can_redo(&self) -> bool {
        !self.lock().redo.is_empty()
    }

    /// Undo stack depth.
    pub fn undo_count(&self) -> usize {
        self.lock().undo.len()
    }

    /// Redo stack depth.
    pub fn redo_count(&self) -> usize {
        self.lock().redo.len()
    }

    /// Sum of `size_bytes` over all retained states.
    pub fn total_memory_used(&self) -> u64 {
        self.lock().total_memory_used
    }

    /// Maximum undo depth.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Consistent snapshot of the counters.
    pub fn stats(&self) -> HistoryStats {
        let s = self.lock();
        HistoryStats {
            undo_count: s.undo.len(),
            redo_count: s.redo.len(),
            total_memory_used: s.total_memory_used,
            capacity: self.capacity,
        }
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
            stacks: Mutex::new(Stacks::default()),
            observer: Arc::new(NoopObserver),
        }
    }
}

impl fmt::Debug for HistoryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HistoryManager").field(&self.stats()).finish()
    }
}

impl fmt::Display for HistoryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.stats(), f)
    }
}

/// Point-in-time history counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStats {
    /// Undo stack depth.
    pub undo_count: usize,
    /// Redo stack depth.
    pub redo_count: usize,
    /// Retained bytes.
    pub total_memory_used: u64,
    /// Maximum undo depth.
    pub capacity: usize,
}

impl fmt::Display for HistoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "History[undo={}, redo={}, memory={:.2} MB, capacity={}]",
            self.undo_count,
            self.redo_count,
            self.total_memory_used as f64 / MB,
            self.capacity
        )
    }
}
