use std::time::Duration;

use foundation::time::Timestamp;

/// Trailing-edge debouncer driven by explicit timestamps.
///
/// Holds at most one pending value. Every `push` replaces it and moves the
/// deadline to `now + quiet`; `poll` hands the value out once the deadline
/// has passed. There is no early flush.
///
/// This is the clock-free twin of [`crate::timer::DebounceTimer`] so recorded
/// input can be replayed deterministically.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    deadline: Timestamp,
    value: T,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Record a new value at `now`, superseding any pending one.
    ///
    /// Returns `true` if a pending value was dropped.
    pub fn push(&mut self, now: Timestamp, value: T) -> bool {
        let replaced = self.pending.is_some();
        self.pending = Some(Pending {
            deadline: now.saturating_add(self.quiet),
            value,
        });
        replaced
    }

    /// Take the pending value if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Timestamp) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Timestamp> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}
