//! Debouncing of rapid updates.
//!
//! The caller supplies the clock, so the debouncer works the same inside an
//! event loop (`Instant::now()`) and in tests (synthetic instants).
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use droplist::debounce::Debouncer;
//!
//! let mut query = Debouncer::new(Duration::from_millis(300));
//! let t0 = Instant::now();
//!
//! query.push("b".to_string(), t0);
//! query.push("ba".to_string(), t0 + Duration::from_millis(100));
//! assert_eq!(query.poll(t0 + Duration::from_millis(350)), None);
//! assert_eq!(
//!     query.poll(t0 + Duration::from_millis(400)),
//!     Some("ba".to_string())
//! );
//! ```

use std::time::{Duration, Instant};

/// Holds the latest value until `delay` passes without a newer one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces the pending value and restarts the quiet period at `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Returns the pending value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.delay);
        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Time left before the pending value is released, if any is pending.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, at)| self.delay.saturating_sub(now.saturating_duration_since(*at)))
    }

    /// Releases the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drops the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a value is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
