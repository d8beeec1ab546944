//! Outside-pointer dismissal.
//!
//! A [`DismissHub`] plays the role of the document: the host feeds every
//! pointer event through [`DismissHub::dispatch`], and each mounted dropdown
//! holds exactly one [`Subscription`] on it. Dropping the subscription
//! unregisters the listener, so an unmounted (or dropped) dropdown can never
//! be reached by a later event.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use droplist::dismiss::DismissHub;
//! use droplist::pointer::PointerMsg;
//!
//! let hub = DismissHub::new();
//! let hits = Arc::new(AtomicUsize::new(0));
//!
//! let counter = Arc::clone(&hits);
//! let sub = hub.subscribe(move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! hub.dispatch(&PointerMsg::press(3, 3));
//! drop(sub);
//! hub.dispatch(&PointerMsg::press(3, 3));
//!
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//! assert_eq!(hub.listener_count(), 0);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::trace;

use crate::pointer::PointerMsg;

type Listener = Arc<dyn Fn(&PointerMsg) + Send + Sync>;

#[derive(Default)]
struct Registry {
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: AtomicU64,
}

/// Shared registry of pointer-down listeners.
///
/// Cloning is cheap; clones share the same registry.
#[derive(Clone, Default)]
pub struct DismissHub {
    registry: Arc<Registry>,
}

impl fmt::Debug for DismissHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl DismissHub {
    /// Creates an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for pointer-down events until the returned
    /// guard is dropped.
    #[must_use = "the listener is removed as soon as the subscription is dropped"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&PointerMsg) + Send + Sync + 'static,
    {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry.listeners.lock().push((id, Arc::new(listener)));
        trace!(id, "dismiss listener added");
        Subscription {
            registry: Arc::downgrade(&self.registry),
            id,
        }
    }

    /// Delivers a pointer event to every listener.
    ///
    /// Only pointer-downs are forwarded; motion, release and wheel events
    /// return 0 without notifying anyone. Returns the number of listeners
    /// notified.
    pub fn dispatch(&self, pointer: &PointerMsg) -> usize {
        if !pointer.is_down() {
            return 0;
        }
        // Snapshot so listeners run without the registry lock held.
        let snapshot: Vec<Listener> = self
            .registry
            .listeners
            .lock()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in &snapshot {
            listener(pointer);
        }
        snapshot.len()
    }

    /// Number of live registrations.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.listeners.lock().len()
    }
}

/// Registration guard returned by [`DismissHub::subscribe`].
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    registry: Weak<Registry>,
    id: u64,
}

impl Subscription {
    /// Removes the listener now. Equivalent to dropping the guard.
    pub fn cancel(self) {}
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        registry.listeners.lock().retain(|(id, _)| *id != self.id);
        trace!(id = self.id, "dismiss listener removed");
    }
}
