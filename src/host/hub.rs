//! Single-threaded event target with scoped listener subscriptions

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::events::HostEvent;

type Listener<E> = Rc<dyn Fn(&mut E)>;

struct HubInner<E> {
    label: String,
    listeners: RefCell<Vec<(u64, Listener<E>)>>,
    next_id: Cell<u64>,
}

impl<E> HubInner<E> {
    fn is_attached(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|(lid, _)| *lid == id)
    }

    fn detach(&self, id: u64) {
        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            let before = listeners.len();
            listeners.retain(|(lid, _)| *lid != id);
            before != listeners.len()
        };
        if removed {
            tracing::debug!(hub = %self.label, listener = id, "listener detached");
        }
    }
}

/// An event target: the document scope or a single root element
///
/// Cloning a hub yields another handle to the same target.
pub struct EventHub<E> {
    inner: Rc<HubInner<E>>,
}

impl<E: 'static> EventHub<E> {
    /// Create a hub; `label` only appears in logs
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(HubInner {
                label: label.into(),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Attach a listener; it stays attached until the returned guard drops
    pub fn subscribe(&self, listener: impl Fn(&mut E) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        tracing::debug!(hub = %self.inner.label, listener = id, "listener attached");

        let hub: Weak<HubInner<E>> = Rc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(hub) = hub.upgrade() {
                    hub.detach(id);
                }
            })),
        }
    }

    /// Number of currently attached listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl<E: HostEvent + 'static> EventHub<E> {
    /// Deliver an event to every attached listener in attach order
    ///
    /// Listeners may subscribe, unsubscribe or dispatch again from inside a
    /// callback. A listener detached mid-dispatch is not called afterwards.
    /// Returns whether the default behavior was prevented.
    pub fn dispatch(&self, event: &mut E) -> bool {
        let snapshot: Vec<(u64, Listener<E>)> = self.inner.listeners.borrow().clone();
        for (id, listener) in snapshot {
            if !self.inner.is_attached(id) {
                continue;
            }
            listener(event);
        }
        event.default_prevented()
    }
}

impl<E> Clone for EventHub<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for EventHub<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("label", &self.inner.label)
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

/// Guard for an attached listener; dropping it detaches exactly once
#[must_use = "dropping a Subscription detaches its listener immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Detach now instead of at end of scope
    pub fn cancel(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}
