//! Single-threaded event sources with RAII subscriptions.
//!
//! Listeners may subscribe, unsubscribe or emit again from inside a
//! callback: the listener list is taken out of the registry for the duration
//! of an emit and merged back afterwards.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<T> = Box<dyn FnMut(&T)>;

struct Registry<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
    /// Ids unsubscribed while an emit was in progress
    removed: Vec<u64>,
    /// Nesting depth of running emits
    emitting: usize,
}

impl<T> Registry<T> {
    fn remove(&mut self, id: u64) {
        if self.emitting > 0 {
            self.removed.push(id);
        }
        self.listeners.retain(|(other, _)| *other != id);
    }
}

/// A multicast event source
pub struct EventSource<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Default for EventSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> EventSource<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
                removed: Vec::new(),
                emitting: 0,
            })),
        }
    }

    /// Register a listener. It stays registered until the returned
    /// [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Box::new(listener)));
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().remove(id);
                }
            })),
        }
    }

    /// Deliver an event to every listener registered when the emit starts
    pub fn emit(&self, event: &T) {
        let mut running = {
            let mut registry = self.registry.borrow_mut();
            registry.emitting += 1;
            std::mem::take(&mut registry.listeners)
        };

        for (id, listener) in running.iter_mut() {
            if self.registry.borrow().removed.contains(id) {
                continue;
            }
            listener(event);
        }

        let mut registry = self.registry.borrow_mut();
        registry.emitting -= 1;
        running.append(&mut registry.listeners);
        let removed = &registry.removed;
        running.retain(|(id, _)| !removed.contains(id));
        registry.listeners = running;
        if registry.emitting == 0 {
            registry.removed.clear();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Keeps a listener registered; dropping it unsubscribes
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
