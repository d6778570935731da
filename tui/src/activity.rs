//! Pointer activity broadcast to whatever widgets are currently mounted.
//!
//! A widget subscribes while it is active and receives every pointer event
//! the application loop does not route to it directly. Dropping the
//! [`Subscription`] unregisters the listener.

use std::cell::RefCell;
use std::rc::Rc;
use std::rc::Weak;

/// A pointer press somewhere on the terminal, in screen cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerActivity {
    pub column: u16,
    pub row: u16,
}

type Listener = Rc<dyn Fn(&PointerActivity)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Shared scope that pointer activity is published to.
#[derive(Clone, Default)]
pub struct ActivityScope {
    inner: Rc<RefCell<Registry>>,
}

impl ActivityScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&PointerActivity) + 'static) -> Subscription {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(listener)));
        Subscription {
            registry: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Delivers `activity` to every listener registered when the call began.
    /// Listeners unsubscribed by an earlier callback in the same pass are
    /// skipped.
    pub fn dispatch(&self, activity: PointerActivity) {
        let snapshot: Vec<(u64, Listener)> = self.inner.borrow().listeners.clone();
        for (id, listener) in snapshot {
            let still_registered = self
                .inner
                .borrow()
                .listeners
                .iter()
                .any(|(live, _)| *live == id);
            if still_registered {
                listener(&activity);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Keeps a listener registered until dropped.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}
