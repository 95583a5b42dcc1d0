//! Single-threaded listener sets with RAII subscriptions
//!
//! A `Subscription` removes its listener when dropped or cancelled. The set
//! only holds weak references from the subscription side, so a subscription
//! outliving its set is harmless.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// A set of callbacks notified on `emit`
pub struct ListenerSet<T> {
    inner: Rc<RefCell<Listeners<T>>>,
}

impl<T: 'static> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ListenerSet<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a listener. It stays active until the returned guard goes away.
    pub fn subscribe(&self, listener: Box<dyn Fn(&T)>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.push((id, Rc::from(listener)));
            id
        };

        let weak: Weak<RefCell<Listeners<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().entries.retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    /// Notify every listener registered at the time of the call
    pub fn emit(&self, value: &T) {
        // Snapshot first: listeners may subscribe or unsubscribe while running
        let snapshot: Vec<Listener<T>> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(value);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Guard for an active listener registration
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_reaches_subscribers() {
        let set: ListenerSet<u32> = ListenerSet::new();
        let total = Rc::new(Cell::new(0));

        let seen = Rc::clone(&total);
        let _sub = set.subscribe(Box::new(move |v| seen.set(seen.get() + *v)));

        set.emit(&3);
        set.emit(&4);
        assert_eq!(total.get(), 7);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let set: ListenerSet<u32> = ListenerSet::new();
        let hits = Rc::new(Cell::new(0));

        let seen = Rc::clone(&hits);
        let sub = set.subscribe(Box::new(move |_| seen.set(seen.get() + 1)));
        assert_eq!(set.len(), 1);

        drop(sub);
        assert!(set.is_empty());
        set.emit(&1);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_drop_removes_only_its_listener() {
        let set: ListenerSet<()> = ListenerSet::new();
        let first = set.subscribe(Box::new(|_| {}));
        let _second = set.subscribe(Box::new(|_| {}));

        drop(first);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_subscription_outliving_set() {
        let set: ListenerSet<()> = ListenerSet::new();
        let sub = set.subscribe(Box::new(|_| {}));
        drop(set);
        // Releasing against a dropped set is a no-op
        drop(sub);
    }
}
