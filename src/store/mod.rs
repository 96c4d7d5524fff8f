//! Minimal single-threaded observable state containers.
//!
//! [`Store`] wraps a single value: replace it, update it from the
//! current value, or subscribe to it. Subscribers are notified
//! synchronously after every mutation, and once immediately on
//! subscription, so late subscribers never miss the current value.
//! [`Derived`] is a read-only view recomputed from another store on
//! every notification.
//!
//! Mutating a store from inside one of its own subscribers does not
//! reenter: the nested mutation is queued and applied after the current
//! notification pass, with its own notification.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

type Callback<T> = Box<dyn FnMut(&T)>;
type Mutation<T> = Box<dyn FnOnce(&T) -> T>;

struct Slot<T> {
    id: u64,
    // taken while the callback runs, so the list stays borrowable
    callback: Option<Callback<T>>,
}

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Slot<T>>>,
    next_id: Cell<u64>,
    notifying: Cell<bool>,
    pending: RefCell<VecDeque<Mutation<T>>>,
}

/// Observable container for a single value.
///
/// Clones share the same underlying value and subscriber list. Not
/// thread-safe: one store belongs to one thread, like the engine that
/// owns it.
pub struct Store<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.inner.value.borrow())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + 'static> Store<T> {
    /// Creates a store holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                notifying: Cell::new(false),
                pending: RefCell::new(VecDeque::new()),
            }),
        }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Runs `read` against the current value without cloning it.
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.inner.value.borrow())
    }

    /// Atomically swaps in `value`, then synchronously notifies all
    /// subscribers.
    pub fn replace(&self, value: T) {
        self.mutate(Box::new(move |_| value));
    }

    /// Stores `update(current)`, then synchronously notifies all
    /// subscribers.
    pub fn update(&self, update: impl FnOnce(&T) -> T + 'static) {
        self.mutate(Box::new(update));
    }

    /// Registers `callback`, invokes it once immediately with the
    /// current value, and returns a handle that unsubscribes when
    /// dropped.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let mut callback = Box::new(callback) as Callback<T>;
        let current = self.get();
        callback(&current);

        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.subscribers.borrow_mut().push(Slot {
            id,
            callback: Some(callback),
        });

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.subscribers.borrow_mut().retain(|slot| slot.id != id);
            }
        })
    }

    fn mutate(&self, mutation: Mutation<T>) {
        if self.inner.notifying.get() {
            // called from inside a subscriber; defer until this pass ends
            self.inner.pending.borrow_mut().push_back(mutation);
            return;
        }

        self.inner.notifying.set(true);
        self.apply(mutation);
        self.notify_all();
        loop {
            let queued = self.inner.pending.borrow_mut().pop_front();
            match queued {
                Some(mutation) => {
                    self.apply(mutation);
                    self.notify_all();
                }
                None => break,
            }
        }
        self.inner.notifying.set(false);
    }

    fn apply(&self, mutation: Mutation<T>) {
        let next = mutation(&self.inner.value.borrow());
        *self.inner.value.borrow_mut() = next;
    }

    fn notify_all(&self) {
        let value = self.get();
        let ids: Vec<u64> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|slot| slot.id)
            .collect();
        for id in ids {
            let callback = self
                .inner
                .subscribers
                .borrow_mut()
                .iter_mut()
                .find(|slot| slot.id == id)
                .and_then(|slot| slot.callback.take());
            let Some(mut callback) = callback else {
                continue;
            };
            callback(&value);
            // the slot may have been unsubscribed while its callback ran
            if let Some(slot) = self
                .inner
                .subscribers
                .borrow_mut()
                .iter_mut()
                .find(|slot| slot.id == id)
            {
                slot.callback = Some(callback);
            }
        }
    }
}

/// Handle for an active subscription; unsubscribes when dropped.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Explicitly cancels the subscription.
    pub fn unsubscribe(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Read-only view of another store, recomputed on every notification.
///
/// The computed value is never stored independently of the source: each
/// source notification recomputes and re-notifies, so a view cannot
/// diverge from the state it derives from.
pub struct Derived<T> {
    inner: Store<T>,
    _source: Subscription,
}

impl<T: Clone + 'static> Derived<T> {
    /// Wires a view over `source`; `compute` runs once now and again on
    /// every change of `source`.
    pub fn new<S: Clone + 'static>(
        source: &Store<S>,
        compute: impl Fn(&S) -> T + 'static,
    ) -> Self {
        let inner = Store::new(source.with(|value| compute(value)));
        let sink = inner.clone();
        let subscription = source.subscribe(move |value| sink.replace(compute(value)));
        Self {
            inner,
            _source: subscription,
        }
    }

    /// Returns a clone of the current view value.
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Runs `read` against the current view value without cloning it.
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        self.inner.with(read)
    }

    /// Subscribes to the view; the callback fires once immediately and
    /// then on every recomputation.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        self.inner.subscribe(callback)
    }
}

impl<T: fmt::Debug> fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived")
            .field("value", &self.inner.inner.value.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_update_is_deferred_until_the_pass_ends() {
        let store = Store::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let observed = Rc::clone(&seen);
        let nested = store.clone();
        let _bump = store.subscribe(move |value: &i32| {
            observed.borrow_mut().push(*value);
            if *value == 1 {
                nested.update(|current| current + 10);
            }
        });

        store.replace(1);
        // the nested +10 applied after the pass for 1 completed
        assert_eq!(*seen.borrow(), vec![0, 1, 11]);
        assert_eq!(store.get(), 11);
    }

    #[test]
    fn unsubscribing_inside_a_notification_is_safe() {
        let store = Store::new(0);
        let count = Rc::new(Cell::new(0));

        let holder: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let observed = Rc::clone(&count);
        let own = Rc::clone(&holder);
        let subscription = store.subscribe(move |_: &i32| {
            observed.set(observed.get() + 1);
            own.borrow_mut().take();
        });
        *holder.borrow_mut() = Some(subscription);

        store.replace(1);
        store.replace(2);
        // immediate call plus the first replace; gone by the second
        assert_eq!(count.get(), 2);
    }
}
