//! Restart notification channel
//!
//! A pulse means "the round ended and world state was reset". Pulses are not
//! state: a subscriber added after a pulse never sees it. Each live
//! subscriber receives every later pulse exactly once, in publish order.
//!
//! Single-threaded by construction (`Rc`), matching the frame loop.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback = Rc<RefCell<dyn FnMut()>>;

struct Slot {
    id: u64,
    callback: Callback,
}

#[derive(Default)]
struct Inner {
    slots: RefCell<Vec<Slot>>,
    next_id: Cell<u64>,
    /// Pulses published but not yet delivered
    pending: Cell<u32>,
    dispatching: Cell<bool>,
}

impl Inner {
    fn remove(&self, id: u64) {
        self.slots.borrow_mut().retain(|slot| slot.id != id);
    }

    fn callback(&self, id: u64) -> Option<Callback> {
        self.slots
            .borrow()
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| slot.callback.clone())
    }
}

/// Clears the dispatch flag even when a subscriber panics, so the signal
/// keeps delivering afterwards. Pulses still queued at that point are dropped.
struct Dispatching<'a>(&'a Inner);

impl<'a> Dispatching<'a> {
    fn begin(inner: &'a Inner) -> Self {
        inner.dispatching.set(true);
        Self(inner)
    }
}

impl Drop for Dispatching<'_> {
    fn drop(&mut self) {
        self.0.dispatching.set(false);
        self.0.pending.set(0);
    }
}

/// Publisher side of the channel; clones share subscribers
#[derive(Clone, Default)]
pub struct RestartSignal {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for RestartSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestartSignal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl RestartSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a consumer. It stays registered until the returned
    /// [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl FnMut() + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let callback: Callback = Rc::new(RefCell::new(callback));
        self.inner.slots.borrow_mut().push(Slot { id, callback });

        Subscription {
            id,
            signal: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver one pulse to every subscriber.
    ///
    /// Publishing from inside a callback queues the pulse behind the one
    /// being delivered.
    pub fn publish(&self) {
        let inner = &self.inner;
        inner.pending.set(inner.pending.get() + 1);
        if inner.dispatching.get() {
            return;
        }

        let _guard = Dispatching::begin(inner);
        while inner.pending.get() > 0 {
            inner.pending.set(inner.pending.get() - 1);

            let ids: Vec<u64> = inner.slots.borrow().iter().map(|slot| slot.id).collect();
            for id in ids {
                // Re-resolve each time: a consumer may unsubscribe another mid-pulse
                if let Some(callback) = inner.callback(id) {
                    let mut f = callback.borrow_mut();
                    (&mut *f)();
                }
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.slots.borrow().len()
    }
}

/// Consumer handle; unsubscribes on drop
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    signal: Weak<Inner>,
}

impl Subscription {
    /// Stop receiving pulses
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.signal.upgrade() {
            inner.remove(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(signal: &RestartSignal) -> (Rc<Cell<u32>>, Subscription) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let sub = signal.subscribe(move || c.set(c.get() + 1));
        (count, sub)
    }

    #[test]
    fn test_every_subscriber_gets_every_pulse() {
        let signal = RestartSignal::new();
        let (a, _sub_a) = counter(&signal);
        let (b, _sub_b) = counter(&signal);

        signal.publish();
        signal.publish();

        assert_eq!(a.get(), 2);
        assert_eq!(b.get(), 2);
    }

    #[test]
    fn test_late_subscriber_misses_past_pulses() {
        let signal = RestartSignal::new();
        signal.publish();
        let (count, _sub) = counter(&signal);
        assert_eq!(count.get(), 0);
        signal.publish();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let signal = RestartSignal::new();
        let (count, sub) = counter(&signal);
        assert_eq!(signal.subscriber_count(), 1);

        sub.unsubscribe();
        signal.publish();

        assert_eq!(count.get(), 0);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_signal_is_harmless() {
        let signal = RestartSignal::new();
        let (_, sub) = counter(&signal);
        drop(signal);
        drop(sub);
    }

    #[test]
    fn test_unsubscribed_mid_pulse_is_skipped() {
        let signal = RestartSignal::new();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let v = victim.clone();
        let _killer = signal.subscribe(move || {
            v.borrow_mut().take();
        });
        let (count, sub) = counter(&signal);
        *victim.borrow_mut() = Some(sub);

        signal.publish();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_nested_publish_is_queued_in_order() {
        let signal = RestartSignal::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first_log = log.clone();
        let nested = signal.clone();
        let fired = Rc::new(Cell::new(false));
        let _first = signal.subscribe(move || {
            first_log.borrow_mut().push("first");
            if !fired.replace(true) {
                nested.publish();
            }
        });
        let second_log = log.clone();
        let _second = signal.subscribe(move || second_log.borrow_mut().push("second"));

        signal.publish();

        assert_eq!(*log.borrow(), vec!["first", "second", "first", "second"]);
    }

    #[test]
    fn test_panicking_subscriber_does_not_wedge_signal() {
        let signal = RestartSignal::new();
        let armed = Rc::new(Cell::new(true));
        let a = armed.clone();
        let _bomb = signal.subscribe(move || {
            if a.replace(false) {
                panic!("subscriber failed");
            }
        });
        let (count, _sub) = counter(&signal);

        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| signal.publish()));
        assert!(caught.is_err());
        assert_eq!(count.get(), 0);

        signal.publish();
        assert_eq!(count.get(), 1);
    }
}
