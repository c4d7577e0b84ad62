//! Synchronous publish/subscribe primitive.
//!
//! # Responsibility
//! - Hold an ordered list of subscriber callbacks.
//! - Broadcast a borrowed value to every subscriber, in registration order.
//!
//! # Invariants
//! - Subscribers run synchronously on the caller's thread.
//! - A panicking subscriber never prevents later subscribers from running.
//! - There is no unsubscribe; the subscriber list lives as long as the
//!   session object graph that owns it.

use log::warn;
use std::fmt::{Debug, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Boxed subscriber callback invoked on every broadcast.
pub type Subscriber<T> = Box<dyn Fn(&T)>;

/// Minimal synchronous notifier.
///
/// The session model is single-threaded, so callbacks carry no `Send`
/// bound and shared state is reached through handles the callbacks
/// capture (`Arc<Mutex<_>>` in the controller wiring).
pub struct Notifier<T: ?Sized> {
    subscribers: Vec<Subscriber<T>>,
}

impl<T: ?Sized> Notifier<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Appends `subscriber` to the broadcast list.
    ///
    /// Registration order is broadcast order. Duplicate registrations are
    /// kept and invoked once each per broadcast.
    pub fn subscribe(&mut self, subscriber: impl Fn(&T) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Returns how many subscribers are registered.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Invokes every subscriber with `value`, in registration order.
    ///
    /// Each call is isolated: a panic is caught, reported as a warning
    /// diagnostic, and the remaining subscribers still run.
    pub fn notify(&self, value: &T) {
        for (index, subscriber) in self.subscribers.iter().enumerate() {
            let outcome = catch_unwind(AssertUnwindSafe(|| subscriber(value)));
            if outcome.is_err() {
                warn!(
                    "event=subscriber_panic module=notify status=isolated subscriber_index={index} subscribers={}",
                    self.subscribers.len()
                );
            }
        }
    }
}

impl<T: ?Sized> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Debug for Notifier<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
