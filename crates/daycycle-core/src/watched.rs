//! Change-detecting value container with ordered subscribers.
//!
//! A [`WatchedValue`] holds a value and a list of callbacks. Assigning an
//! equal value is a no-op; assigning a different value replaces it and
//! invokes every callback synchronously, in registration order, before
//! [`WatchedValue::set`] returns.
//!
//! Notification happens while `set` holds `&mut self`, so a callback can
//! never reach the container that is notifying it. Subscribing or
//! unsubscribing during a notification is therefore impossible, and each
//! callback runs at most once per `set`.

use core::fmt;

/// Handle returned by [`WatchedValue::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(&T) + Send>;

/// A value that notifies subscribers when it actually changes.
pub struct WatchedValue<T> {
    value: T,
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
    next_id: u64,
}

impl<T: PartialEq> WatchedValue<T> {
    /// Wrap an initial value. No notification is fired.
    pub const fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Return the current value.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Store `value` and notify subscribers if it differs from the current
    /// value. Returns `true` when a change happened.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for (_, callback) in &mut self.subscribers {
            callback(&self.value);
        }
        true
    }

    /// Append a callback. It runs after every callback registered before it.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if the handle was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Number of registered callbacks.
    pub const fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: fmt::Debug> fmt::Debug for WatchedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchedValue")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
