//! Change notification channel.
//!
//! A single-threaded listener list: the drawing surface runs on one event
//! loop, so handlers are plain boxed closures invoked synchronously in
//! subscription order.

use uuid::Uuid;

/// Subscription handle for unsubscribing from notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

type Listener<T> = Box<dyn Fn(&T)>;

/// Ordered set of listeners receiving `&T` snapshots.
pub struct Notifier<T: ?Sized> {
    listeners: Vec<(SubscriptionId, Listener<T>)>,
}

impl<T: ?Sized> Notifier<T> {
    /// Create an empty notifier
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId::new();
        self.listeners.push((id, Box::new(listener)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Remove a listener. Returns true if it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        let removed = self.listeners.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Deliver one snapshot to every listener
    pub fn emit(&self, value: &T) {
        for (_, listener) in &self.listeners {
            listener(value);
        }
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// True when nobody is listening
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Drop every listener
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl<T: ?Sized> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> std::fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
