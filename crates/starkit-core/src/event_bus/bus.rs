//! Event Bus implementation.
//!
//! Provides the generic [`EventBus`] used for scene-wide event distribution.

use uuid::Uuid;

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Events that can be routed by category
pub trait Categorized {
    /// Category type used by [`EventFilter::Categories`]
    type Category: PartialEq + std::fmt::Debug;

    /// Get the category of this event
    fn category(&self) -> Self::Category;
}

/// Filter to receive only specific event types
#[derive(Debug, Clone)]
pub enum EventFilter<C> {
    /// Receive all events.
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<C>),
}

impl<C> Default for EventFilter<C> {
    fn default() -> Self {
        EventFilter::All
    }
}

impl<C: PartialEq> EventFilter<C> {
    /// Check if an event matches this filter
    pub fn matches<E>(&self, event: &E) -> bool
    where
        E: Categorized<Category = C>,
    {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

/// Type alias for event handler functions
type EventHandler<E> = Box<dyn FnMut(&E)>;

/// Single-threaded event bus
///
/// Listeners are called in subscription order.
pub struct EventBus<E: Categorized> {
    handlers: Vec<(SubscriptionId, EventFilter<E::Category>, EventHandler<E>)>,
}

impl<E: Categorized + Clone> EventBus<E> {
    /// Create an event bus with no subscribers
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Publish an event to all matching subscribers
    ///
    /// Returns the number of listeners that received the event.
    pub fn publish(&mut self, event: E) -> usize {
        let mut delivered = 0;
        for (_, filter, handler) in self.handlers.iter_mut() {
            if filter.matches(&event) {
                handler(&event);
                delivered += 1;
            }
        }

        delivered
    }

    /// Subscribe to events with a synchronous handler
    pub fn subscribe<F>(&mut self, filter: EventFilter<E::Category>, handler: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.push((id, filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sub, _, _)| *sub != id);
        let removed = self.handlers.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl<E: Categorized + Clone> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Categorized> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
