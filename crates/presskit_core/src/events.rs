//! Named publish/subscribe event bus
//!
//! The bus is an ordinary owned value. Whoever owns it (usually the widget
//! context) passes it by reference to the code that publishes, so there is
//! no global dispatcher to initialize before tests can run.
//!
//! # Example
//!
//! ```rust
//! use presskit_core::events::{BusEvent, EventBus};
//!
//! #[derive(Debug)]
//! struct Ping(u32);
//!
//! impl BusEvent for Ping {
//!     fn name(&self) -> &'static str {
//!         "ping"
//!     }
//! }
//!
//! let mut bus = EventBus::new();
//! let sub = bus.subscribe("ping", |ping: &Ping| println!("got {}", ping.0));
//! assert_eq!(bus.publish(&Ping(1)), 1);
//!
//! bus.unsubscribe(sub);
//! assert_eq!(bus.publish(&Ping(2)), 0);
//! ```

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle returned by [`EventBus::subscribe`]
    pub struct SubscriptionId;
}

/// An event that can travel over the bus
pub trait BusEvent {
    /// Event identifier subscribers listen on
    fn name(&self) -> &'static str;
}

type Callback<E> = Box<dyn FnMut(&E) + Send>;

struct Subscriber<E> {
    name: &'static str,
    callback: Callback<E>,
}

/// Publish/subscribe bus keyed by event name
pub struct EventBus<E> {
    subscribers: SlotMap<SubscriptionId, Subscriber<E>>,
    /// Subscription order per event name
    by_name: FxHashMap<&'static str, SmallVec<[SubscriptionId; 4]>>,
}

impl<E: BusEvent> EventBus<E> {
    /// Create an empty bus
    pub fn new() -> Self {
        Self {
            subscribers: SlotMap::with_key(),
            by_name: FxHashMap::default(),
        }
    }

    /// Subscribe to every event published under `name`
    ///
    /// Subscribers run in subscription order.
    pub fn subscribe<F>(&mut self, name: &'static str, callback: F) -> SubscriptionId
    where
        F: FnMut(&E) + Send + 'static,
    {
        let id = self.subscribers.insert(Subscriber {
            name,
            callback: Box::new(callback),
        });
        self.by_name.entry(name).or_default().push(id);
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(subscriber) = self.subscribers.remove(id) else {
            return false;
        };
        if let Some(ids) = self.by_name.get_mut(subscriber.name) {
            ids.retain(|sub| *sub != id);
            if ids.is_empty() {
                self.by_name.remove(subscriber.name);
            }
        }
        true
    }

    /// Deliver an event to all subscribers of its name
    ///
    /// Returns how many subscribers received it.
    pub fn publish(&mut self, event: &E) -> usize {
        let name = event.name();
        let Some(ids) = self.by_name.get(name) else {
            tracing::trace!(name, "event published with no subscribers");
            return 0;
        };

        let mut delivered = 0;
        for id in ids {
            if let Some(subscriber) = self.subscribers.get_mut(*id) {
                (subscriber.callback)(event);
                delivered += 1;
            }
        }
        tracing::trace!(name, delivered, "event published");
        delivered
    }

    /// Number of live subscriptions for an event name
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.by_name.get(name).map_or(0, |ids| ids.len())
    }

    /// Drop every subscription
    pub fn clear(&mut self) {
        self.subscribers.clear();
        self.by_name.clear();
    }
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
