//! Event channel: synchronous, ordered publish/subscribe.
//!
//! Owned by the engine and handed events once a step has completed. Handlers
//! run in subscription order and only ever see events, never the world.

use std::fmt;

use verdant_core::events::GameEvent;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&GameEvent) + Send>;

pub struct EventChannel {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Handler)>,
}

impl EventChannel {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn publish(&mut self, event: &GameEvent) {
        for (_, handler) in &mut self.subscribers {
            handler(event);
        }
    }

    /// Publish events in order. Every subscriber sees event N before any sees N+1.
    pub fn publish_all(&mut self, events: &[GameEvent]) {
        for event in events {
            self.publish(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use verdant_core::enums::GamePhase;

    use super::*;

    fn recorder(channel: &mut EventChannel) -> (SubscriptionId, Arc<Mutex<Vec<GameEvent>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = channel.subscribe(move |e| sink.lock().unwrap().push(e.clone()));
        (id, seen)
    }

    #[test]
    fn subscribers_see_events_in_order() {
        let mut channel = EventChannel::new();
        let (_, a) = recorder(&mut channel);
        let (_, b) = recorder(&mut channel);

        let events = vec![
            GameEvent::BalanceChanged { balance: 50 },
            GameEvent::PhaseChanged {
                phase: GamePhase::Playing,
            },
        ];
        channel.publish_all(&events);

        assert_eq!(*a.lock().unwrap(), events);
        assert_eq!(*b.lock().unwrap(), events);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut channel = EventChannel::new();
        let (id, seen) = recorder(&mut channel);
        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        assert!(channel.is_empty());

        channel.publish(&GameEvent::BalanceChanged { balance: 1 });
        assert!(seen.lock().unwrap().is_empty());
    }
}
