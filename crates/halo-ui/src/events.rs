//! Completion events and the bus they travel on.
//!
//! Ring groups only `post`; nothing is delivered until the host calls
//! [`EventBus::dispatch`] at its flush point (typically once per frame).
//! Handlers therefore never run inside a value setter.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

// ── identifiers ───────────────────────────────────────────────────────────

/// Identity of the ring group that raised an event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl GroupId {
    /// Allocates a process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

// ── events ────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RingEventKind {
    /// One ring crossed to full while at least one sibling is still below.
    RingCompleted,
    /// A ring crossed to full and both siblings were already full.
    AllRingsCompleted,
}

impl RingEventKind {
    pub fn name(self) -> &'static str {
        match self {
            RingEventKind::RingCompleted => "RingCompleted",
            RingEventKind::AllRingsCompleted => "AllRingsCompleted",
        }
    }
}

impl fmt::Display for RingEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RingEvent {
    pub kind: RingEventKind,
    pub group: GroupId,
}

// ── bus ───────────────────────────────────────────────────────────────────

type Handler = Box<dyn FnMut(&RingEvent)>;

#[derive(Default)]
struct BusInner {
    queue: Vec<RingEvent>,
    subscribers: Vec<(SubscriptionId, Handler)>,
    next_id: u64,
    /// Ids of the handlers `dispatch` currently holds.
    checked_out: HashSet<SubscriptionId>,
    /// Ids unsubscribed while their handler was checked out by `dispatch`.
    removed: HashSet<SubscriptionId>,
    dispatching: bool,
}

/// Single-threaded publish/subscribe channel for [`RingEvent`]s.
///
/// Cloning yields another handle to the same bus. Handlers may post,
/// subscribe or unsubscribe from inside a callback; events posted during a
/// dispatch are delivered by that same dispatch, after the current batch.
#[derive(Clone, Default)]
pub struct EventBus(Rc<RefCell<BusInner>>);

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for every event delivered from now on.
    pub fn subscribe(&self, handler: impl FnMut(&RingEvent) + 'static) -> SubscriptionId {
        let mut inner = self.0.borrow_mut();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Removes a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.0.borrow_mut();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sid, _)| *sid != id);
        if inner.subscribers.len() != before {
            return true;
        }
        if inner.checked_out.contains(&id) {
            return inner.removed.insert(id);
        }
        false
    }

    /// Queues an event. Never calls handlers.
    pub fn post(&self, event: RingEvent) {
        log::info!("{} posted {}", event.group, event.kind);
        self.0.borrow_mut().queue.push(event);
    }

    /// Number of queued, undelivered events.
    pub fn pending(&self) -> usize {
        self.0.borrow().queue.len()
    }

    /// Drains the queue without delivering to subscribers.
    pub fn take_events(&self) -> Vec<RingEvent> {
        std::mem::take(&mut self.0.borrow_mut().queue)
    }

    /// Delivers queued events to subscribers in post order, each event to
    /// every subscriber in subscription order. Returns the number of events
    /// delivered.
    pub fn dispatch(&self) -> usize {
        let mut delivered = 0;
        loop {
            let (events, mut subscribers) = {
                let mut inner = self.0.borrow_mut();
                if inner.queue.is_empty() || inner.dispatching {
                    break;
                }
                inner.dispatching = true;
                let subscribers = std::mem::take(&mut inner.subscribers);
                inner.checked_out = subscribers.iter().map(|(id, _)| *id).collect();
                (std::mem::take(&mut inner.queue), subscribers)
            };

            for event in &events {
                for (id, handler) in subscribers.iter_mut() {
                    if self.0.borrow().removed.contains(id) {
                        continue;
                    }
                    handler(event);
                }
            }
            delivered += events.len();

            let mut inner = self.0.borrow_mut();
            let removed = std::mem::take(&mut inner.removed);
            inner.checked_out.clear();
            subscribers.retain(|(id, _)| !removed.contains(id));
            let added = std::mem::take(&mut inner.subscribers);
            subscribers.extend(added);
            inner.subscribers = subscribers;
            inner.dispatching = false;
        }
        delivered
    }

    #[inline]
    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().subscribers.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        f.debug_struct("EventBus")
            .field("pending", &inner.queue.len())
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: RingEventKind, group: GroupId) -> RingEvent {
        RingEvent { kind, group }
    }

    fn recorder(bus: &EventBus) -> (SubscriptionId, Rc<RefCell<Vec<RingEvent>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = bus.subscribe(move |e| sink.borrow_mut().push(*e));
        (id, seen)
    }

    #[test]
    fn group_ids_are_unique() {
        let a = GroupId::next();
        let b = GroupId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn post_only_queues() {
        let bus = EventBus::new();
        let (_, seen) = recorder(&bus);
        bus.post(event(RingEventKind::RingCompleted, GroupId::next()));
        assert_eq!(bus.pending(), 1);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn dispatch_delivers_in_post_order() {
        let bus = EventBus::new();
        let (_, seen) = recorder(&bus);
        let g = GroupId::next();
        bus.post(event(RingEventKind::RingCompleted, g));
        bus.post(event(RingEventKind::AllRingsCompleted, g));

        assert_eq!(bus.dispatch(), 2);
        assert_eq!(bus.pending(), 0);
        let kinds: Vec<_> = seen.borrow().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, [RingEventKind::RingCompleted, RingEventKind::AllRingsCompleted]);
    }

    #[test]
    fn every_subscriber_sees_every_event() {
        let bus = EventBus::new();
        let (_, a) = recorder(&bus);
        let (_, b) = recorder(&bus);
        bus.post(event(RingEventKind::RingCompleted, GroupId::next()));
        bus.dispatch();
        assert_eq!(a.borrow().len(), 1);
        assert_eq!(b.borrow().len(), 1);
    }

    #[test]
    fn unsubscribed_handler_is_not_called() {
        let bus = EventBus::new();
        let (id, seen) = recorder(&bus);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.post(event(RingEventKind::RingCompleted, GroupId::next()));
        bus.dispatch();
        assert!(seen.borrow().is_empty());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn handler_may_post_and_subscribe_during_dispatch() {
        let bus = EventBus::new();
        let g = GroupId::next();
        let late = Rc::new(RefCell::new(0usize));

        let inner_bus = bus.clone();
        let late_sink = late.clone();
        bus.subscribe(move |e| {
            if e.kind == RingEventKind::RingCompleted {
                inner_bus.post(RingEvent { kind: RingEventKind::AllRingsCompleted, group: e.group });
                let sink = late_sink.clone();
                inner_bus.subscribe(move |_| *sink.borrow_mut() += 1);
            }
        });

        bus.post(event(RingEventKind::RingCompleted, g));
        assert_eq!(bus.dispatch(), 2);
        // The late subscriber joined after the first batch and saw the follow-up.
        assert_eq!(*late.borrow(), 1);
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[test]
    fn unsubscribe_during_dispatch_only_accepts_known_ids() {
        let bus = EventBus::new();
        let other = EventBus::new();
        let foreign = other.subscribe(|_| {});
        let target: Rc<std::cell::Cell<Option<SubscriptionId>>> = Rc::default();
        let results = Rc::new(RefCell::new(Vec::new()));

        let inner_bus = bus.clone();
        let victim = target.clone();
        let sink = results.clone();
        bus.subscribe(move |_| {
            let mut r = sink.borrow_mut();
            r.push(inner_bus.unsubscribe(foreign));
            if let Some(id) = victim.get() {
                r.push(inner_bus.unsubscribe(id));
                r.push(inner_bus.unsubscribe(id));
            }
        });
        let (id, seen) = recorder(&bus);
        target.set(Some(id));

        bus.post(event(RingEventKind::RingCompleted, GroupId::next()));
        bus.dispatch();
        // Foreign id refused, checked-out id removed once.
        assert_eq!(*results.borrow(), [false, true, false]);
        assert!(seen.borrow().is_empty());
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(other.subscriber_count(), 1);
    }

    #[test]
    fn take_events_skips_delivery() {
        let bus = EventBus::new();
        let (_, seen) = recorder(&bus);
        let g = GroupId::next();
        bus.post(event(RingEventKind::RingCompleted, g));
        let taken = bus.take_events();
        assert_eq!(taken, [event(RingEventKind::RingCompleted, g)]);
        assert_eq!(bus.dispatch(), 0);
        assert!(seen.borrow().is_empty());
    }
}
