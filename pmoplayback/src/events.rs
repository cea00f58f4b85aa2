//! Name-keyed listener registry shared by the playback adapters.
//!
//! Every adapter owns one [`ListenerRegistry`] for its event type. Callbacks
//! are grouped by a fixed set of categories ([`EventKind`]), invoked in
//! registration order, and removed by identity. Channel subscribers receive
//! every event regardless of category.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded, unbounded};
use parking_lot::Mutex;
use tracing::trace;

/// Fixed, enumerated set of listener categories.
pub trait EventKind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every category, in declaration order.
    const ALL: &'static [Self];

    /// Public name of the category (`timeUpdate`, `connectionChanged`, ...).
    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

/// An event emitted by an adapter, tagged with its category.
pub trait PlayerEvent: Clone + fmt::Debug + Send + Sync + 'static {
    type Kind: EventKind;

    fn kind(&self) -> Self::Kind;
}

/// Shared callback handle. Two handles are the same listener when they point
/// to the same allocation.
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Wraps a closure into a [`Listener`] handle that can later be passed to `off`.
pub fn listener<E, F>(callback: F) -> Listener<E>
where
    F: Fn(&E) + Send + Sync + 'static,
{
    Arc::new(callback)
}

fn same_listener<E>(a: &Listener<E>, b: &Listener<E>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

pub struct ListenerRegistry<E: PlayerEvent> {
    listeners: Mutex<HashMap<E::Kind, Vec<Listener<E>>>>,
    subscribers: Mutex<Vec<Sender<E>>>,
}

impl<E: PlayerEvent> ListenerRegistry<E> {
    pub fn new() -> Self {
        let listeners = E::Kind::ALL
            .iter()
            .map(|kind| (*kind, Vec::new()))
            .collect();
        Self {
            listeners: Mutex::new(listeners),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Appends `listener` to the callbacks of `kind`.
    pub fn on(&self, kind: E::Kind, listener: Listener<E>) {
        if let Some(list) = self.listeners.lock().get_mut(&kind) {
            list.push(listener);
        }
    }

    /// Removes every registration of `listener` under `kind`.
    pub fn off(&self, kind: E::Kind, listener: &Listener<E>) {
        if let Some(list) = self.listeners.lock().get_mut(&kind) {
            list.retain(|registered| !same_listener(registered, listener));
        }
    }

    /// Same as [`on`](Self::on) with the category given by name. Unknown names
    /// are ignored and `false` is returned.
    pub fn on_named(&self, name: &str, listener: Listener<E>) -> bool {
        match E::Kind::from_name(name) {
            Some(kind) => {
                self.on(kind, listener);
                true
            }
            None => {
                trace!(event = name, "ignoring listener for unknown event");
                false
            }
        }
    }

    /// Same as [`off`](Self::off) with the category given by name.
    pub fn off_named(&self, name: &str, listener: &Listener<E>) -> bool {
        match E::Kind::from_name(name) {
            Some(kind) => {
                self.off(kind, listener);
                true
            }
            None => false,
        }
    }

    /// Opens a channel receiving every emitted event.
    ///
    /// The channel is unbounded: a receiver that is kept alive but never
    /// drained grows with every event (`timeUpdate` fires several times per
    /// second). Drop the receiver to unsubscribe, or use
    /// [`subscribe_bounded`](Self::subscribe_bounded).
    pub fn subscribe(&self) -> Receiver<E> {
        let (tx, rx) = unbounded::<E>();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Opens a channel holding at most `capacity` pending events. Events
    /// emitted while it is full are dropped for this subscriber only.
    pub fn subscribe_bounded(&self, capacity: usize) -> Receiver<E> {
        let (tx, rx) = bounded::<E>(capacity);
        self.subscribers.lock().push(tx);
        rx
    }

    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners.lock().get(&kind).map_or(0, Vec::len)
    }

    /// Invokes the listeners of the event's category, in registration order.
    ///
    /// The registry lock is released before callbacks run, so a callback may
    /// register or remove listeners; such changes apply to the next event.
    pub fn emit(&self, event: &E) {
        let kind = event.kind();
        let snapshot: Vec<Listener<E>> = self
            .listeners
            .lock()
            .get(&kind)
            .cloned()
            .unwrap_or_default();

        trace!(
            event = kind.name(),
            listeners = snapshot.len(),
            "dispatching event"
        );
        for listener in &snapshot {
            listener(event);
        }

        let mut subscribers = self.subscribers.lock();
        if !subscribers.is_empty() {
            subscribers.retain(|tx| match tx.try_send(event.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    trace!(event = kind.name(), "subscriber full, event dropped");
                    true
                }
                Err(TrySendError::Disconnected(_)) => false,
            });
        }
    }
}

impl<E: PlayerEvent> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PlayerEvent> fmt::Debug for ListenerRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<(&'static str, usize)> = E::Kind::ALL
            .iter()
            .map(|kind| (kind.name(), self.listener_count(*kind)))
            .collect();
        f.debug_struct("ListenerRegistry")
            .field("listeners", &counts)
            .field("subscribers", &self.subscribers.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Kind {
        Tick,
        Tock,
    }

    impl EventKind for Kind {
        const ALL: &'static [Self] = &[Kind::Tick, Kind::Tock];

        fn name(self) -> &'static str {
            match self {
                Kind::Tick => "tick",
                Kind::Tock => "tock",
            }
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Event {
        Tick(u32),
        Tock,
    }

    impl PlayerEvent for Event {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            match self {
                Event::Tick(_) => Kind::Tick,
                Event::Tock => Kind::Tock,
            }
        }
    }

    fn counter() -> (Arc<AtomicUsize>, Listener<Event>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let cb = listener(move |_: &Event| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (count, cb)
    }

    #[test]
    fn test_on_fire_off_fire_invokes_once() {
        let registry = ListenerRegistry::<Event>::new();
        let (count, cb) = counter();

        registry.on(Kind::Tick, cb.clone());
        registry.emit(&Event::Tick(1));
        registry.off(Kind::Tick, &cb);
        registry.emit(&Event::Tick(2));

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let registry = ListenerRegistry::<Event>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for id in 0..3 {
            let order = order.clone();
            registry.on(
                Kind::Tick,
                listener(move |_: &Event| order.lock().push(id)),
            );
        }
        registry.emit(&Event::Tick(0));

        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_only_matching_category_is_invoked() {
        let registry = ListenerRegistry::<Event>::new();
        let (ticks, tick_cb) = counter();
        let (tocks, tock_cb) = counter();
        registry.on(Kind::Tick, tick_cb);
        registry.on(Kind::Tock, tock_cb);

        registry.emit(&Event::Tock);

        assert_eq!(ticks.load(Ordering::SeqCst), 0);
        assert_eq!(tocks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_off_matches_identity_only() {
        let registry = ListenerRegistry::<Event>::new();
        let (first, first_cb) = counter();
        let (second, second_cb) = counter();
        registry.on(Kind::Tick, first_cb.clone());
        registry.on(Kind::Tick, second_cb);

        registry.off(Kind::Tick, &first_cb);
        registry.emit(&Event::Tick(0));

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicate_registration_is_not_deduplicated() {
        let registry = ListenerRegistry::<Event>::new();
        let (count, cb) = counter();
        registry.on(Kind::Tick, cb.clone());
        registry.on(Kind::Tick, cb.clone());

        registry.emit(&Event::Tick(0));
        assert_eq!(count.load(Ordering::SeqCst), 2);

        registry.off(Kind::Tick, &cb);
        assert_eq!(registry.listener_count(Kind::Tick), 0);
    }

    #[test]
    fn test_unknown_names_are_ignored() {
        let registry = ListenerRegistry::<Event>::new();
        let (count, cb) = counter();

        assert!(!registry.on_named("bogus", cb.clone()));
        assert!(!registry.off_named("bogus", &cb));
        assert!(registry.on_named("tick", cb.clone()));
        registry.emit(&Event::Tick(0));
        assert!(registry.off_named("tick", &cb));
        registry.emit(&Event::Tick(0));

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_may_mutate_registry_during_dispatch() {
        let registry = Arc::new(ListenerRegistry::<Event>::new());
        let (late, late_cb) = counter();

        let reg = registry.clone();
        registry.on(
            Kind::Tick,
            listener(move |_: &Event| reg.on(Kind::Tick, late_cb.clone())),
        );

        registry.emit(&Event::Tick(0));
        assert_eq!(late.load(Ordering::SeqCst), 0);
        registry.emit(&Event::Tick(1));
        assert_eq!(late.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscribers_receive_events_and_are_pruned() {
        let registry = ListenerRegistry::<Event>::new();
        let rx = registry.subscribe();
        let dropped = registry.subscribe();
        drop(dropped);

        registry.emit(&Event::Tick(7));
        registry.emit(&Event::Tock);

        assert_eq!(rx.try_recv().unwrap(), Event::Tick(7));
        assert_eq!(rx.try_recv().unwrap(), Event::Tock);
        assert_eq!(registry.subscribers.lock().len(), 1);
    }

    #[test]
    fn test_bounded_subscriber_drops_overflow() {
        let registry = ListenerRegistry::<Event>::new();
        let slow = registry.subscribe_bounded(2);
        let fast = registry.subscribe();

        for n in 0..5 {
            registry.emit(&Event::Tick(n));
        }

        assert_eq!(
            slow.try_iter().collect::<Vec<_>>(),
            vec![Event::Tick(0), Event::Tick(1)]
        );
        assert_eq!(fast.try_iter().count(), 5);

        registry.emit(&Event::Tock);
        assert_eq!(slow.try_recv().unwrap(), Event::Tock);
        assert_eq!(registry.subscribers.lock().len(), 2);

        drop(slow);
        registry.emit(&Event::Tock);
        assert_eq!(registry.subscribers.lock().len(), 1);
    }
}
