//! Favorite-change broadcaster
//!
//! A process-wide registry that tells every open list about favorite toggles
//! made elsewhere. Publishing calls each current subscriber synchronously, in
//! the order they subscribed, before it returns. The subscriber that made the
//! change is skipped.
//!
//! Each list controller holds a [`FavoriteSubscription`] for its whole
//! lifetime; dropping it unsubscribes. The bus only keeps weak handles, so a
//! registration never keeps a list alive.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::photo::Photo;

static NEXT_SUBSCRIBER: AtomicU64 = AtomicU64::new(0);

/// Identity of a subscriber, unique within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// A favorite was added or removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteChange {
    pub photo: Photo,
    pub is_favorite: bool,
    pub origin: SubscriberId,
}

/// Receiver side of the bus
pub trait FavoriteListener: Send + Sync {
    /// Called once for every change published by another subscriber
    fn favorite_changed(&self, change: &FavoriteChange);
}

#[derive(Debug, Default)]
struct Registry {
    listeners: Vec<(SubscriberId, Weak<dyn FavoriteListener>)>,
}

fn lock_registry(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cloneable handle to the broadcaster
#[derive(Debug, Clone, Default)]
pub struct FavoriteBus {
    registry: Arc<Mutex<Registry>>,
}

impl FavoriteBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` behind every subscriber already registered
    #[must_use]
    pub fn subscribe<L: FavoriteListener + 'static>(&self, listener: &Arc<L>) -> FavoriteSubscription {
        let handle: Weak<dyn FavoriteListener> = Arc::downgrade(listener) as Weak<L>;
        let id = SubscriberId(NEXT_SUBSCRIBER.fetch_add(1, Ordering::Relaxed));
        lock_registry(&self.registry).listeners.push((id, handle));
        FavoriteSubscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver `change` to every current subscriber except its origin
    ///
    /// Returns how many subscribers were called. Zero subscribers is fine.
    /// The registry lock is released before any listener runs, so a listener
    /// may publish or subscribe itself.
    pub fn publish(&self, change: FavoriteChange) -> usize {
        let targets: Vec<Arc<dyn FavoriteListener>> = {
            let mut registry = lock_registry(&self.registry);
            registry.listeners.retain(|(_, handle)| handle.strong_count() > 0);
            registry
                .listeners
                .iter()
                .filter(|(id, _)| *id != change.origin)
                .filter_map(|(_, handle)| handle.upgrade())
                .collect()
        };

        for listener in &targets {
            listener.favorite_changed(&change);
        }
        tracing::debug!(id = change.photo.id, reached = targets.len(), "published favorite change");
        targets.len()
    }

    /// Live subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        lock_registry(&self.registry)
            .listeners
            .iter()
            .filter(|(_, handle)| handle.strong_count() > 0)
            .count()
    }
}

/// Live registration on a [`FavoriteBus`]; unsubscribes on drop
#[derive(Debug)]
pub struct FavoriteSubscription {
    id: SubscriberId,
    registry: Weak<Mutex<Registry>>,
}

impl FavoriteSubscription {
    #[must_use]
    pub const fn id(&self) -> SubscriberId {
        self.id
    }
}

impl Drop for FavoriteSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock_registry(&registry).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::PhotoId;

    /// Listener appending `(name, photo id)` to a log shared between listeners
    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<(&'static str, PhotoId)>>>,
    }

    impl FavoriteListener for Recorder {
        fn favorite_changed(&self, change: &FavoriteChange) {
            self.log.lock().unwrap().push((self.name, change.photo.id));
        }
    }

    fn recorder(name: &'static str, log: &Arc<Mutex<Vec<(&'static str, PhotoId)>>>) -> Arc<Recorder> {
        Arc::new(Recorder {
            name,
            log: Arc::clone(log),
        })
    }

    fn change(id: PhotoId, origin: SubscriberId) -> FavoriteChange {
        FavoriteChange {
            photo: Photo::new(1, id, format!("photo {id}")),
            is_favorite: true,
            origin,
        }
    }

    #[test]
    fn test_subscribers_get_distinct_ids() {
        let bus = FavoriteBus::new();
        let log = Arc::default();
        let (a, b) = (recorder("a", &log), recorder("b", &log));
        let first = bus.subscribe(&a);
        let second = bus.subscribe(&b);
        assert_ne!(first.id(), second.id());
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[test]
    fn test_publish_calls_others_in_subscription_order() {
        let bus = FavoriteBus::new();
        let log = Arc::default();
        let (origin, c, b) = (recorder("origin", &log), recorder("c", &log), recorder("b", &log));
        let origin_sub = bus.subscribe(&origin);
        let _c_sub = bus.subscribe(&c);
        let _b_sub = bus.subscribe(&b);

        assert_eq!(bus.publish(change(1, origin_sub.id())), 2);
        assert_eq!(*log.lock().unwrap(), vec![("c", 1), ("b", 1)]);

        bus.publish(change(2, origin_sub.id()));
        assert_eq!(log.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_origin_skips_own_change() {
        let bus = FavoriteBus::new();
        let log = Arc::default();
        let origin = recorder("origin", &log);
        let sub = bus.subscribe(&origin);

        assert_eq!(bus.publish(change(1, sub.id())), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = FavoriteBus::new();
        let log = Arc::default();
        let stray = bus.subscribe(&recorder("stray", &log));
        let origin = stray.id();
        drop(stray);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(change(1, origin)), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = FavoriteBus::new();
        let log = Arc::default();
        let (a, b) = (recorder("a", &log), recorder("b", &log));
        let first = bus.subscribe(&a);
        let second = bus.subscribe(&b);
        drop(first);

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(bus.publish(change(9, second.id())), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_dropped_listener_is_not_called() {
        let bus = FavoriteBus::new();
        let log = Arc::default();
        let origin = recorder("origin", &log);
        let gone = recorder("gone", &log);
        let origin_sub = bus.subscribe(&origin);
        let _gone_sub = bus.subscribe(&gone);
        drop(gone);

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(bus.publish(change(3, origin_sub.id())), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_late_subscriber_misses_earlier_changes() {
        let bus = FavoriteBus::new();
        let log = Arc::default();
        let origin = recorder("origin", &log);
        let origin_sub = bus.subscribe(&origin);
        bus.publish(change(1, origin_sub.id()));

        let late = recorder("late", &log);
        let _late_sub = bus.subscribe(&late);
        assert!(log.lock().unwrap().is_empty());
    }
}
