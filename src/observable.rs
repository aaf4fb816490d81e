//! Cache + subscriber adapter over the entity stores.
//!
//! Several independent UI consumers share one logical collection: reads are
//! served from a cache until a mutation invalidates it, and subscribers are
//! notified synchronously after every invalidation. Each adapter instance
//! owns its own cache and listener set, so test instances never leak into
//! each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::clock::Clock;
use crate::entities::{self, EntityKind};
use crate::models::Entity;
use crate::storage::KeyValueStore;

/// Handle returned by [`ObservableEntities::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn() + Send + Sync>;

struct Inner {
    cache: Option<Vec<Entity>>,
    listeners: HashMap<u64, Listener>,
    next_id: u64,
}

/// One entity collection with change notification.
pub struct ObservableEntities<S> {
    store: S,
    kind: EntityKind,
    inner: Mutex<Inner>,
}

impl<S: KeyValueStore> ObservableEntities<S> {
    pub fn new(store: S, kind: EntityKind) -> Self {
        Self {
            store,
            kind,
            inner: Mutex::new(Inner {
                cache: None,
                listeners: HashMap::new(),
                next_id: 0,
            }),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Register a listener invoked synchronously after every invalidation.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, Arc::new(listener));
        SubscriptionId(id)
    }

    /// Drop a listener. Returns whether it was still registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().listeners.remove(&id.0).is_some()
    }

    /// The current collection. Hits storage only when the cache is cold.
    pub fn snapshot(&self) -> Vec<Entity> {
        let mut inner = self.lock();
        if inner.cache.is_none() {
            inner.cache = Some(entities::load(&self.store, self.kind));
        }
        inner.cache.clone().unwrap_or_default()
    }

    /// Drop the cache and notify every subscriber. Listeners run outside
    /// the internal lock, so they may call back into `snapshot`.
    pub fn invalidate(&self) {
        let listeners: Vec<Listener> = {
            let mut inner = self.lock();
            inner.cache = None;
            inner.listeners.values().cloned().collect()
        };
        for listener in listeners {
            listener();
        }
    }

    /// Create an entity through the underlying store, invalidating on
    /// success.
    pub fn add<C: Clock>(&self, clock: &C, name: &str) -> Option<Entity> {
        let created = entities::add(&self.store, self.kind, clock, name);
        if created.is_some() {
            self.invalidate();
        }
        created
    }

    /// Remove an entity through the underlying store, invalidating on
    /// success.
    pub fn remove(&self, id: &str) -> bool {
        let removed = entities::remove(&self.store, self.kind, id);
        if removed {
            self.invalidate();
        }
        removed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
