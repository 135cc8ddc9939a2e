use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

use phq9_core::models::{EntityDescriptor, EntityId, EntityKey, Subject, SubjectId};

use crate::BoxFuture;
use crate::error::HostError;
use crate::identity::{IdentityEvent, IdentityProvider};
use crate::registry::{EntityDirectory, EntityPlatform};
use crate::state::{StateChanged, StateStore, Subscription};

const IDENTITY_EVENT_CAPACITY: usize = 64;

struct Subscriber {
    ids: HashSet<EntityId>,
    tx: mpsc::UnboundedSender<StateChanged>,
}

#[derive(Default)]
struct Inner {
    registry: HashMap<EntityKey, EntityId>,
    entities: HashMap<EntityId, EntityDescriptor>,
    states: HashMap<EntityId, String>,
    subscribers: HashMap<Uuid, Subscriber>,
    people: Vec<Subject>,
}

impl Inner {
    /// Apply a change and return the notifications it produces. Nothing is
    /// produced when the value is unchanged.
    fn apply(&mut self, id: &EntityId, value: Option<String>) -> Vec<(mpsc::UnboundedSender<StateChanged>, StateChanged)> {
        let old = match &value {
            Some(v) => self.states.insert(id.clone(), v.clone()),
            None => self.states.remove(id),
        };
        if old == value {
            return Vec::new();
        }

        let change = StateChanged {
            entity_id: id.clone(),
            old,
            new: value,
        };
        self.subscribers.retain(|_, s| !s.tx.is_closed());
        self.subscribers
            .values()
            .filter(|s| s.ids.contains(id))
            .map(|s| (s.tx.clone(), change.clone()))
            .collect()
    }

    fn assign_id(&self, descriptor: &EntityDescriptor) -> EntityId {
        let base = format!("{}.{}", descriptor.key.platform, descriptor.object_id);
        let mut candidate = EntityId::new(base.clone());
        let mut suffix = 2;
        while self.entities.contains_key(&candidate) {
            candidate = EntityId::new(format!("{base}_{suffix}"));
            suffix += 1;
        }
        candidate
    }
}

fn deliver(notifications: Vec<(mpsc::UnboundedSender<StateChanged>, StateChanged)>) {
    for (tx, change) in notifications {
        // A closed receiver means the listener is shutting down.
        let _ = tx.send(change);
    }
}

/// In-process host: registry, state store and person list behind one lock.
///
/// Notifications are dispatched after the lock is released.
pub struct MemoryHost {
    inner: Arc<Mutex<Inner>>,
    identity_tx: broadcast::Sender<IdentityEvent>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        let (identity_tx, _) = broadcast::channel(IDENTITY_EVENT_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            identity_tx,
        }
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a fixed set of people and no event emitted for them.
    pub fn with_people(people: Vec<Subject>) -> Self {
        let host = Self::default();
        host.lock().people = people;
        host
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a person and announce it.
    pub fn add_person(&self, subject: Subject) {
        let id = subject.id.clone();
        {
            let mut inner = self.lock();
            inner.people.retain(|p| p.id != id);
            inner.people.push(subject);
        }
        tracing::debug!(subject = %id, "person registered");
        let _ = self.identity_tx.send(IdentityEvent::Created(id));
    }

    /// Deregister a person and announce it. Unknown ids are ignored.
    pub fn remove_person(&self, id: &SubjectId) {
        let removed = {
            let mut inner = self.lock();
            let before = inner.people.len();
            inner.people.retain(|p| &p.id != id);
            inner.people.len() != before
        };
        if removed {
            tracing::debug!(subject = %id, "person removed");
            let _ = self.identity_tx.send(IdentityEvent::Removed(id.clone()));
        }
    }

    /// Current value, read synchronously.
    pub fn state(&self, id: &EntityId) -> Option<String> {
        self.lock().states.get(id).cloned()
    }

    pub fn entity_id(&self, key: &EntityKey) -> Option<EntityId> {
        self.lock().registry.get(key).cloned()
    }

    pub fn descriptor(&self, id: &EntityId) -> Option<EntityDescriptor> {
        self.lock().entities.get(id).cloned()
    }

    pub fn entity_count(&self) -> usize {
        self.lock().entities.len()
    }

    /// Listeners still registered and not closed.
    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.lock();
        inner.subscribers.retain(|_, s| !s.tx.is_closed());
        inner.subscribers.len()
    }
}

impl IdentityProvider for MemoryHost {
    fn subjects(&self) -> BoxFuture<'_, Vec<Subject>> {
        Box::pin(async move { self.lock().people.clone() })
    }

    fn events(&self) -> broadcast::Receiver<IdentityEvent> {
        self.identity_tx.subscribe()
    }
}

impl EntityDirectory for MemoryHost {
    fn resolve<'a>(&'a self, key: &'a EntityKey) -> BoxFuture<'a, Option<EntityId>> {
        Box::pin(async move { self.lock().registry.get(key).cloned() })
    }
}

impl EntityPlatform for MemoryHost {
    fn add_entities(
        &self,
        entities: Vec<EntityDescriptor>,
    ) -> BoxFuture<'_, Result<Vec<EntityId>, HostError>> {
        Box::pin(async move {
            let mut ids = Vec::with_capacity(entities.len());
            let mut notifications = Vec::new();
            {
                let mut inner = self.lock();
                if let Some(dup) = entities.iter().find(|d| inner.registry.contains_key(&d.key)) {
                    return Err(HostError::DuplicateEntity(dup.key.clone()));
                }
                for descriptor in entities {
                    let id = inner.assign_id(&descriptor);
                    let initial = descriptor.initial_state.clone();
                    inner.registry.insert(descriptor.key.clone(), id.clone());
                    inner.entities.insert(id.clone(), descriptor);
                    if initial.is_some() {
                        notifications.extend(inner.apply(&id, initial));
                    }
                    ids.push(id);
                }
            }
            deliver(notifications);
            tracing::debug!(count = ids.len(), "entities added");
            Ok(ids)
        })
    }

    fn remove_entities<'a>(&'a self, ids: &'a [EntityId]) -> BoxFuture<'a, Result<(), HostError>> {
        Box::pin(async move {
            let mut notifications = Vec::new();
            {
                let mut inner = self.lock();
                for id in ids {
                    let Some(descriptor) = inner.entities.remove(id) else {
                        continue;
                    };
                    inner.registry.remove(&descriptor.key);
                    notifications.extend(inner.apply(id, None));
                }
            }
            deliver(notifications);
            tracing::debug!(count = ids.len(), "entities removed");
            Ok(())
        })
    }
}

impl StateStore for MemoryHost {
    fn get<'a>(&'a self, id: &'a EntityId) -> BoxFuture<'a, Option<String>> {
        Box::pin(async move { self.state(id) })
    }

    fn set<'a>(
        &'a self,
        id: &'a EntityId,
        value: Option<String>,
    ) -> BoxFuture<'a, Result<(), HostError>> {
        Box::pin(async move {
            let notifications = {
                let mut inner = self.lock();
                if !inner.entities.contains_key(id) {
                    return Err(HostError::UnknownEntity(id.clone()));
                }
                inner.apply(id, value)
            };
            deliver(notifications);
            Ok(())
        })
    }

    fn subscribe(&self, ids: &[EntityId], tx: mpsc::UnboundedSender<StateChanged>) -> Subscription {
        let token = Uuid::new_v4();
        self.lock().subscribers.insert(
            token,
            Subscriber {
                ids: ids.iter().cloned().collect(),
                tx,
            },
        );

        let inner: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .subscribers
                    .remove(&token);
            }
        })
    }
}
