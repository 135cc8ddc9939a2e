use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use phq9_core::models::EntityId;

use crate::BoxFuture;
use crate::error::HostError;

/// A state value changed. `None` means the entity had no state (not yet
/// published, or removed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChanged {
    pub entity_id: EntityId,
    pub old: Option<String>,
    pub new: Option<String>,
}

impl StateChanged {
    /// Both sides present and different.
    pub fn is_transition(&self) -> bool {
        matches!((&self.old, &self.new), (Some(old), Some(new)) if old != new)
    }
}

/// Current values plus change notifications.
pub trait StateStore: Send + Sync {
    fn get<'a>(&'a self, id: &'a EntityId) -> BoxFuture<'a, Option<String>>;

    fn set<'a>(
        &'a self,
        id: &'a EntityId,
        value: Option<String>,
    ) -> BoxFuture<'a, Result<(), HostError>>;

    /// Deliver a `StateChanged` for every change to any of `ids` until the
    /// returned subscription is released.
    fn subscribe(&self, ids: &[EntityId], tx: mpsc::UnboundedSender<StateChanged>) -> Subscription;
}

/// Handle to a registered listener. Releasing it more than once is a no-op;
/// dropping it releases it.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
