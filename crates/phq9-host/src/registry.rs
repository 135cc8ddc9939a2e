use phq9_core::models::{EntityDescriptor, EntityId, EntityKey};

use crate::BoxFuture;
use crate::error::HostError;

/// Read-only lookup from a deterministic key to a live handle.
pub trait EntityDirectory: Send + Sync {
    /// `None` when nothing is registered under `key` yet.
    fn resolve<'a>(&'a self, key: &'a EntityKey) -> BoxFuture<'a, Option<EntityId>>;
}

/// Creation and removal of the entities this integration owns.
pub trait EntityPlatform: Send + Sync {
    /// Register entities and publish their initial state. Returns the
    /// assigned handles in input order.
    fn add_entities(
        &self,
        entities: Vec<EntityDescriptor>,
    ) -> BoxFuture<'_, Result<Vec<EntityId>, HostError>>;

    /// Deregister entities. Ids that are already gone are skipped.
    fn remove_entities<'a>(&'a self, ids: &'a [EntityId]) -> BoxFuture<'a, Result<(), HostError>>;
}
