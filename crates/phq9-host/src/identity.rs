use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use phq9_core::models::{Subject, SubjectId};

use crate::BoxFuture;

/// A person was registered or deregistered in the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "subject_id", rename_all = "snake_case")]
pub enum IdentityEvent {
    Created(SubjectId),
    Removed(SubjectId),
}

/// Source of the people screening instances exist for.
pub trait IdentityProvider: Send + Sync {
    /// Current subjects.
    fn subjects(&self) -> BoxFuture<'_, Vec<Subject>>;

    /// Registration changes from now on.
    fn events(&self) -> broadcast::Receiver<IdentityEvent>;
}
