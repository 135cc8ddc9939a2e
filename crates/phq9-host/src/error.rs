use thiserror::Error;

use phq9_core::models::{EntityId, EntityKey};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("entity not registered: {0}")]
    UnknownEntity(EntityId),

    #[error("entity key already registered: {0}")]
    DuplicateEntity(EntityKey),

    #[error("host unavailable: {0}")]
    Unavailable(String),
}
