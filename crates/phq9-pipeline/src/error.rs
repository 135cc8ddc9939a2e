use thiserror::Error;

use phq9_core::CoreError;
use phq9_core::models::{EntityKey, InputRole};
use phq9_host::HostError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("host error: {0}")]
    Host(#[from] HostError),

    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("no entity registered for {0}")]
    EntityNotFound(EntityKey),

    #[error("{option:?} is not an option for {role}")]
    InvalidOption { role: InputRole, option: String },
}
