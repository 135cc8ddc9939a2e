//! phq9-host
//!
//! The boundary to the home-automation host. Traits for the collaborators
//! the integration consumes (identity provider, entity directory, entity
//! platform, state store) and an in-memory host that implements all of them.

pub mod error;
pub mod identity;
pub mod memory;
pub mod registry;
pub mod state;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub use crate::error::HostError;
pub use crate::identity::{IdentityEvent, IdentityProvider};
pub use crate::memory::MemoryHost;
pub use crate::registry::{EntityDirectory, EntityPlatform};
pub use crate::state::{StateChanged, StateStore, Subscription};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The host collaborators, passed explicitly to every component.
#[derive(Clone)]
pub struct HostContext {
    pub identities: Arc<dyn IdentityProvider>,
    pub directory: Arc<dyn EntityDirectory>,
    pub platform: Arc<dyn EntityPlatform>,
    pub states: Arc<dyn StateStore>,
}

impl HostContext {
    /// Use one host object for every collaborator.
    pub fn new<H>(host: Arc<H>) -> Self
    where
        H: IdentityProvider + EntityDirectory + EntityPlatform + StateStore + 'static,
    {
        Self {
            identities: host.clone(),
            directory: host.clone(),
            platform: host.clone(),
            states: host,
        }
    }

    /// Swap the directory components resolve keys through.
    pub fn with_directory(mut self, directory: Arc<dyn EntityDirectory>) -> Self {
        self.directory = directory;
        self
    }
}
