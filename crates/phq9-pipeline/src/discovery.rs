//! Bounded-retry discovery of registered entities.
//!
//! Entities may not be registered yet when a sensor starts, so lookups are
//! retried on a fixed interval up to an attempt budget. The state machine is
//! separate from the async driver so it can be exercised without a runtime.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use phq9_core::models::{EntityId, EntityKey};
use phq9_host::EntityDirectory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    /// 30 attempts, 10 seconds apart.
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_attempts: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryState {
    /// Lookup number `attempt` (one-based) is due.
    Searching { attempt: u32 },
    /// Everything resolved. Terminal.
    Subscribed,
    /// Budget exhausted. Terminal.
    GaveUp { attempts: u32 },
}

impl DiscoveryState {
    pub fn start() -> Self {
        Self::Searching { attempt: 1 }
    }

    /// Transition after a lookup. At least one lookup always happens, even
    /// with a zero budget.
    pub fn advance(self, found_all: bool, policy: &RetryPolicy) -> Self {
        match self {
            Self::Searching { .. } if found_all => Self::Subscribed,
            Self::Searching { attempt } if attempt >= policy.max_attempts => {
                Self::GaveUp { attempts: attempt }
            }
            Self::Searching { attempt } => Self::Searching {
                attempt: attempt + 1,
            },
            terminal => terminal,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Searching { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// Handles in the same order as the requested keys.
    Found(Vec<EntityId>),
    GaveUp { attempts: u32 },
    Cancelled,
}

/// Resolve every key, or `None` if any is missing.
pub async fn resolve_all(directory: &dyn EntityDirectory, keys: &[EntityKey]) -> Option<Vec<EntityId>> {
    let mut ids = Vec::with_capacity(keys.len());
    for key in keys {
        match directory.resolve(key).await {
            Some(id) => ids.push(id),
            None => {
                tracing::trace!(key = %key, "entity not registered yet");
                return None;
            }
        }
    }
    Some(ids)
}

/// Poll the directory until all `keys` resolve, the budget runs out, or
/// `cancel` fires. No wait follows the final attempt.
pub async fn discover(
    directory: &dyn EntityDirectory,
    keys: &[EntityKey],
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> DiscoveryOutcome {
    let mut state = DiscoveryState::start();
    loop {
        if cancel.is_cancelled() {
            return DiscoveryOutcome::Cancelled;
        }

        let found = resolve_all(directory, keys).await;
        state = state.advance(found.is_some(), policy);
        if let Some(ids) = found {
            return DiscoveryOutcome::Found(ids);
        }
        if let DiscoveryState::GaveUp { attempts } = state {
            return DiscoveryOutcome::GaveUp { attempts };
        }
        tracing::debug!(?state, keys = keys.len(), "entities missing, retrying");

        tokio::select! {
            _ = cancel.cancelled() => return DiscoveryOutcome::Cancelled,
            _ = tokio::time::sleep(policy.interval) => {}
        }
    }
}
