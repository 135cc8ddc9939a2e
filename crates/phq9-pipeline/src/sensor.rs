use std::future::Future;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use phq9_core::models::{EntityId, EntityKey, SensorKind, SubjectId};
use phq9_host::{HostContext, StateChanged};

use crate::discovery::{self, DiscoveryOutcome, RetryPolicy};
use crate::error::PipelineError;

/// A value derived from other entities' state.
///
/// The runner discovers `watched_keys`, subscribes once, and then feeds every
/// notification through `update` from a single task, so updates for one
/// sensor never overlap.
pub trait DerivedSensor: Send + 'static {
    fn kind(&self) -> SensorKind;

    fn subject(&self) -> &SubjectId;

    /// Keys that must all resolve before the sensor listens.
    fn watched_keys(&self) -> Vec<EntityKey>;

    /// Run `update` once with no change right after subscribing.
    fn refresh_on_subscribe(&self) -> bool {
        true
    }

    /// `watched` holds the resolved handles in `watched_keys` order.
    /// `change` is `None` for the post-subscribe refresh.
    fn update(
        &mut self,
        watched: &[EntityId],
        change: Option<&StateChanged>,
    ) -> impl Future<Output = Result<(), PipelineError>> + Send;
}

/// Why a sensor task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorExit {
    /// Was listening, then stopped by cancellation or a closed feed.
    Stopped,
    /// Discovery budget exhausted; never listened.
    GaveUp,
    /// Cancelled while still discovering.
    Cancelled,
}

/// Drive one sensor until `cancel` fires.
///
/// Update failures are logged and absorbed: a failed write leaves the
/// previous value in place and the sensor keeps listening.
pub async fn run_sensor<S: DerivedSensor>(
    mut sensor: S,
    host: HostContext,
    policy: RetryPolicy,
    cancel: CancellationToken,
) -> SensorExit {
    let kind = sensor.kind();
    let subject = sensor.subject().clone();
    let keys = sensor.watched_keys();

    let watched =
        match discovery::discover(host.directory.as_ref(), &keys, &policy, &cancel).await {
            DiscoveryOutcome::Found(ids) => ids,
            DiscoveryOutcome::GaveUp { attempts } => {
                tracing::error!(
                    subject = %subject,
                    sensor = %kind,
                    attempts,
                    expected = keys.len(),
                    "could not find all input entities after retrying, sensor stays inert"
                );
                return SensorExit::GaveUp;
            }
            DiscoveryOutcome::Cancelled => {
                tracing::debug!(subject = %subject, sensor = %kind, "discovery cancelled");
                return SensorExit::Cancelled;
            }
        };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut subscription = host.states.subscribe(&watched, tx);
    tracing::debug!(subject = %subject, sensor = %kind, watched = watched.len(), "sensor subscribed");

    if sensor.refresh_on_subscribe() {
        apply(&mut sensor, &watched, None).await;
    }

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            change = rx.recv() => match change {
                Some(change) => apply(&mut sensor, &watched, Some(&change)).await,
                None => break,
            },
        }
    }

    subscription.unsubscribe();
    tracing::debug!(subject = %subject, sensor = %kind, "sensor stopped");
    SensorExit::Stopped
}

async fn apply<S: DerivedSensor>(sensor: &mut S, watched: &[EntityId], change: Option<&StateChanged>) {
    if let Err(e) = sensor.update(watched, change).await {
        tracing::warn!(
            subject = %sensor.subject(),
            sensor = %sensor.kind(),
            error = %e,
            "sensor update failed"
        );
    }
}
