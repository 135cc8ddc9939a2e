use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use phq9_core::models::SubjectId;
use phq9_host::{HostContext, IdentityEvent};

use crate::clock::{Clock, SystemClock};
use crate::config::Phq9Config;
use crate::discovery::RetryPolicy;
use crate::subject::SubjectPipeline;

/// The loaded integration: one pipeline per known person, rebuilt from
/// scratch whenever a person is registered or removed.
pub struct Phq9Integration {
    cancel: CancellationToken,
    supervisor: JoinHandle<()>,
    loaded: watch::Receiver<Vec<SubjectId>>,
}

struct Runtime {
    host: HostContext,
    policy: RetryPolicy,
    clock: Arc<dyn Clock>,
    cancel: CancellationToken,
}

impl Runtime {
    /// Start a pipeline for every current subject. A subject whose entities
    /// cannot be registered is skipped.
    async fn load(&self) -> Vec<SubjectPipeline> {
        let subjects = self.host.identities.subjects().await;
        let mut pipelines = Vec::with_capacity(subjects.len());
        for subject in subjects {
            let id = subject.id.clone();
            match SubjectPipeline::start(
                subject,
                self.host.clone(),
                self.policy,
                self.clock.clone(),
                &self.cancel,
            )
            .await
            {
                Ok(pipeline) => pipelines.push(pipeline),
                Err(e) => tracing::error!(subject = %id, error = %e, "failed to start pipeline"),
            }
        }
        tracing::info!(subjects = pipelines.len(), "integration loaded");
        pipelines
    }
}

async fn teardown(pipelines: Vec<SubjectPipeline>) {
    for pipeline in pipelines {
        pipeline.shutdown().await;
    }
}

fn loaded_ids(pipelines: &[SubjectPipeline]) -> Vec<SubjectId> {
    pipelines.iter().map(|p| p.subject().id.clone()).collect()
}

/// Swallow events already queued behind the one being handled; a single
/// reload covers them all.
fn drain(events: &mut broadcast::Receiver<IdentityEvent>) -> usize {
    let mut drained = 0;
    loop {
        match events.try_recv() {
            Ok(_) | Err(TryRecvError::Lagged(_)) => drained += 1,
            Err(TryRecvError::Empty | TryRecvError::Closed) => return drained,
        }
    }
}

async fn supervise(
    runtime: Runtime,
    mut events: broadcast::Receiver<IdentityEvent>,
    mut pipelines: Vec<SubjectPipeline>,
    loaded: watch::Sender<Vec<SubjectId>>,
) {
    loop {
        tokio::select! {
            biased;
            _ = runtime.cancel.cancelled() => break,
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        tracing::info!(?event, "person registry changed, reloading");
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "missed person registry events, reloading");
                    }
                    Err(RecvError::Closed) => {
                        tracing::debug!("person registry events closed");
                        runtime.cancel.cancelled().await;
                        break;
                    }
                }
                let coalesced = drain(&mut events);
                if coalesced > 0 {
                    tracing::debug!(coalesced, "coalesced queued registry events");
                }

                teardown(std::mem::take(&mut pipelines)).await;
                pipelines = runtime.load().await;
                loaded.send_replace(loaded_ids(&pipelines));
            }
        }
    }

    teardown(pipelines).await;
    loaded.send_replace(Vec::new());
    tracing::info!("integration unloaded");
}

impl Phq9Integration {
    pub async fn setup(host: HostContext, config: &Phq9Config) -> Self {
        Self::setup_with_clock(host, config, Arc::new(SystemClock)).await
    }

    /// Load every subject's pipeline, then keep watching the person
    /// registry. Entities exist by the time this returns; sensors may still
    /// be discovering.
    pub async fn setup_with_clock(
        host: HostContext,
        config: &Phq9Config,
        clock: Arc<dyn Clock>,
    ) -> Self {
        // Subscribe before the first load so no registration is missed.
        let events = host.identities.events();
        let cancel = CancellationToken::new();
        let runtime = Runtime {
            host,
            policy: config.retry_policy(),
            clock,
            cancel: cancel.clone(),
        };

        let pipelines = runtime.load().await;
        let (loaded_tx, loaded) = watch::channel(loaded_ids(&pipelines));
        let supervisor = tokio::spawn(supervise(runtime, events, pipelines, loaded_tx));

        Self {
            cancel,
            supervisor,
            loaded,
        }
    }

    /// Subjects with a running pipeline. Changes after every reload.
    pub fn loaded(&self) -> watch::Receiver<Vec<SubjectId>> {
        self.loaded.clone()
    }

    pub fn subjects(&self) -> Vec<SubjectId> {
        self.loaded.borrow().clone()
    }

    /// Stop every pipeline and remove their entities.
    pub async fn unload(self) {
        self.cancel.cancel();
        if let Err(e) = self.supervisor.await {
            tracing::warn!(error = %e, "integration supervisor failed");
        }
    }
}
