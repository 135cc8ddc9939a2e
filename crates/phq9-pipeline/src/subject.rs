use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use phq9_core::keys;
use phq9_core::models::{EntityId, EntityKey, SensorKind, Subject};
use phq9_host::HostContext;

use crate::clock::Clock;
use crate::discovery::RetryPolicy;
use crate::entities;
use crate::error::PipelineError;
use crate::sensor::{self, SensorExit};
use crate::sensors::{LastEvaluatedSensor, ScoreInterpretationSensor, TotalScoreSensor};

/// Everything running for one subject: its thirteen entities and the three
/// sensor tasks that maintain the derived ones.
pub struct SubjectPipeline {
    subject: Subject,
    entities: Vec<EntityId>,
    cancel: CancellationToken,
    tasks: JoinSet<(SensorKind, SensorExit)>,
    host: HostContext,
}

impl SubjectPipeline {
    /// Register the subject's entities, then start its sensors.
    ///
    /// `cancel` is the parent token; the pipeline stops when it fires or on
    /// [`shutdown`](Self::shutdown).
    pub async fn start(
        subject: Subject,
        host: HostContext,
        policy: RetryPolicy,
        clock: Arc<dyn Clock>,
        cancel: &CancellationToken,
    ) -> Result<Self, PipelineError> {
        let descriptors = entities::descriptors(&subject);
        let registered: Vec<EntityKey> = descriptors.iter().map(|d| d.key.clone()).collect();
        let ids = host.platform.add_entities(descriptors).await?;

        let sensor_id = |kind: SensorKind| -> Result<EntityId, PipelineError> {
            let key = keys::sensor(&subject.id, kind);
            registered
                .iter()
                .position(|k| *k == key)
                .and_then(|i| ids.get(i))
                .cloned()
                .ok_or(PipelineError::EntityNotFound(key))
        };
        let score_id = sensor_id(SensorKind::TotalScore)?;
        let interpretation_id = sensor_id(SensorKind::ScoreInterpretation)?;
        let last_evaluated_id = sensor_id(SensorKind::LastEvaluated)?;

        let cancel = cancel.child_token();
        let mut tasks = JoinSet::new();

        let total = TotalScoreSensor::new(subject.id.clone(), score_id, host.states.clone());
        tasks.spawn(label(
            SensorKind::TotalScore,
            sensor::run_sensor(total, host.clone(), policy, cancel.clone()),
        ));

        let interpretation =
            ScoreInterpretationSensor::new(subject.id.clone(), interpretation_id, host.states.clone());
        tasks.spawn(label(
            SensorKind::ScoreInterpretation,
            sensor::run_sensor(interpretation, host.clone(), policy, cancel.clone()),
        ));

        let last_evaluated = LastEvaluatedSensor::new(
            subject.id.clone(),
            last_evaluated_id,
            host.states.clone(),
            clock,
        );
        tasks.spawn(label(
            SensorKind::LastEvaluated,
            sensor::run_sensor(last_evaluated, host.clone(), policy, cancel.clone()),
        ));

        tracing::info!(subject = %subject.id, name = %subject.name, entities = ids.len(), "pipeline started");

        Ok(Self {
            subject,
            entities: ids,
            cancel,
            tasks,
            host,
        })
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Stop the sensors (including any still discovering), wait for them,
    /// then remove the subject's entities from the host.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok((kind, exit)) => {
                    tracing::debug!(subject = %self.subject.id, sensor = %kind, ?exit, "sensor joined");
                }
                Err(e) => {
                    tracing::warn!(subject = %self.subject.id, error = %e, "sensor task failed");
                }
            }
        }

        if let Err(e) = self.host.platform.remove_entities(&self.entities).await {
            tracing::warn!(subject = %self.subject.id, error = %e, "failed to remove entities");
        }
        tracing::info!(subject = %self.subject.id, "pipeline stopped");
    }
}

async fn label<F>(kind: SensorKind, run: F) -> (SensorKind, SensorExit)
where
    F: std::future::Future<Output = SensorExit>,
{
    (kind, run.await)
}
