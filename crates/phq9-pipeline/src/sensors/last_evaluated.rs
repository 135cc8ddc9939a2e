use std::sync::Arc;

use phq9_core::keys;
use phq9_core::models::{EntityId, EntityKey, SensorKind, SubjectId};
use phq9_host::{StateChanged, StateStore};

use crate::clock::Clock;
use crate::error::PipelineError;
use crate::sensor::DerivedSensor;

/// When any of the ten inputs last changed value.
pub struct LastEvaluatedSensor {
    subject: SubjectId,
    output: EntityId,
    states: Arc<dyn StateStore>,
    clock: Arc<dyn Clock>,
}

impl LastEvaluatedSensor {
    pub fn new(
        subject: SubjectId,
        output: EntityId,
        states: Arc<dyn StateStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            subject,
            output,
            states,
            clock,
        }
    }
}

impl DerivedSensor for LastEvaluatedSensor {
    fn kind(&self) -> SensorKind {
        SensorKind::LastEvaluated
    }

    fn subject(&self) -> &SubjectId {
        &self.subject
    }

    fn watched_keys(&self) -> Vec<EntityKey> {
        keys::input_keys(&self.subject)
    }

    fn refresh_on_subscribe(&self) -> bool {
        false
    }

    async fn update(
        &mut self,
        _watched: &[EntityId],
        change: Option<&StateChanged>,
    ) -> Result<(), PipelineError> {
        // Stamp only real transitions; a missing old or new value is not one.
        if let Some(change) = change
            && change.is_transition()
        {
            let now = self.clock.now();
            self.states.set(&self.output, Some(now.to_string())).await?;
            tracing::debug!(
                subject = %self.subject,
                entity = %change.entity_id,
                at = %now,
                "input changed"
            );
        }
        Ok(())
    }
}
