use std::sync::Arc;

use phq9_core::keys;
use phq9_core::models::{EntityId, EntityKey, SensorKind, SubjectId};
use phq9_host::{StateChanged, StateStore};
use phq9_instruments::{Instrument, Phq9};

use crate::error::PipelineError;
use crate::sensor::DerivedSensor;

/// Severity band of the total score sensor's current value.
///
/// Listens to the total score entity, not to the raw answers.
pub struct ScoreInterpretationSensor {
    subject: SubjectId,
    output: EntityId,
    states: Arc<dyn StateStore>,
}

impl ScoreInterpretationSensor {
    pub fn new(subject: SubjectId, output: EntityId, states: Arc<dyn StateStore>) -> Self {
        Self {
            subject,
            output,
            states,
        }
    }
}

impl DerivedSensor for ScoreInterpretationSensor {
    fn kind(&self) -> SensorKind {
        SensorKind::ScoreInterpretation
    }

    fn subject(&self) -> &SubjectId {
        &self.subject
    }

    fn watched_keys(&self) -> Vec<EntityKey> {
        vec![keys::total_score(&self.subject)]
    }

    async fn update(
        &mut self,
        watched: &[EntityId],
        _change: Option<&StateChanged>,
    ) -> Result<(), PipelineError> {
        let Some(score_id) = watched.first() else {
            return Ok(());
        };
        let raw = self.states.get(score_id).await;
        // No score published yet: keep the current band.
        let Some(band) = Phq9.interpret_state(raw.as_deref()) else {
            return Ok(());
        };
        self.states
            .set(&self.output, Some(band.as_str().to_string()))
            .await?;
        tracing::debug!(subject = %self.subject, band = %band, "score interpretation updated");
        Ok(())
    }
}
