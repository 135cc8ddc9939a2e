use std::sync::Arc;

use phq9_core::keys;
use phq9_core::models::{EntityId, EntityKey, SensorKind, SubjectId};
use phq9_host::{StateChanged, StateStore};
use phq9_instruments::scoring::{self, TotalScore};

use crate::error::PipelineError;
use crate::sensor::DerivedSensor;

/// Sum of the nine item weights.
///
/// Every update re-reads all nine inputs rather than applying the change as
/// a delta, so missed or reordered notifications cannot skew the total.
pub struct TotalScoreSensor {
    subject: SubjectId,
    output: EntityId,
    states: Arc<dyn StateStore>,
}

impl TotalScoreSensor {
    pub fn new(subject: SubjectId, output: EntityId, states: Arc<dyn StateStore>) -> Self {
        Self {
            subject,
            output,
            states,
        }
    }

    /// Current total from host state.
    pub async fn compute(states: &dyn StateStore, questions: &[EntityId]) -> TotalScore {
        let mut values = Vec::with_capacity(questions.len());
        for id in questions {
            values.push(states.get(id).await);
        }
        scoring::total_score_of_states(values.iter().map(Option::as_deref))
    }
}

impl DerivedSensor for TotalScoreSensor {
    fn kind(&self) -> SensorKind {
        SensorKind::TotalScore
    }

    fn subject(&self) -> &SubjectId {
        &self.subject
    }

    fn watched_keys(&self) -> Vec<EntityKey> {
        keys::question_keys(&self.subject)
    }

    async fn update(
        &mut self,
        watched: &[EntityId],
        _change: Option<&StateChanged>,
    ) -> Result<(), PipelineError> {
        let score = Self::compute(self.states.as_ref(), watched).await;
        self.states.set(&self.output, Some(score.to_string())).await?;
        tracing::debug!(subject = %self.subject, score = score.value(), "total score updated");
        Ok(())
    }
}
