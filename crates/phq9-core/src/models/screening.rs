use serde::{Deserialize, Serialize};

use super::answer::{DifficultyAnswer, QuestionAnswer};
use super::severity::SeverityBand;
use super::subject::SubjectId;

/// Point-in-time view of one subject's screening, assembled from host state.
///
/// Fields are `None` where the host has no value or the value does not
/// parse; a `None` score means "not yet computed", not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSnapshot {
    pub subject_id: SubjectId,
    pub answers: Vec<Option<QuestionAnswer>>,
    pub difficulty: Option<DifficultyAnswer>,
    pub total_score: Option<u8>,
    pub severity: Option<SeverityBand>,
    pub last_evaluated: Option<jiff::Timestamp>,
}
