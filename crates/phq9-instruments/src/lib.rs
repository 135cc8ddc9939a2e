//! phq9-instruments
//!
//! Screening instrument definitions. Pure data and pure functions, no host
//! dependency. Defines the items, scoring and severity interpretation of
//! each supported instrument.

pub mod error;
pub mod instruments;
pub mod scoring;

use phq9_core::models::{QuestionAnswer, SeverityBand};

use error::InstrumentError;
use scoring::{Item, ScoreRange, SeverityRange, TotalScore};

pub use instruments::phq9::Phq9;

/// Trait implemented by each screening instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "phq9").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "PHQ-9").
    fn name(&self) -> &str;

    /// The scored items, in order.
    fn items(&self) -> &[Item];

    /// Range the total score can take when every item is answered.
    fn score_range(&self) -> ScoreRange;

    /// Severity rows, lowest first. Need not cover the top of the range.
    fn severity_table(&self) -> &[SeverityRange];

    /// Band for any score the table does not claim.
    fn top_band(&self) -> SeverityBand;

    /// Sum one answer per item. Unanswered items count as 0.
    fn score(&self, answers: &[Option<QuestionAnswer>]) -> Result<TotalScore, InstrumentError> {
        if answers.len() != self.items().len() {
            return Err(InstrumentError::AnswerCount {
                instrument: self.name().to_string(),
                expected: self.items().len(),
                actual: answers.len(),
            });
        }
        Ok(scoring::total_score(answers.iter().copied()))
    }

    /// Map a score to its band. Total over `i64`: out-of-range scores are
    /// not rejected.
    fn interpret(&self, score: i64) -> SeverityBand {
        scoring::classify(self.severity_table(), self.top_band(), score)
    }

    /// Interpret a raw host state value.
    ///
    /// `None` when there is no value at all; `Unknown` when the value is not
    /// an integer.
    fn interpret_state(&self, raw: Option<&str>) -> Option<SeverityBand> {
        let raw = raw?;
        Some(match raw.trim().parse::<i64>() {
            Ok(score) => self.interpret(score),
            Err(_) => SeverityBand::Unknown,
        })
    }
}
