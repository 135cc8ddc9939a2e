use std::fmt;

use serde::{Deserialize, Serialize};

use phq9_core::models::{QuestionAnswer, SeverityBand};

/// Inclusive integer score range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: u8,
    pub max: u8,
}

impl ScoreRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        i64::from(self.min) <= value && value <= i64::from(self.max)
    }
}

/// Sum of the item weights. Never negative, never above `MAX` when built
/// from nine answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TotalScore(u8);

impl TotalScore {
    pub const MAX: u8 = 27;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for TotalScore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single scored item of an instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub number: u8,
    pub text: String,
}

/// One row of a severity table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeverityRange {
    pub range: ScoreRange,
    pub band: SeverityBand,
}

/// Sum item weights. Missing answers count as 0.
pub fn total_score<I>(answers: I) -> TotalScore
where
    I: IntoIterator<Item = Option<QuestionAnswer>>,
{
    let sum = answers
        .into_iter()
        .map(|a| a.map_or(0u32, |a| u32::from(a.weight())))
        .sum::<u32>();
    TotalScore(u8::try_from(sum).unwrap_or(u8::MAX))
}

/// Sum the weights of raw host state values, treating anything missing or
/// unrecognised as 0.
pub fn total_score_of_states<'a, I>(states: I) -> TotalScore
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    total_score(
        states
            .into_iter()
            .map(|s| s.and_then(QuestionAnswer::from_state)),
    )
}

/// Look a score up in a severity table. Scores no row claims fall through to
/// `fallback`; there is no range validation.
pub fn classify(table: &[SeverityRange], fallback: SeverityBand, score: i64) -> SeverityBand {
    table
        .iter()
        .find(|row| row.range.contains(score))
        .map_or(fallback, |row| row.band)
}
