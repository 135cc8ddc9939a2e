use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Frequency response to one of the nine PHQ-9 items.
///
/// Ordinal: the discriminant is the item weight that feeds the total score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionAnswer {
    #[default]
    NotAtAll = 0,
    SeveralDays = 1,
    MoreThanHalfTheDays = 2,
    NearlyEveryDay = 3,
}

impl QuestionAnswer {
    pub const ALL: [Self; 4] = [
        Self::NotAtAll,
        Self::SeveralDays,
        Self::MoreThanHalfTheDays,
        Self::NearlyEveryDay,
    ];

    pub fn weight(self) -> u8 {
        self as u8
    }

    /// Canonical state value written to the host.
    pub fn key(self) -> &'static str {
        match self {
            Self::NotAtAll => "not_at_all",
            Self::SeveralDays => "several_days",
            Self::MoreThanHalfTheDays => "more_than_half_the_days",
            Self::NearlyEveryDay => "nearly_every_day",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NotAtAll => "Not at all",
            Self::SeveralDays => "Several days",
            Self::MoreThanHalfTheDays => "More than half the days",
            Self::NearlyEveryDay => "Nearly every day",
        }
    }

    /// Parse a host state value. Accepts the canonical key or the English
    /// display label.
    pub fn from_state(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.key() == raw || a.label().eq_ignore_ascii_case(raw))
    }

    /// Weight of a raw state value. Missing or unrecognised values weigh 0.
    pub fn weight_of(raw: Option<&str>) -> u8 {
        raw.and_then(Self::from_state).map_or(0, Self::weight)
    }

    pub fn keys() -> Vec<String> {
        Self::ALL.iter().map(|a| a.key().to_string()).collect()
    }
}

impl fmt::Display for QuestionAnswer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for QuestionAnswer {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_state(s).ok_or_else(|| CoreError::UnknownAnswer {
            input: "question".to_string(),
            value: s.to_string(),
        })
    }
}

/// Response to the functional-impairment follow-up. Tracked for recency,
/// never scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyAnswer {
    #[default]
    NotDifficultAtAll,
    SomewhatDifficult,
    VeryDifficult,
    ExtremelyDifficult,
}

impl DifficultyAnswer {
    pub const ALL: [Self; 4] = [
        Self::NotDifficultAtAll,
        Self::SomewhatDifficult,
        Self::VeryDifficult,
        Self::ExtremelyDifficult,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::NotDifficultAtAll => "not_difficult_at_all",
            Self::SomewhatDifficult => "somewhat_difficult",
            Self::VeryDifficult => "very_difficult",
            Self::ExtremelyDifficult => "extremely_difficult",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NotDifficultAtAll => "Not difficult at all",
            Self::SomewhatDifficult => "Somewhat difficult",
            Self::VeryDifficult => "Very difficult",
            Self::ExtremelyDifficult => "Extremely difficult",
        }
    }

    pub fn from_state(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.key() == raw || a.label().eq_ignore_ascii_case(raw))
    }

    pub fn keys() -> Vec<String> {
        Self::ALL.iter().map(|a| a.key().to_string()).collect()
    }
}

impl fmt::Display for DifficultyAnswer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DifficultyAnswer {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_state(s).ok_or_else(|| CoreError::UnknownAnswer {
            input: "difficulty".to_string(),
            value: s.to_string(),
        })
    }
}
