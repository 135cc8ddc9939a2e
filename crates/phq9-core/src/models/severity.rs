use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named depression severity category derived from the total score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    #[default]
    NoneMinimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
    /// Sentinel: the score state could not be read as an integer.
    Unknown,
}

impl SeverityBand {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoneMinimal => "none_minimal",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::ModeratelySevere => "moderately_severe",
            Self::Severe => "severe",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityBand {
    type Err = std::convert::Infallible;

    /// Anything that is not a known band name reads as `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "none_minimal" => Self::NoneMinimal,
            "mild" => Self::Mild,
            "moderate" => Self::Moderate,
            "moderately_severe" => Self::ModeratelySevere,
            "severe" => Self::Severe,
            _ => Self::Unknown,
        })
    }
}
