use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Host platform an entity belongs to.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Writable input with a fixed option list.
    Select,
    /// Read-only derived value.
    Sensor,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Sensor => "sensor",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deterministic registry key: what the directory is asked to resolve.
///
/// Two entities on different platforms may share a unique id, so the
/// platform is part of the key.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct EntityKey {
    pub platform: Platform,
    pub unique_id: String,
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.platform, self.unique_id)
    }
}

/// Live handle assigned by the host, e.g. `select.phq9_1234_q1`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One-based PHQ-9 item number.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct QuestionNumber(u8);

impl QuestionNumber {
    pub const COUNT: usize = 9;

    pub fn new(n: u8) -> Result<Self, CoreError> {
        if (1..=Self::COUNT as u8).contains(&n) {
            Ok(Self(n))
        } else {
            Err(CoreError::InvalidQuestionNumber(n))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position in the item list.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=Self::COUNT as u8).map(Self)
    }
}

impl TryFrom<u8> for QuestionNumber {
    type Error = CoreError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<QuestionNumber> for u8 {
    fn from(n: QuestionNumber) -> u8 {
        n.0
    }
}

impl fmt::Display for QuestionNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ten writable inputs per subject.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputRole {
    Question(QuestionNumber),
    Difficulty,
}

impl InputRole {
    pub fn all() -> impl Iterator<Item = Self> {
        QuestionNumber::all()
            .map(Self::Question)
            .chain(std::iter::once(Self::Difficulty))
    }
}

impl fmt::Display for InputRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Question(n) => write!(f, "question {n}"),
            Self::Difficulty => f.write_str("difficulty"),
        }
    }
}

/// The three read-only derived values per subject.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    TotalScore,
    ScoreInterpretation,
    LastEvaluated,
}

impl SensorKind {
    pub const ALL: [Self; 3] = [Self::TotalScore, Self::ScoreInterpretation, Self::LastEvaluated];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TotalScore => "total_score",
            Self::ScoreInterpretation => "score_interpretation",
            Self::LastEvaluated => "last_evaluated",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the host needs to create one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub key: EntityKey,
    /// Suggested object id; the host forms `{platform}.{object_id}` from it.
    pub object_id: String,
    pub name: String,
    /// Allowed values for select entities. Empty for sensors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub initial_state: Option<String>,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}
