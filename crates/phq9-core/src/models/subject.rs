use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Stable identifier of a person in the host, e.g. `"1234"`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::EmptySubjectId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person for whom a screening instance exists. Owned by the host's
/// identity provider; this crate only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
}

impl Subject {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, CoreError> {
        Ok(Self {
            id: SubjectId::new(id)?,
            name: name.into(),
        })
    }
}
