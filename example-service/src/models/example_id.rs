use crate::services::RepositoryError;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a stored example.
///
/// Wraps the store's 12-byte ObjectId; the external form is the 24-character
/// lowercase hex string. Construction from text always goes through
/// [`ExampleId::parse`], so a value of this type is known to be well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExampleId(ObjectId);

impl ExampleId {
    /// Generate a fresh identifier. Only in-process backends need this; the
    /// MongoDB repository takes the id assigned on insert.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn parse(value: &str) -> Result<Self, RepositoryError> {
        ObjectId::parse_str(value)
            .map(Self)
            .map_err(|_| RepositoryError::InvalidId(value.to_string()))
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<ObjectId> for ExampleId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl FromStr for ExampleId {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ExampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}
