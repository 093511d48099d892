use super::ExampleId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored example document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    #[serde(rename = "_id")]
    pub id: ExampleId,
    pub name: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Fields a caller supplies when creating an example. The identifier and
/// timestamps are assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExample {
    pub name: String,
}

/// Replacement values applied by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleUpdate {
    pub name: String,
}

/// Current time truncated to the store's millisecond precision, so a value
/// returned from a write compares equal to the same value read back.
pub fn timestamp_now() -> DateTime<Utc> {
    mongodb::bson::DateTime::now().to_chrono()
}

/// Truncate an arbitrary instant to the store's precision.
pub fn to_store_precision(value: DateTime<Utc>) -> DateTime<Utc> {
    mongodb::bson::DateTime::from_chrono(value).to_chrono()
}
