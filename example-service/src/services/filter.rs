//! Store-independent query predicates.
//!
//! A filter is a conjunction of `{field, operator, value}` conditions over the
//! example's own fields. Each repository backend translates it into its own
//! query language, so callers never build store-specific documents.

use super::RepositoryError;
use crate::models::example::to_store_precision;
use crate::models::{Example, ExampleId};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleField {
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

impl ExampleField {
    /// Key of the field in the persisted document.
    pub fn store_key(&self) -> &'static str {
        match self {
            ExampleField::Id => "_id",
            ExampleField::Name => "name",
            ExampleField::CreatedAt => "created_at",
            ExampleField::UpdatedAt => "updated_at",
        }
    }

    fn accepts(&self, value: &FilterValue) -> bool {
        matches!(
            (self, value),
            (ExampleField::Id, FilterValue::Id(_))
                | (ExampleField::Name, FilterValue::Text(_))
                | (ExampleField::CreatedAt, FilterValue::Timestamp(_))
                | (ExampleField::UpdatedAt, FilterValue::Timestamp(_))
        )
    }
}

impl fmt::Display for ExampleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExampleField::Id => write!(f, "id"),
            ExampleField::Name => write!(f, "name"),
            ExampleField::CreatedAt => write!(f, "created_at"),
            ExampleField::UpdatedAt => write!(f, "updated_at"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Operator {
    fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Gte => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Lte => ordering != Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Id(ExampleId),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Id(_) => write!(f, "id"),
            FilterValue::Text(_) => write!(f, "text"),
            FilterValue::Timestamp(_) => write!(f, "timestamp"),
        }
    }
}

impl From<ExampleId> for FilterValue {
    fn from(id: ExampleId) -> Self {
        FilterValue::Id(id)
    }
}

impl From<String> for FilterValue {
    fn from(text: String) -> Self {
        FilterValue::Text(text)
    }
}

impl From<&str> for FilterValue {
    fn from(text: &str) -> Self {
        FilterValue::Text(text.to_string())
    }
}

// Timestamps are compared at the precision the store keeps.
impl From<DateTime<Utc>> for FilterValue {
    fn from(ts: DateTime<Utc>) -> Self {
        FilterValue::Timestamp(to_store_precision(ts))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: ExampleField,
    pub operator: Operator,
    pub value: FilterValue,
}

impl Condition {
    fn matches(&self, example: &Example) -> bool {
        let ordering = match (&self.field, &self.value) {
            (ExampleField::Id, FilterValue::Id(v)) => example.id.cmp(v),
            (ExampleField::Name, FilterValue::Text(v)) => example.name.as_str().cmp(v.as_str()),
            (ExampleField::CreatedAt, FilterValue::Timestamp(v)) => example.created_at.cmp(v),
            (ExampleField::UpdatedAt, FilterValue::Timestamp(v)) => example.updated_at.cmp(v),
            // Unreachable through `ExampleFilter::and`, which checks kinds.
            _ => return false,
        };
        self.operator.holds(ordering)
    }
}

/// Conjunction of conditions. The empty filter matches every example.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExampleFilter {
    conditions: Vec<Condition>,
}

impl ExampleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition. Fails when the value kind does not fit the field,
    /// e.g. a timestamp compared against `name`.
    pub fn and(
        mut self,
        field: ExampleField,
        operator: Operator,
        value: impl Into<FilterValue>,
    ) -> Result<Self, RepositoryError> {
        let value = value.into();
        if !field.accepts(&value) {
            return Err(RepositoryError::InvalidFilter(format!(
                "field '{}' cannot be compared with a {} value",
                field, value
            )));
        }
        self.conditions.push(Condition {
            field,
            operator,
            value,
        });
        Ok(self)
    }

    /// Exact match on `name`.
    pub fn name_equals(name: impl Into<String>) -> Self {
        Self {
            conditions: vec![Condition {
                field: ExampleField::Name,
                operator: Operator::Eq,
                value: FilterValue::Text(name.into()),
            }],
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, example: &Example) -> bool {
        self.conditions.iter().all(|c| c.matches(example))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::example::timestamp_now;
    use chrono::Duration;

    fn example(name: &str, created_at: DateTime<Utc>) -> Example {
        Example {
            id: ExampleId::generate(),
            name: name.to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ExampleFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&example("anything", timestamp_now())));
    }

    #[test]
    fn name_equals_matches_exactly() {
        let filter = ExampleFilter::name_equals("widget");
        assert!(filter.matches(&example("widget", timestamp_now())));
        assert!(!filter.matches(&example("Widget", timestamp_now())));
        assert!(!filter.matches(&example("widgets", timestamp_now())));
    }

    #[test]
    fn conditions_are_conjunctive() {
        let now = timestamp_now();
        let filter = ExampleFilter::new()
            .and(ExampleField::CreatedAt, Operator::Gte, now - Duration::hours(1))
            .unwrap()
            .and(ExampleField::CreatedAt, Operator::Lt, now)
            .unwrap();

        assert!(filter.matches(&example("a", now - Duration::minutes(5))));
        assert!(!filter.matches(&example("b", now)));
        assert!(!filter.matches(&example("c", now - Duration::hours(2))));
    }

    #[test]
    fn id_conditions_compare_identifiers() {
        let target = example("a", timestamp_now());
        let other = example("b", timestamp_now());

        let filter = ExampleFilter::new()
            .and(ExampleField::Id, Operator::Ne, target.id)
            .unwrap();
        assert!(!filter.matches(&target));
        assert!(filter.matches(&other));
    }

    #[test]
    fn mismatched_value_kind_is_rejected() {
        let err = ExampleFilter::new()
            .and(ExampleField::Name, Operator::Eq, timestamp_now())
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidFilter(_)));

        let err = ExampleFilter::new()
            .and(ExampleField::CreatedAt, Operator::Gt, "yesterday")
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidFilter(_)));
    }

    #[test]
    fn operators_follow_ordering() {
        assert!(Operator::Gte.holds(Ordering::Equal));
        assert!(Operator::Gte.holds(Ordering::Greater));
        assert!(!Operator::Gt.holds(Ordering::Equal));
        assert!(Operator::Lte.holds(Ordering::Less));
        assert!(!Operator::Lt.holds(Ordering::Greater));
        assert!(Operator::Ne.holds(Ordering::Less));
    }
}
