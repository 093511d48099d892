use super::database::ping_database;
use super::filter::{ExampleFilter, FilterValue, Operator};
use super::metrics::record_store_operation;
use super::{Page, RepositoryError};
use crate::models::example::timestamp_now;
use crate::models::{Example, ExampleId, ExampleUpdate, NewExample};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

pub const EXAMPLES_COLLECTION: &str = "examples";

/// Persistence contract for examples.
///
/// Every call is a single attempt against the store. Implementations must be
/// safe to share across concurrent requests.
#[async_trait]
pub trait ExampleRepository: Send + Sync {
    /// Insert a new example. `created_at` and `updated_at` are both set to
    /// the same current instant; the identifier is assigned on insert.
    async fn create(&self, example: NewExample) -> Result<Example, RepositoryError>;

    async fn find_by_id(&self, id: &ExampleId) -> Result<Example, RepositoryError>;

    /// Every stored example. An empty collection yields an empty vector.
    async fn find_all(&self) -> Result<Vec<Example>, RepositoryError>;

    async fn find_with_filter(
        &self,
        filter: &ExampleFilter,
    ) -> Result<Vec<Example>, RepositoryError>;

    /// One page of examples, newest `created_at` first. Ties are broken by
    /// identifier, also descending.
    async fn find_paginated(&self, page: Page) -> Result<Vec<Example>, RepositoryError>;

    /// Replace the mutable fields and move `updated_at` to now.
    async fn update(
        &self,
        id: &ExampleId,
        update: ExampleUpdate,
    ) -> Result<Example, RepositoryError>;

    async fn delete(&self, id: &ExampleId) -> Result<(), RepositoryError>;

    async fn health_check(&self) -> Result<(), RepositoryError>;
}

/// Insert shape: everything but the identifier, which the store assigns.
#[derive(Serialize)]
struct ExampleRecord {
    name: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct MongoExampleRepository {
    db: Database,
    collection: Collection<Example>,
    timeout: Duration,
}

impl MongoExampleRepository {
    pub fn new(db: &Database, timeout: Duration) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection(EXAMPLES_COLLECTION),
            timeout,
        }
    }

    /// Create the descending `created_at` index that backs pagination.
    pub async fn init_indexes(&self) -> Result<(), RepositoryError> {
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.bounded(
            "create_index",
            self.collection.create_index(created_at_index, None),
        )
        .await
        .map_err(RepositoryError::StoreWrite)?;

        tracing::info!("Created index on {}.created_at", EXAMPLES_COLLECTION);
        Ok(())
    }

    /// Await a store call within the repository's timeout and count it.
    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, anyhow::Error>
    where
        F: Future<Output = mongodb::error::Result<T>> + Send,
    {
        let result = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(anyhow::Error::new(e)),
            Err(_) => Err(anyhow::anyhow!(
                "{} timed out after {:?}",
                operation,
                self.timeout
            )),
        };

        match &result {
            Ok(_) => record_store_operation(operation, "ok"),
            Err(e) => {
                record_store_operation(operation, "error");
                tracing::error!(operation, error = %e, "Store operation failed");
            }
        }

        result
    }

    async fn find_many(
        &self,
        operation: &'static str,
        filter: Document,
        options: Option<FindOptions>,
    ) -> Result<Vec<Example>, RepositoryError> {
        self.bounded(operation, async {
            let cursor = self.collection.find(filter, options).await?;
            cursor.try_collect::<Vec<Example>>().await
        })
        .await
        .map_err(RepositoryError::StoreRead)
    }
}

/// Translate an abstract filter into a MongoDB query document.
pub fn filter_to_document(filter: &ExampleFilter) -> Document {
    if filter.is_empty() {
        return Document::new();
    }

    let clauses: Vec<Bson> = filter
        .conditions()
        .iter()
        .map(|condition| {
            let operator = match condition.operator {
                Operator::Eq => "$eq",
                Operator::Ne => "$ne",
                Operator::Gt => "$gt",
                Operator::Gte => "$gte",
                Operator::Lt => "$lt",
                Operator::Lte => "$lte",
            };
            let value = match &condition.value {
                FilterValue::Id(id) => Bson::ObjectId(id.as_object_id()),
                FilterValue::Text(text) => Bson::String(text.clone()),
                FilterValue::Timestamp(ts) => Bson::DateTime(bson::DateTime::from_chrono(*ts)),
            };
            let mut predicate = Document::new();
            predicate.insert(operator, value);
            let mut clause = Document::new();
            clause.insert(condition.field.store_key(), predicate);
            Bson::Document(clause)
        })
        .collect();

    doc! { "$and": clauses }
}

#[async_trait]
impl ExampleRepository for MongoExampleRepository {
    async fn create(&self, example: NewExample) -> Result<Example, RepositoryError> {
        let now = timestamp_now();
        let record = ExampleRecord {
            name: example.name,
            created_at: now,
            updated_at: now,
        };

        let result = self
            .bounded(
                "insert_one",
                self.collection
                    .clone_with_type::<ExampleRecord>()
                    .insert_one(&record, None),
            )
            .await
            .map_err(RepositoryError::StoreWrite)?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            RepositoryError::StoreWrite(anyhow::anyhow!(
                "store assigned a non-ObjectId identifier: {}",
                result.inserted_id
            ))
        })?;

        tracing::info!(example_id = %id, "Inserted example");

        Ok(Example {
            id: id.into(),
            name: record.name,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    async fn find_by_id(&self, id: &ExampleId) -> Result<Example, RepositoryError> {
        self.bounded(
            "find_one",
            self.collection
                .find_one(doc! { "_id": id.as_object_id() }, None),
        )
        .await
        .map_err(RepositoryError::StoreRead)?
        .ok_or(RepositoryError::NotFound(*id))
    }

    async fn find_all(&self) -> Result<Vec<Example>, RepositoryError> {
        self.find_many("find_all", Document::new(), None).await
    }

    async fn find_with_filter(
        &self,
        filter: &ExampleFilter,
    ) -> Result<Vec<Example>, RepositoryError> {
        self.find_many("find_with_filter", filter_to_document(filter), None)
            .await
    }

    async fn find_paginated(&self, page: Page) -> Result<Vec<Example>, RepositoryError> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1, "_id": -1 })
            .skip(page.skip())
            .limit(page.limit() as i64)
            .build();

        self.find_many("find_paginated", Document::new(), Some(options))
            .await
    }

    async fn update(
        &self,
        id: &ExampleId,
        update: ExampleUpdate,
    ) -> Result<Example, RepositoryError> {
        let changes = doc! {
            "$set": {
                "name": update.name,
                "updated_at": bson::DateTime::from_chrono(timestamp_now()),
            }
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.bounded(
            "find_one_and_update",
            self.collection
                .find_one_and_update(doc! { "_id": id.as_object_id() }, changes, options),
        )
        .await
        .map_err(RepositoryError::StoreWrite)?
        .ok_or(RepositoryError::NotFound(*id))
    }

    async fn delete(&self, id: &ExampleId) -> Result<(), RepositoryError> {
        let result = self
            .bounded(
                "delete_one",
                self.collection
                    .delete_one(doc! { "_id": id.as_object_id() }, None),
            )
            .await
            .map_err(RepositoryError::StoreWrite)?;

        if result.deleted_count == 0 {
            return Err(RepositoryError::NotFound(*id));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        ping_database(&self.db, self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::filter::ExampleField;
    use mongodb::Client;

    #[test]
    fn empty_filter_is_empty_document() {
        assert_eq!(filter_to_document(&ExampleFilter::new()), Document::new());
    }

    #[test]
    fn filter_translates_to_and_of_operator_clauses() {
        let id = ExampleId::parse("65a1b2c3d4e5f60718293a4b").unwrap();
        let filter = ExampleFilter::name_equals("widget")
            .and(ExampleField::Id, Operator::Ne, id)
            .unwrap();

        let expected = doc! {
            "$and": [
                { "name": { "$eq": "widget" } },
                { "_id": { "$ne": id.as_object_id() } },
            ]
        };
        assert_eq!(filter_to_document(&filter), expected);
    }

    #[test]
    fn timestamp_filter_uses_store_dates() {
        let ts = timestamp_now();
        let filter = ExampleFilter::new()
            .and(ExampleField::CreatedAt, Operator::Gte, ts)
            .unwrap();

        let expected = doc! {
            "$and": [
                { "created_at": { "$gte": bson::DateTime::from_chrono(ts) } },
            ]
        };
        assert_eq!(filter_to_document(&filter), expected);
    }

    // Client construction is lazy, so this never touches the network.
    #[tokio::test]
    async fn find_with_unreachable_store_times_out_as_read_error() {
        let client = Client::with_uri_str("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200")
            .await
            .unwrap();
        let repo = MongoExampleRepository::new(
            &client.database("example_test"),
            Duration::from_millis(100),
        );

        let result = repo.find_all().await;
        assert!(matches!(result, Err(RepositoryError::StoreRead(_))));
    }
}
