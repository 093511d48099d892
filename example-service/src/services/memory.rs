use super::filter::ExampleFilter;
use super::repository::ExampleRepository;
use super::{Page, RepositoryError};
use crate::models::example::timestamp_now;
use crate::models::{Example, ExampleId, ExampleUpdate, NewExample};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

/// Process-local repository with the same contract as the MongoDB one.
///
/// Used where a running store is unavailable, mainly router and service tests.
#[derive(Default)]
pub struct InMemoryExampleRepository {
    examples: Mutex<Vec<Example>>,
}

impl InMemoryExampleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Example>>, RepositoryError> {
        self.examples
            .lock()
            .map_err(|e| RepositoryError::StoreRead(anyhow::anyhow!("In-memory store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl ExampleRepository for InMemoryExampleRepository {
    async fn create(&self, example: NewExample) -> Result<Example, RepositoryError> {
        let now = timestamp_now();
        let example = Example {
            id: ExampleId::generate(),
            name: example.name,
            created_at: now,
            updated_at: now,
        };
        self.lock()?.push(example.clone());
        Ok(example)
    }

    async fn find_by_id(&self, id: &ExampleId) -> Result<Example, RepositoryError> {
        self.lock()?
            .iter()
            .find(|e| e.id == *id)
            .cloned()
            .ok_or(RepositoryError::NotFound(*id))
    }

    async fn find_all(&self) -> Result<Vec<Example>, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    async fn find_with_filter(
        &self,
        filter: &ExampleFilter,
    ) -> Result<Vec<Example>, RepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    async fn find_paginated(&self, page: Page) -> Result<Vec<Example>, RepositoryError> {
        let mut examples = self.lock()?.clone();
        examples.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(examples
            .into_iter()
            .skip(usize::try_from(page.skip()).unwrap_or(usize::MAX))
            .take(page.limit() as usize)
            .collect())
    }

    async fn update(
        &self,
        id: &ExampleId,
        update: ExampleUpdate,
    ) -> Result<Example, RepositoryError> {
        let mut examples = self.lock()?;
        let example = examples
            .iter_mut()
            .find(|e| e.id == *id)
            .ok_or(RepositoryError::NotFound(*id))?;

        example.name = update.name;
        example.updated_at = timestamp_now().max(example.created_at);
        Ok(example.clone())
    }

    async fn delete(&self, id: &ExampleId) -> Result<(), RepositoryError> {
        let mut examples = self.lock()?;
        let before = examples.len();
        examples.retain(|e| e.id != *id);

        if examples.len() == before {
            return Err(RepositoryError::NotFound(*id));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        self.lock().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn seed(repo: &InMemoryExampleRepository, names: &[&str]) -> Vec<Example> {
        let mut created = Vec::new();
        for name in names {
            created.push(
                repo.create(NewExample {
                    name: name.to_string(),
                })
                .await
                .unwrap(),
            );
            // Strictly increasing creation times.
            tokio::time::sleep(Duration::from_millis(3)).await;
        }
        created
    }

    fn names(examples: &[Example]) -> Vec<&str> {
        examples.iter().map(|e| e.name.as_str()).collect()
    }

    #[tokio::test]
    async fn create_stamps_equal_timestamps() {
        let repo = InMemoryExampleRepository::new();
        let before = timestamp_now();

        let created = repo
            .create(NewExample {
                name: "widget".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(created.created_at, created.updated_at);
        assert!(created.created_at >= before);
        assert!(created.created_at <= timestamp_now());
        assert_eq!(created.id.to_hex().len(), 24);
    }

    #[tokio::test]
    async fn find_by_id_round_trips() {
        let repo = InMemoryExampleRepository::new();
        let created = seed(&repo, &["widget"]).await.remove(0);

        assert_eq!(repo.find_by_id(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn find_by_id_missing_is_not_found() {
        let repo = InMemoryExampleRepository::new();
        let absent = ExampleId::parse("000000000000000000000000").unwrap();

        assert!(matches!(
            repo.find_by_id(&absent).await,
            Err(RepositoryError::NotFound(id)) if id == absent
        ));
    }

    #[tokio::test]
    async fn find_all_on_empty_store_is_empty() {
        let repo = InMemoryExampleRepository::new();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn pages_are_newest_first_without_gaps() {
        let repo = InMemoryExampleRepository::new();
        seed(&repo, &["A", "B", "C", "D", "E"]).await;

        let first = repo.find_paginated(Page::new(1, 2).unwrap()).await.unwrap();
        let second = repo.find_paginated(Page::new(2, 2).unwrap()).await.unwrap();
        let third = repo.find_paginated(Page::new(3, 2).unwrap()).await.unwrap();
        let beyond = repo.find_paginated(Page::new(4, 2).unwrap()).await.unwrap();

        assert_eq!(names(&first), ["E", "D"]);
        assert_eq!(names(&second), ["C", "B"]);
        assert_eq!(names(&third), ["A"]);
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn filter_selects_matching_examples() {
        let repo = InMemoryExampleRepository::new();
        seed(&repo, &["widget", "gadget", "widget"]).await;

        let found = repo
            .find_with_filter(&ExampleFilter::name_equals("widget"))
            .await
            .unwrap();
        assert_eq!(names(&found), ["widget", "widget"]);
    }

    #[tokio::test]
    async fn update_moves_updated_at_forward() {
        let repo = InMemoryExampleRepository::new();
        let created = seed(&repo, &["widget"]).await.remove(0);

        let updated = repo
            .update(
                &created.id,
                ExampleUpdate {
                    name: "sprocket".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "sprocket");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn delete_removes_and_reports_missing() {
        let repo = InMemoryExampleRepository::new();
        let created = seed(&repo, &["widget"]).await.remove(0);

        repo.delete(&created.id).await.unwrap();
        assert!(matches!(
            repo.find_by_id(&created.id).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete(&created.id).await,
            Err(RepositoryError::NotFound(_))
        ));
    }
}
