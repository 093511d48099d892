//! Orchestration between the HTTP layer and the repository.
//!
//! Today every call is forwarded unchanged; business rules for examples
//! belong here rather than in handlers or repositories.

use super::filter::ExampleFilter;
use super::repository::ExampleRepository;
use super::{Page, RepositoryError};
use crate::models::{Example, ExampleId, ExampleUpdate, NewExample};
use std::sync::Arc;

#[derive(Clone)]
pub struct ExampleService {
    repo: Arc<dyn ExampleRepository>,
}

impl ExampleService {
    pub fn new(repo: Arc<dyn ExampleRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_example(&self, example: NewExample) -> Result<Example, RepositoryError> {
        let created = self.repo.create(example).await?;
        tracing::info!(example_id = %created.id, "Created example");
        Ok(created)
    }

    /// Look up by the external identifier. A malformed id fails before the
    /// store is contacted.
    pub async fn get_example_by_id(&self, id: &str) -> Result<Example, RepositoryError> {
        let id = ExampleId::parse(id)?;
        self.repo.find_by_id(&id).await
    }

    pub async fn get_examples(&self) -> Result<Vec<Example>, RepositoryError> {
        self.repo.find_all().await
    }

    pub async fn get_examples_with_filter(
        &self,
        filter: &ExampleFilter,
    ) -> Result<Vec<Example>, RepositoryError> {
        self.repo.find_with_filter(filter).await
    }

    pub async fn get_examples_page(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<Vec<Example>, RepositoryError> {
        let page = Page::new(page, limit)?;
        tracing::debug!(page = page.number(), limit = page.limit(), "Listing examples page");
        self.repo.find_paginated(page).await
    }

    pub async fn update_example(
        &self,
        id: &str,
        update: ExampleUpdate,
    ) -> Result<Example, RepositoryError> {
        let id = ExampleId::parse(id)?;
        let updated = self.repo.update(&id, update).await?;
        tracing::info!(example_id = %id, "Updated example");
        Ok(updated)
    }

    pub async fn delete_example(&self, id: &str) -> Result<(), RepositoryError> {
        let id = ExampleId::parse(id)?;
        self.repo.delete(&id).await?;
        tracing::info!(example_id = %id, "Deleted example");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), RepositoryError> {
        self.repo.health_check().await
    }
}
