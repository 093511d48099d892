use crate::models::Example;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateExampleRequest {
    #[schema(example = "widget")]
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateExampleRequest {
    #[schema(example = "sprocket")]
    pub name: String,
}

/// Listing parameters. `page`/`limit` select a page; `name` alone filters
/// by exact name; nothing lists every example.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListExamplesQuery {
    /// 1-indexed page number (default 1 when `limit` is given)
    pub page: Option<i64>,
    /// Page size, 1 to 100 (default 20 when `page` is given)
    pub limit: Option<i64>,
    /// Exact name to match
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExampleResponse {
    #[schema(example = "65a1b2c3d4e5f60718293a4b")]
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Example> for ExampleResponse {
    fn from(example: Example) -> Self {
        Self {
            id: example.id.to_hex(),
            name: example.name,
            created_at: example.created_at,
            updated_at: example.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Example 65a1b2c3d4e5f60718293a4b not found")]
    pub error: String,
    pub details: Option<String>,
}
