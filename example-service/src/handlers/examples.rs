//! Example resource handlers.
//!
//! Handlers bind the request, call [`ExampleService`](crate::services::ExampleService)
//! and translate the outcome; repository errors become HTTP statuses through
//! `From<RepositoryError> for AppError`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::{CreateExampleRequest, ExampleResponse, ListExamplesQuery, UpdateExampleRequest},
    models::{ExampleUpdate, NewExample},
    services::{ExampleFilter, DEFAULT_PAGE_SIZE},
    startup::AppState,
};

fn bad_request(message: String) -> AppError {
    AppError::BadRequest(anyhow::anyhow!(message))
}

/// Create a new example.
#[utoipa::path(
    post,
    path = "/api/v1/examples",
    request_body = CreateExampleRequest,
    responses(
        (status = 201, description = "Example created", body = ExampleResponse),
        (status = 400, description = "Body could not be bound", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Examples"
)]
pub async fn create_example(
    State(state): State<AppState>,
    payload: Result<Json<CreateExampleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ExampleResponse>), AppError> {
    let Json(payload) = payload.map_err(|e| bad_request(e.body_text()))?;

    let created = state
        .examples
        .create_example(NewExample { name: payload.name })
        .await?;

    Ok((StatusCode::CREATED, Json(ExampleResponse::from(created))))
}

/// Get an example by id.
#[utoipa::path(
    get,
    path = "/api/v1/examples/{id}",
    params(("id" = String, Path, description = "24-character hex example id")),
    responses(
        (status = 200, description = "Example found", body = ExampleResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No example with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Examples"
)]
pub async fn get_example(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExampleResponse>, AppError> {
    tracing::debug!(example_id = %id, "Fetching example");

    let example = state.examples.get_example_by_id(&id).await?;
    Ok(Json(ExampleResponse::from(example)))
}

/// List examples: all, filtered by name, or one page newest first.
#[utoipa::path(
    get,
    path = "/api/v1/examples",
    params(ListExamplesQuery),
    responses(
        (status = 200, description = "Examples", body = [ExampleResponse]),
        (status = 400, description = "Invalid query", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Examples"
)]
pub async fn list_examples(
    State(state): State<AppState>,
    query: Result<Query<ListExamplesQuery>, QueryRejection>,
) -> Result<Json<Vec<ExampleResponse>>, AppError> {
    let Query(query) = query.map_err(|e| bad_request(e.body_text()))?;
    let paginated = query.page.is_some() || query.limit.is_some();

    let examples = match (paginated, query.name) {
        (true, Some(_)) => {
            return Err(bad_request(
                "name filter cannot be combined with page or limit".to_string(),
            ))
        }
        (true, None) => {
            state
                .examples
                .get_examples_page(query.page.unwrap_or(1), query.limit.unwrap_or(DEFAULT_PAGE_SIZE))
                .await?
        }
        (false, Some(name)) => {
            state
                .examples
                .get_examples_with_filter(&ExampleFilter::name_equals(name))
                .await?
        }
        (false, None) => state.examples.get_examples().await?,
    };

    Ok(Json(
        examples.into_iter().map(ExampleResponse::from).collect(),
    ))
}

/// Replace an example's name.
#[utoipa::path(
    put,
    path = "/api/v1/examples/{id}",
    params(("id" = String, Path, description = "24-character hex example id")),
    request_body = UpdateExampleRequest,
    responses(
        (status = 200, description = "Example updated", body = ExampleResponse),
        (status = 400, description = "Malformed id or body", body = ErrorResponse),
        (status = 404, description = "No example with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Examples"
)]
pub async fn update_example(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateExampleRequest>, JsonRejection>,
) -> Result<Json<ExampleResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| bad_request(e.body_text()))?;

    let updated = state
        .examples
        .update_example(&id, ExampleUpdate { name: payload.name })
        .await?;

    Ok(Json(ExampleResponse::from(updated)))
}

/// Delete an example.
#[utoipa::path(
    delete,
    path = "/api/v1/examples/{id}",
    params(("id" = String, Path, description = "24-character hex example id")),
    responses(
        (status = 204, description = "Example deleted"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No example with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Examples"
)]
pub async fn delete_example(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.examples.delete_example(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
