use crate::models::ExampleId;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Store connection failed: {0}")]
    Connection(anyhow::Error),

    #[error("Invalid example id: '{0}'")]
    InvalidId(String),

    #[error("Example {0} not found")]
    NotFound(ExampleId),

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Store read failed: {0}")]
    StoreRead(anyhow::Error),

    #[error("Store write failed: {0}")]
    StoreWrite(anyhow::Error),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidId(_)
            | RepositoryError::InvalidPagination(_)
            | RepositoryError::InvalidFilter(_) => AppError::BadRequest(anyhow::anyhow!(err.to_string())),
            RepositoryError::NotFound(_) => AppError::NotFound(anyhow::anyhow!(err.to_string())),
            RepositoryError::Connection(e) => {
                tracing::error!(error = %e, "Store unavailable");
                AppError::ServiceUnavailable
            }
            RepositoryError::StoreRead(e) | RepositoryError::StoreWrite(e) => {
                AppError::DatabaseError(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn maps_to_http_status() {
        let cases = [
            (RepositoryError::InvalidId("x".into()), StatusCode::BAD_REQUEST),
            (
                RepositoryError::InvalidPagination("page".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                RepositoryError::InvalidFilter("kind".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                RepositoryError::NotFound(ExampleId::generate()),
                StatusCode::NOT_FOUND,
            ),
            (
                RepositoryError::Connection(anyhow::anyhow!("refused")),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                RepositoryError::StoreRead(anyhow::anyhow!("timeout")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                RepositoryError::StoreWrite(anyhow::anyhow!("duplicate key")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status_code(), expected);
        }
    }
}
