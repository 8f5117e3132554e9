use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use utoipa::ToSchema;

use crate::repo::RepoError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Everything a handler can fail with. Messages are short and never carry
/// storage details.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("request body too large")]
    PayloadTooLarge,
    #[error("failed to {0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Log a repository failure and hide it behind a generic 500.
    pub fn storage(action: &'static str, err: RepoError) -> Self {
        match &err {
            RepoError::NotFound => tracing::warn!(action, "target row does not exist"),
            RepoError::Storage(e) => tracing::error!(action, error = %e, "repository call failed"),
        }
        ApiError::Internal(action)
    }

    /// Lookups are the one place a missing row becomes a 404.
    pub fn lookup(resource: &'static str, action: &'static str, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => ApiError::NotFound(resource),
            other => Self::storage(action, other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiErrorBody { error: self.to_string() })
    }
}
