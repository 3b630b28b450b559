//! Server-level API error type
//!
//! Infrastructure failures (pool exhaustion, blocking-task panics, malformed
//! rows) surface as `ApiError`; business-rule refusals from the engines are
//! translated by the handlers through `handlers::error_codes` instead, so
//! they carry domain-specific error codes.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::handlers::error_codes::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "REQ-001",
            ApiError::NotFound(_) => "REQ-002",
            ApiError::Internal(_) => "SRV-001",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self, ApiError::Internal(_)) {
            tracing::error!("Internal error: {}", self);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(
            self.error_code(),
            &self.to_string(),
            !matches!(self, ApiError::Internal(_)),
        ))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(format!("{:#}", err))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(format!("Invalid request: {}", errors))
    }
}
