//! # API Errors
//!
//! Every failed request answers with `{status, error, message}`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::report::ReportError;
use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request or a write rejected by a database constraint
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Anything unexpected
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConstraintViolation(msg) => ApiError::BadRequest(msg),
            e @ StoreError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let status = err.status_code();
        Self {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(msg) = &self {
            error!(error = %msg, "unhandled error");
        }
        let body = Json(ErrorResponse::from(&self));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let bad = ApiError::from(StoreError::ConstraintViolation("dup".into()));
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);

        let missing = ApiError::from(StoreError::NotFound {
            table: "tier",
            id: 3,
        });
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "tier 3 not found");

        let internal = ApiError::from(StoreError::LockPoisoned);
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body() {
        let body = ErrorResponse::from(&ApiError::BadRequest("emp_no taken".into()));
        assert_eq!(body.status, 400);
        assert_eq!(body.error, "Bad Request");
        assert_eq!(body.message, "emp_no taken");

        let body = ErrorResponse::from(&ApiError::Internal("boom".into()));
        assert_eq!(body.error, "Internal Server Error");
    }

    #[test]
    fn test_report_overflow_is_internal() {
        let err = ApiError::from(ReportError::Overflow { report: "q1" });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("q1"));
    }
}
