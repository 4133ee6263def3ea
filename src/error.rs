//! Unified API error type
//!
//! All domain errors are translated to an HTTP status + JSON body at the API
//! boundary. Database and other unexpected failures are logged server-side
//! and returned to the client as an opaque generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Field-level validation failure, reported as `{"errors": [...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input; carries per-field messages
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Duplicate unique key (email already registered, owner already has a store)
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials or missing/invalid token. Deliberately does not say
    /// which half of a credential pair was wrong.
    #[error("{0}")]
    Auth(String),

    /// Role or ownership mismatch
    #[error("{0}")]
    Forbidden(String),

    /// Missing entity
    #[error("{0}")]
    NotFound(String),

    /// Database failure (logged, masked)
    #[error("database error")]
    Db(sqlx::Error),

    /// Unexpected failure (logged, masked)
    #[error("internal server error")]
    Internal(BoxError),
}

impl AppError {
    pub fn invalid_credentials() -> Self {
        AppError::Auth("Invalid credentials".into())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = e {
            if db.is_unique_violation() {
                return AppError::Conflict("Resource already exists".into());
            }
        }
        AppError::Db(e)
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(e: argon2::password_hash::Error) -> Self {
        AppError::Internal(Box::new(e))
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            // The API contract maps duplicate-key failures to 400 alongside
            // validation failures, not 409.
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(errors) => serde_json::json!({ "errors": errors }),
            AppError::Db(e) => {
                tracing::error!(error = %e, "Database error");
                serde_json::json!({ "error": "Internal server error" })
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                serde_json::json!({ "error": "Internal server error" })
            }
            other => serde_json::json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation(vec![]).status(),
            StatusCode::BAD_REQUEST
        );
        // Conflicts surface as 400, same as other rejected input
        assert_eq!(
            AppError::Conflict("dup".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::invalid_credentials().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("no".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("gone".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unique_violation_becomes_conflict() {
        // RowNotFound is the only sqlx error easy to construct directly;
        // it must stay a masked Db error, not a Conflict.
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Db(_)));
    }
}
