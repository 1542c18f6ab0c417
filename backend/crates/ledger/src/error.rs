//! Ledger Error Types
//!
//! Failures of ledger calls, mapped onto the unified
//! `kernel::error::AppError` response shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Ledger-specific result type alias
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-specific error variants
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Bad caller input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Caller tried to act for another address
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The Sui node failed or answered with an error
    #[error("Ledger upstream error: {0}")]
    Upstream(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LedgerError::Forbidden(_) => StatusCode::FORBIDDEN,
            LedgerError::Upstream(_) => StatusCode::BAD_GATEWAY,
            LedgerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidRequest(_) => ErrorKind::BadRequest,
            LedgerError::Forbidden(_) => ErrorKind::Forbidden,
            LedgerError::Upstream(_) => ErrorKind::BadGateway,
            LedgerError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError; upstream and internal details stay in the logs
    pub fn to_app_error(&self) -> AppError {
        match self {
            LedgerError::InvalidRequest(msg) => AppError::bad_request(msg.clone()),
            LedgerError::Forbidden(msg) => AppError::forbidden(msg.clone()),
            LedgerError::Upstream(_) => AppError::bad_gateway("Sui node request failed")
                .with_action("Try again later"),
            LedgerError::Internal(_) => AppError::internal("Internal server error"),
        }
    }

    fn log(&self) {
        match self {
            LedgerError::Upstream(msg) => {
                tracing::error!(message = %msg, "Ledger upstream error");
            }
            LedgerError::Internal(msg) => {
                tracing::error!(message = %msg, "Ledger internal error");
            }
            LedgerError::Forbidden(msg) => {
                tracing::warn!(message = %msg, "Ledger request for foreign address");
            }
            _ => {
                tracing::debug!(error = %self, "Ledger error");
            }
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<reqwest::Error> for LedgerError {
    fn from(err: reqwest::Error) -> Self {
        LedgerError::Upstream(err.to_string())
    }
}
