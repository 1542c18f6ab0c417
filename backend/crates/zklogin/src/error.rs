//! zkLogin Error Types
//!
//! Identity and session failures, mapped onto the unified
//! `kernel::error::AppError` response shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// zkLogin-specific result type alias
pub type ZkLoginResult<T> = Result<T, ZkLoginError>;

/// Why a session token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("no token")]
    NoToken,

    #[error("malformed token")]
    MalformedToken,

    #[error("address not found")]
    AddressNotFound,

    #[error("email mismatch")]
    EmailMismatch,

    #[error("no active session")]
    NoActiveSession,
}

/// zkLogin-specific error variants
#[derive(Debug, Error)]
pub enum ZkLoginError {
    /// Unique constraint on email or address lost a race
    #[error("Address already registered")]
    Conflict,

    /// No mapping for the requested address
    #[error("Address not found")]
    AddressNotFound,

    /// Token validation failed
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthFailure),

    /// Bad caller input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ZkLoginError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ZkLoginError::Conflict => StatusCode::CONFLICT,
            ZkLoginError::AddressNotFound => StatusCode::NOT_FOUND,
            ZkLoginError::Auth(AuthFailure::NoToken) => StatusCode::FORBIDDEN,
            ZkLoginError::Auth(_) => StatusCode::UNAUTHORIZED,
            ZkLoginError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ZkLoginError::Database(_) | ZkLoginError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZkLoginError::Conflict => ErrorKind::Conflict,
            ZkLoginError::AddressNotFound => ErrorKind::NotFound,
            ZkLoginError::Auth(AuthFailure::NoToken) => ErrorKind::Forbidden,
            ZkLoginError::Auth(_) => ErrorKind::Unauthorized,
            ZkLoginError::InvalidRequest(_) => ErrorKind::BadRequest,
            ZkLoginError::Database(_) | ZkLoginError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// The specific auth failure, if any
    pub fn auth_failure(&self) -> Option<AuthFailure> {
        match self {
            ZkLoginError::Auth(failure) => Some(*failure),
            _ => None,
        }
    }

    /// Convert to AppError
    ///
    /// Token failures other than a missing token share one client message;
    /// the precise reason is logged server-side only.
    pub fn to_app_error(&self) -> AppError {
        match self {
            ZkLoginError::Auth(AuthFailure::NoToken) => {
                AppError::forbidden("No Sui token provided")
            }
            ZkLoginError::Auth(_) => AppError::unauthorized("Invalid Sui token")
                .with_action("Sign in again with zkLogin"),
            ZkLoginError::AddressNotFound => {
                AppError::not_found("Address not found in the system")
            }
            ZkLoginError::Conflict => AppError::conflict("Address already registered"),
            ZkLoginError::InvalidRequest(msg) => AppError::bad_request(msg.clone()),
            ZkLoginError::Database(_) | ZkLoginError::Internal(_) => {
                AppError::internal("Internal server error")
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ZkLoginError::Database(e) => {
                tracing::error!(error = %e, "zkLogin database error");
            }
            ZkLoginError::Internal(msg) => {
                tracing::error!(message = %msg, "zkLogin internal error");
            }
            ZkLoginError::Auth(failure) => {
                tracing::warn!(reason = %failure, "Sui token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "zkLogin error");
            }
        }
    }
}

impl IntoResponse for ZkLoginError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ZkLoginError {
    fn from(err: AppError) -> Self {
        ZkLoginError::Internal(err.to_string())
    }
}
