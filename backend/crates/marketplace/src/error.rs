//! Marketplace Error Types
//!
//! This module provides marketplace-specific error variants that
//! integrate with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Marketplace-specific result type alias
pub type MarketResult<T> = Result<T, MarketError>;

/// Marketplace-specific error variants
#[derive(Debug, Error)]
pub enum MarketError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Task not found
    #[error("Task not found")]
    TaskNotFound,

    /// Submission not found
    #[error("Submission not found")]
    SubmissionNotFound,

    /// Withdrawal request not found
    #[error("Withdrawal request not found")]
    WithdrawalNotFound,

    /// An account with this e-mail already exists
    #[error("An account with this e-mail already exists")]
    EmailTaken,

    /// User still referenced by open tasks or pending submissions
    #[error("User still has open tasks or pending submissions")]
    UserReferenced,

    /// Caller lacks the required role or does not own the entity
    #[error("Forbidden: {0}")]
    Forbidden(&'static str),

    /// Balance too low to cover the operation
    #[error("Insufficient coins")]
    InsufficientFunds,

    /// Worker already submitted against this task
    #[error("Already submitted for this task")]
    DuplicateSubmission,

    /// Task has no remaining worker slots
    #[error("This task is no longer available")]
    TaskExhausted,

    /// Entity is not in the pending state required for the transition
    #[error("{0} is no longer pending")]
    NotPending(&'static str),

    /// Missing or malformed input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MarketError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            MarketError::UserNotFound
            | MarketError::TaskNotFound
            | MarketError::SubmissionNotFound
            | MarketError::WithdrawalNotFound => StatusCode::NOT_FOUND,
            MarketError::EmailTaken | MarketError::UserReferenced => StatusCode::CONFLICT,
            MarketError::Forbidden(_) => StatusCode::FORBIDDEN,
            MarketError::InsufficientFunds => StatusCode::PAYMENT_REQUIRED,
            MarketError::DuplicateSubmission
            | MarketError::TaskExhausted
            | MarketError::NotPending(_) => StatusCode::CONFLICT,
            MarketError::Validation(_) | MarketError::MissingHeader(_) => StatusCode::BAD_REQUEST,
            MarketError::Database(_) | MarketError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketError::UserNotFound
            | MarketError::TaskNotFound
            | MarketError::SubmissionNotFound
            | MarketError::WithdrawalNotFound => ErrorKind::NotFound,
            MarketError::EmailTaken | MarketError::UserReferenced => ErrorKind::Conflict,
            MarketError::Forbidden(_) => ErrorKind::Forbidden,
            MarketError::InsufficientFunds => ErrorKind::PaymentRequired,
            MarketError::DuplicateSubmission
            | MarketError::TaskExhausted
            | MarketError::NotPending(_) => ErrorKind::Conflict,
            MarketError::Validation(_) | MarketError::MissingHeader(_) => ErrorKind::BadRequest,
            MarketError::Database(_) | MarketError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            MarketError::Database(e) => {
                tracing::error!(error = %e, "Marketplace database error");
            }
            MarketError::Internal(msg) => {
                tracing::error!(message = %msg, "Marketplace internal error");
            }
            MarketError::InsufficientFunds => {
                tracing::warn!("Operation rejected for insufficient coins");
            }
            MarketError::Forbidden(reason) => {
                tracing::warn!(reason = %reason, "Forbidden marketplace operation");
            }
            _ => {
                tracing::debug!(error = %self, "Marketplace error");
            }
        }
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for MarketError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest | ErrorKind::UnprocessableEntity => {
                MarketError::Validation(err.message().to_string())
            }
            _ => MarketError::Internal(err.to_string()),
        }
    }
}

impl From<platform::client::IdentityError> for MarketError {
    fn from(err: platform::client::IdentityError) -> Self {
        match err {
            platform::client::IdentityError::MissingHeader(header) => {
                MarketError::MissingHeader(header)
            }
        }
    }
}
