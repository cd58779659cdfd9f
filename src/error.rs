/// Unified error types for the Digital Hermit backend
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum HermitError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Email already resolves to an account in either shape
    #[error("Email address already exists. Please use a different email or try logging in.")]
    DuplicateEmail,

    /// Registration for an email that already has an account
    #[error("User already exists")]
    DuplicateAccount,

    /// Generic authentication failure - never reveals which field was wrong
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Too many failed logins
    #[error("Account is temporarily locked. Please try again later.")]
    AccountLocked,

    /// Valid credentials but the account has not been approved yet
    #[error("Your account is pending approval. Please wait for admin approval.")]
    PendingApproval,

    /// Bad moderation input
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Missing or invalid session
    #[error("Not authenticated")]
    Unauthenticated,

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON error response format: `{"success": false, "error": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Convert HermitError to HTTP response
impl IntoResponse for HermitError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            HermitError::Validation(_)
            | HermitError::DuplicateEmail
            | HermitError::DuplicateAccount
            | HermitError::InvalidStatus(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            HermitError::InvalidCredentials | HermitError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            HermitError::AccountLocked | HermitError::PendingApproval => {
                (StatusCode::FORBIDDEN, self.to_string())
            }
            HermitError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            HermitError::Database(_) | HermitError::Internal(_) | HermitError::Io(_) => {
                // Full detail is logged server-side, never returned to the caller
                tracing::error!("internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error: message,
        });

        (status, body).into_response()
    }
}

impl HermitError {
    /// Translate a storage-level unique constraint violation into the typed
    /// duplicate-email error. The unique index on accounts.email is the
    /// authoritative guard against concurrent duplicate submissions.
    pub fn from_insert_error(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return HermitError::DuplicateEmail;
            }
        }
        HermitError::Database(err)
    }
}

/// Result type alias
pub type HermitResult<T> = Result<T, HermitError>;
