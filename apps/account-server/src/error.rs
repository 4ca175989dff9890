//! Server error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A request field failed validation.
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Credentials did not match any stored user.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The request body could not be deserialized.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Storage error.
    #[error("Store error: {0}")]
    Store(#[from] account_store::AccountStoreError),

    /// Credential hashing error.
    #[error("Credential error: {0}")]
    Credential(#[from] credentials::CredentialError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Creates a field validation error.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ServerError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                json!({ (*field): [message] }),
            ),
            ServerError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                json!({ "non_field_errors": ["Unable to authenticate with provided credentials"] }),
            ),
            ServerError::MalformedBody(detail) => {
                let body = match missing_field(detail) {
                    Some(field) => json!({ (field): ["This field is required."] }),
                    None => json!({ "non_field_errors": ["Malformed request body."] }),
                };
                (StatusCode::BAD_REQUEST, body)
            }
            ServerError::Store(e) if e.is_already_exists() => (
                StatusCode::BAD_REQUEST,
                json!({ "email": ["user with this email already exists"] }),
            ),
            ServerError::Store(e) => {
                tracing::error!(error = %e, "Store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "internal server error" }),
                )
            }
            ServerError::Credential(e) => {
                tracing::error!(error = %e, "Credential failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "internal server error" }),
                )
            }
            ServerError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Pulls the field name out of serde's "missing field" deserialization
/// message, so the response can be keyed by the absent field.
fn missing_field(detail: &str) -> Option<&str> {
    let (_, rest) = detail.split_once("missing field `")?;
    let (field, _) = rest.split_once('`')?;
    Some(field)
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
