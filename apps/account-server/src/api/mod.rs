//! API endpoints.

pub mod user;

use std::sync::Arc;

use account_store::AccountStore;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;

use crate::error::ServerError;
use crate::state::AppState;

/// JSON extractor whose rejection is a field-error body.
///
/// Axum's own `Json` rejection answers 422 with plain text; the API
/// contract is 400 with `{field: [errors]}` for every invalid request,
/// including one missing a required field.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ServerError::MalformedBody(rejection.body_text())),
        }
    }
}

/// Creates the API router with all endpoints.
pub fn create_router<S: AccountStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        // User endpoints
        .route("/user/create/", post(user::create_user))
        .route("/user/token/", post(user::issue_token))
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
