//! User API endpoints.

use std::sync::Arc;

use account_store::AccountStore;
use axum::{extract::State, http::StatusCode, Json};
use entities::{AccessToken, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::ApiJson;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Public representation of a user. Carries no credential material.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Credential payload for token issuance.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Issued token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Creates a new user account.
pub async fn create_user<S: AccountStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> ServerResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .manager
        .create_user(&request.email, &request.password, request.name.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Issues an opaque bearer token for valid credentials.
///
/// Get-or-create per user: a token issued earlier is returned unchanged.
pub async fn issue_token<S: AccountStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(request): ApiJson<TokenRequest>,
) -> ServerResult<Json<TokenResponse>> {
    let user = state
        .manager
        .authenticate(&request.email, &request.password)
        .await?;

    let token = match state.store.get_token_for_user(user.id).await? {
        Some(token) => token,
        None => {
            let fresh = AccessToken::new(state.token_issuer.issue(), user.id);
            match state.store.create_token(fresh).await {
                Ok(token) => token,
                // Lost the insert to a concurrent first issuance; the
                // winner's token is the active one.
                Err(e) if e.is_already_exists() => state
                    .store
                    .get_token_for_user(user.id)
                    .await?
                    .ok_or_else(|| {
                        ServerError::Internal("token missing after duplicate insert".to_string())
                    })?,
                Err(e) => return Err(e.into()),
            }
        }
    };

    tracing::info!(user_id = %user.id, "Token issued");

    Ok(Json(TokenResponse { token: token.key }))
}
