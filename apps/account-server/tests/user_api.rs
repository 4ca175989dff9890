//! Integration tests for the user API.
//!
//! Drives the full router in-process against the in-memory store:
//! registration (valid, duplicate email, short password) and token
//! issuance (valid, wrong password, unknown user, blank password).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use account_server::{config::Config, create_app, create_state, state::AppState};
use account_store::{AccountStore, AccountStoreResult, MemoryAccountStore};
use async_trait::async_trait;
use entities::{AccessToken, User};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use credentials::{Argon2CredentialHasher, CredentialHasher};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        admin_email: None,
        admin_password: None,
        log_level: "warn".to_string(),
    }
}

fn test_state() -> Arc<AppState<MemoryAccountStore>> {
    create_state(test_config(), MemoryAccountStore::new())
}

async fn post_json(app: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_create_valid_user_success() {
    let state = test_state();
    let app = create_app(state.clone());

    let payload = json!({
        "email": "admin@gve.com",
        "password": "Aa12345678*",
        "name": "test name"
    });
    let (status, body) = post_json(&app, "/user/create/", payload).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "admin@gve.com");
    assert_eq!(body["name"], "test name");
    assert!(body.get("id").is_some());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    // The stored credential verifies against the submitted password.
    let user = state
        .store
        .get_user_by_email("admin@gve.com")
        .await
        .unwrap()
        .unwrap();
    let hasher = Argon2CredentialHasher::new();
    assert!(hasher.verify("Aa12345678*", &user.password_hash));
}

#[tokio::test]
async fn test_create_user_already_exists() {
    let app = create_app(test_state());

    let payload = json!({
        "email": "admin@gve.com",
        "password": "Aa12345678*",
        "name": "test name"
    });
    let (status, _) = post_json(&app, "/user/create/", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(&app, "/user/create/", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("email").is_some());
}

#[tokio::test]
async fn test_create_user_password_too_short() {
    let state = test_state();
    let app = create_app(state.clone());

    let payload = json!({
        "email": "admin@gve.com",
        "password": "Aa1",
        "name": "test name"
    });
    let (status, body) = post_json(&app, "/user/create/", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("password").is_some());

    // No record was created for the rejected registration.
    let user = state
        .store
        .get_user_by_email("admin@gve.com")
        .await
        .unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn test_create_token_for_user() {
    let state = test_state();
    let app = create_app(state.clone());

    state
        .manager
        .create_user("admin@gve.com", "Aa12345678*", None)
        .await
        .unwrap();

    let payload = json!({ "email": "admin@gve.com", "password": "Aa12345678*" });
    let (status, body) = post_json(&app, "/user/token/", payload.clone()).await;

    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();
    assert!(!token.is_empty());

    // Issuance is get-or-create: asking again returns the same key.
    let (status, body) = post_json(&app, "/user/token/", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token"].as_str().unwrap(), token);
}

#[tokio::test]
async fn test_create_token_invalid_credentials() {
    let state = test_state();
    let app = create_app(state.clone());

    state
        .manager
        .create_user("test@londonappdev.com", "testpass", None)
        .await
        .unwrap();

    let payload = json!({ "email": "admin@gve.com", "password": "wrong" });
    let (status, body) = post_json(&app, "/user/token/", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("token").is_none());
    assert!(body.get("non_field_errors").is_some());
}

#[tokio::test]
async fn test_create_token_no_user() {
    let app = create_app(test_state());

    let payload = json!({ "email": "admin@gve.com", "password": "Aa12345678*" });
    let (status, body) = post_json(&app, "/user/token/", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_create_token_blank_password() {
    let app = create_app(test_state());

    let payload = json!({ "email": "one", "password": "" });
    let (status, body) = post_json(&app, "/user/token/", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_create_token_missing_password_field() {
    let app = create_app(test_state());

    let payload = json!({ "email": "one@gve.com" });
    let (status, body) = post_json(&app, "/user/token/", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("token").is_none());
    assert!(body.get("password").is_some());
}

#[tokio::test]
async fn test_create_user_missing_email_field() {
    let app = create_app(test_state());

    let payload = json!({ "password": "Aa12345678*" });
    let (status, body) = post_json(&app, "/user/create/", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("email").is_some());
}

/// Store double whose next token lookup reports no token, so the handler
/// issues a fresh one and collides with the already-stored key.
struct ContendedTokenStore {
    inner: MemoryAccountStore,
    hide_next_token_get: AtomicBool,
}

#[async_trait]
impl AccountStore for ContendedTokenStore {
    async fn create_user(&self, user: User) -> AccountStoreResult<User> {
        self.inner.create_user(user).await
    }

    async fn get_user_by_email(&self, email: &str) -> AccountStoreResult<Option<User>> {
        self.inner.get_user_by_email(email).await
    }

    async fn create_token(&self, token: AccessToken) -> AccountStoreResult<AccessToken> {
        self.inner.create_token(token).await
    }

    async fn get_token_for_user(&self, user_id: Uuid) -> AccountStoreResult<Option<AccessToken>> {
        if self.hide_next_token_get.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.get_token_for_user(user_id).await
    }
}

#[tokio::test]
async fn test_first_issuance_race_settles_on_stored_token() {
    let store = ContendedTokenStore {
        inner: MemoryAccountStore::new(),
        hide_next_token_get: AtomicBool::new(false),
    };
    let state = create_state(test_config(), store);
    let app = create_app(state.clone());

    let user = state
        .manager
        .create_user("admin@gve.com", "Aa12345678*", None)
        .await
        .unwrap();
    state
        .store
        .inner
        .create_token(AccessToken::new("tok-1", user.id))
        .await
        .unwrap();

    // The handler sees no token, issues its own, loses the insert and
    // must answer with the stored key rather than an error.
    state.store.hide_next_token_get.store(true, Ordering::SeqCst);

    let payload = json!({ "email": "admin@gve.com", "password": "Aa12345678*" });
    let (status, body) = post_json(&app, "/user/token/", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token"], "tok-1");
}

#[tokio::test]
async fn test_registration_and_token_flow() {
    let app = create_app(test_state());

    // Register.
    let payload = json!({
        "email": "admin@gve.com",
        "password": "Aa12345678*",
        "name": "test name"
    });
    let (status, body) = post_json(&app, "/user/create/", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("password").is_none());

    // Duplicate registration fails.
    let (status, _) = post_json(&app, "/user/create/", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Token with the correct password.
    let (status, body) = post_json(
        &app,
        "/user/token/",
        json!({ "email": "admin@gve.com", "password": "Aa12345678*" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("token").is_some());

    // Token with a wrong password.
    let (status, body) = post_json(
        &app,
        "/user/token/",
        json!({ "email": "admin@gve.com", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("token").is_none());
}
