//! Account server
//!
//! A small backend providing user registration and opaque-token
//! authentication over email-based accounts.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

use std::sync::Arc;

use account_store::AccountStore;
use axum::Router;
use credentials::{Argon2CredentialHasher, OpaqueTokenIssuer};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::services::UserManager;
use crate::state::AppState;

/// Creates the application router with all routes configured.
pub fn create_app<S: AccountStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state with the given configuration and store.
///
/// Wires the default collaborators: Argon2 credential hashing and random
/// opaque tokens.
pub fn create_state<S: AccountStore>(config: Config, store: S) -> Arc<AppState<S>> {
    let store = Arc::new(store);
    let manager = UserManager::new(store.clone(), Arc::new(Argon2CredentialHasher::new()));
    Arc::new(AppState::new(
        config,
        store,
        manager,
        Arc::new(OpaqueTokenIssuer::default()),
    ))
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
