//! Account server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use account_server::{config::Config, create_app, create_state, init_tracing, state::AppState};
use account_store::{AccountStore, SqliteAccountStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(database_url = %config.database_url, "Starting account server");

    let store = SqliteAccountStore::connect(&config.database_url).await?;

    let state = create_state(config.clone(), store);

    bootstrap_admin(&state).await?;

    let app = create_app(state);

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(addr = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Creates the configured bootstrap superuser when it does not exist yet.
async fn bootstrap_admin<S: AccountStore>(state: &Arc<AppState<S>>) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (
        state.config.admin_email.as_deref(),
        state.config.admin_password.as_deref(),
    ) else {
        return Ok(());
    };

    let normalized = credentials::normalize_email(email);
    if state.store.get_user_by_email(&normalized).await?.is_some() {
        tracing::debug!(email = %normalized, "Bootstrap superuser already present");
        return Ok(());
    }

    let user = state.manager.create_superuser(email, password).await?;
    tracing::info!(user_id = %user.id, "Bootstrap superuser created");

    Ok(())
}
