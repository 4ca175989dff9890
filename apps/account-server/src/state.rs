//! Application state.

use std::sync::Arc;

use account_store::AccountStore;
use credentials::TokenIssuer;

use crate::config::Config;
use crate::services::UserManager;

/// Shared application state.
pub struct AppState<S: AccountStore> {
    /// Server configuration.
    pub config: Config,
    /// Account store.
    pub store: Arc<S>,
    /// User entity manager.
    pub manager: UserManager<S>,
    /// Opaque token issuer.
    pub token_issuer: Arc<dyn TokenIssuer>,
}

impl<S: AccountStore> AppState<S> {
    /// Creates new application state.
    pub fn new(
        config: Config,
        store: Arc<S>,
        manager: UserManager<S>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            config,
            store,
            manager,
            token_issuer,
        }
    }
}
