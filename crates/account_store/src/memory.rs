//! In-memory account store implementation for testing.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use entities::{AccessToken, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{AccountStore, AccountStoreError, AccountStoreResult};

/// In-memory account store for testing purposes.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    tokens: Arc<RwLock<HashMap<Uuid, AccessToken>>>,
}

impl MemoryAccountStore {
    /// Creates a new in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create_user(&self, user: User) -> AccountStoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AccountStoreError::already_exists("User", &user.email));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> AccountStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create_token(&self, token: AccessToken) -> AccountStoreResult<AccessToken> {
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&token.user_id) {
            return Err(AccountStoreError::already_exists(
                "AccessToken",
                token.user_id.to_string(),
            ));
        }
        tokens.insert(token.user_id, token.clone());
        Ok(token)
    }

    async fn get_token_for_user(&self, user_id: Uuid) -> AccountStoreResult<Option<AccessToken>> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(&user_id).cloned())
    }
}
