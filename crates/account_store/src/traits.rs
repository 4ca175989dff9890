//! Account store trait definitions.

use async_trait::async_trait;
use entities::{AccessToken, User};
use uuid::Uuid;

use crate::AccountStoreResult;

/// Trait for user and token storage operations.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Creates a new user.
    ///
    /// Fails with [`AccountStoreError::AlreadyExists`] when a user with
    /// the same email is already stored.
    ///
    /// [`AccountStoreError::AlreadyExists`]: crate::AccountStoreError::AlreadyExists
    async fn create_user(&self, user: User) -> AccountStoreResult<User>;

    /// Gets a user by normalized email.
    async fn get_user_by_email(&self, email: &str) -> AccountStoreResult<Option<User>>;

    /// Persists a freshly issued token.
    async fn create_token(&self, token: AccessToken) -> AccountStoreResult<AccessToken>;

    /// Gets the active token for a user, if one exists.
    async fn get_token_for_user(&self, user_id: Uuid) -> AccountStoreResult<Option<AccessToken>>;
}
