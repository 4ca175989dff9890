//! User entity manager.
//!
//! Owns the creation and authentication lifecycle of [`User`] records:
//! email normalization, password policy, credential hashing and
//! persistence. All collaborators are injected; there is no global
//! registry of the active user type.

use std::sync::Arc;

use account_store::AccountStore;
use credentials::{normalize_email, CredentialHasher, PasswordPolicy, PolicyError};
use entities::User;

use crate::error::{ServerError, ServerResult};

/// Creates, persists and authenticates user accounts.
pub struct UserManager<S: AccountStore> {
    store: Arc<S>,
    hasher: Arc<dyn CredentialHasher>,
    policy: PasswordPolicy,
}

impl<S: AccountStore> UserManager<S> {
    /// Creates a manager over the given store and hasher, with the
    /// default password policy.
    pub fn new(store: Arc<S>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self {
            store,
            hasher,
            policy: PasswordPolicy::default(),
        }
    }

    /// Overrides the password policy.
    pub fn with_policy(mut self, policy: PasswordPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Creates a regular user.
    ///
    /// Normalizes the email, enforces the password policy, derives the
    /// stored credential and persists the record. A duplicate email
    /// surfaces as the store's `AlreadyExists` error.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> ServerResult<User> {
        self.build_and_store(email, password, name, false).await
    }

    /// Creates a user with staff and superuser flags set.
    pub async fn create_superuser(&self, email: &str, password: &str) -> ServerResult<User> {
        self.build_and_store(email, password, None, true).await
    }

    /// Verifies credentials and returns the matching user.
    ///
    /// An empty password is rejected before any storage lookup. Unknown
    /// email and wrong password produce the same error, so callers cannot
    /// probe which addresses are registered.
    pub async fn authenticate(&self, email: &str, password: &str) -> ServerResult<User> {
        if password.is_empty() {
            return Err(ServerError::validation(
                "password",
                "This field may not be blank.",
            ));
        }

        let email = normalize_email(email);
        let user = self
            .store
            .get_user_by_email(&email)
            .await?
            .ok_or(ServerError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash) {
            tracing::debug!(email = %email, "Password verification failed");
            return Err(ServerError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn build_and_store(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
        superuser: bool,
    ) -> ServerResult<User> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ServerError::validation(
                "email",
                "This field may not be blank.",
            ));
        }

        self.policy.validate(password).map_err(|e| match e {
            PolicyError::TooShort { min } => ServerError::validation(
                "password",
                format!("Ensure this field has at least {min} characters."),
            ),
        })?;

        let hash = self.hasher.hash(password)?;
        let mut user = User::new(email, hash);
        if let Some(name) = name {
            user = user.with_name(name);
        }
        if superuser {
            user = user.as_superuser();
        }

        let user = self.store.create_user(user).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }
}
