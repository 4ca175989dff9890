//! Access token entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An opaque bearer credential owned by exactly one user.
///
/// The key carries no decodable meaning; it is valid until explicitly
/// deleted from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// Opaque token value.
    pub key: String,
    /// Owning user.
    pub user_id: Uuid,
    /// When this token was issued.
    pub created_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a new token for a user.
    pub fn new(key: impl Into<String>, user_id: Uuid) -> Self {
        Self {
            key: key.into(),
            user_id,
            created_at: Utc::now(),
        }
    }
}
