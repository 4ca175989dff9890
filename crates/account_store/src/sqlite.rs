//! SQLite account store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{AccessToken, User};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::{AccountStore, AccountStoreError, AccountStoreResult};

/// SQLite-backed account store.
///
/// Email uniqueness rides on the `UNIQUE` constraint, so concurrent
/// registrations of the same address serialize inside the database.
#[derive(Debug, Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    /// Connects to the given database URL and applies the schema.
    pub async fn connect(url: &str) -> AccountStoreResult<Self> {
        let pool = SqlitePool::connect(url).await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Wraps an existing pool and applies the schema.
    pub async fn from_pool(pool: SqlitePool) -> AccountStoreResult<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> AccountStoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                name TEXT,
                password_hash TEXT NOT NULL,
                is_staff INTEGER NOT NULL DEFAULT 0,
                is_superuser INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tokens (
                key TEXT PRIMARY KEY,
                user_id TEXT NOT NULL UNIQUE REFERENCES users(id),
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        tracing::debug!("Account store schema ready");
        Ok(())
    }
}

fn parse_uuid(value: &str) -> AccountStoreResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| AccountStoreError::Other(format!("invalid uuid in store: {e}")))
}

fn user_from_row(row: &SqliteRow) -> AccountStoreResult<User> {
    Ok(User {
        id: parse_uuid(&row.try_get::<String, _>("id")?)?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        password_hash: row.try_get("password_hash")?,
        is_staff: row.try_get("is_staff")?,
        is_superuser: row.try_get("is_superuser")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn create_user(&self, user: User) -> AccountStoreResult<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, name, password_hash, is_staff, is_superuser, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AccountStoreError::already_exists("User", &user.email))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_user_by_email(&self, email: &str) -> AccountStoreResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn create_token(&self, token: AccessToken) -> AccountStoreResult<AccessToken> {
        let result = sqlx::query("INSERT INTO tokens (key, user_id, created_at) VALUES (?, ?, ?)")
            .bind(&token.key)
            .bind(token.user_id.to_string())
            .bind(token.created_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(token),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(
                AccountStoreError::already_exists("AccessToken", token.user_id.to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_token_for_user(&self, user_id: Uuid) -> AccountStoreResult<Option<AccessToken>> {
        let row = sqlx::query("SELECT * FROM tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| {
            Ok(AccessToken {
                key: row.try_get("key")?,
                user_id: parse_uuid(&row.try_get::<String, _>("user_id")?)?,
                created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            })
        })
        .transpose()
    }
}
