//! Server configuration.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database URL.
    pub database_url: String,
    /// Email for the bootstrap superuser, if any.
    pub admin_email: Option<String>,
    /// Password for the bootstrap superuser.
    pub admin_password: Option<String>,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let admin_email = env::var("ACCOUNTS_ADMIN_EMAIL").ok();
        let admin_password = env::var("ACCOUNTS_ADMIN_PASSWORD").ok();
        if admin_email.is_some() != admin_password.is_some() {
            anyhow::bail!(
                "ACCOUNTS_ADMIN_EMAIL and ACCOUNTS_ADMIN_PASSWORD must be set together"
            );
        }

        Ok(Self {
            host: env::var("ACCOUNTS_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("ACCOUNTS_SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:accounts.db?mode=rwc".to_string()),
            admin_email,
            admin_password,
            log_level: env::var("ACCOUNTS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
