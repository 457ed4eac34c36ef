//! Reporting provider selection and relational store connection settings.

use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;
use std::fmt;
use std::time::Duration;

/// Error type for connection configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Unsupported reporting provider: {0}. Supported: mysql, mongo")]
    UnsupportedProvider(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Backing store the reporting layer reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Pre-built MySQL views.
    #[default]
    MySql,
    /// Document store (aggregation pipelines, not implemented).
    Mongo,
}

impl Provider {
    /// Parse provider from string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConnectionError> {
        match s.trim().to_lowercase().as_str() {
            "mysql" | "" => Ok(Provider::MySql),
            "mongo" | "mongodb" => Ok(Provider::Mongo),
            other => Err(ConnectionError::UnsupportedProvider(other.to_string())),
        }
    }

    /// Name reported to API callers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::MySql => "mysql",
            Provider::Mongo => "mongo",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// MySQL connection and pool configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MySqlSettings {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database (schema) holding the reporting views.
    pub database: String,
    /// Username.
    pub user: String,
    /// Password (supports ${ENV_VAR} expansion).
    pub password: String,
    /// Maximum pooled connections. Requests wait for a free one.
    pub pool_size: u32,
    /// How long a request waits for a pooled connection.
    pub acquire_timeout_secs: u64,
}

impl Default for MySqlSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            database: "condo_mgmt".to_string(),
            user: "root".to_string(),
            password: String::new(),
            pool_size: 10,
            acquire_timeout_secs: 30,
        }
    }
}

impl MySqlSettings {
    /// Check values that would otherwise only fail on first use.
    pub fn validate(&self) -> Result<(), ConnectionError> {
        if self.host.trim().is_empty() {
            return Err(ConnectionError::InvalidConfig("mysql.host is empty".into()));
        }
        if self.database.trim().is_empty() {
            return Err(ConnectionError::InvalidConfig(
                "mysql.database is empty".into(),
            ));
        }
        if self.pool_size == 0 {
            return Err(ConnectionError::InvalidConfig(
                "mysql.pool_size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Connect options for sqlx.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user);
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        options
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Connection URL with the password masked, for logs.
    pub fn display_url(&self) -> String {
        let auth = if self.password.is_empty() {
            self.user.clone()
        } else {
            format!("{}:***", self.user)
        };
        format!(
            "mysql://{}@{}:{}/{}",
            auth, self.host, self.port, self.database
        )
    }
}
