//! TOML-based configuration for the reporting service.
//!
//! Supports a config file (condo-reports.toml) with environment variable
//! expansion, plus the plain environment variables the rest of the condo
//! backend already uses.
//!
//! Example configuration:
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//! client_url = "http://localhost:5173"
//!
//! [reporting]
//! provider = "mysql"
//!
//! [mysql]
//! host = "db.internal"
//! database = "condo_mgmt"
//! user = "reporting"
//! password = "${MYSQL_PASSWORD}"
//! pool_size = 10
//!
//! [auth]
//! jwt_secret = "${JWT_SECRET}"
//! token_ttl_hours = 8
//! ```
//!
//! Environment overrides (applied after the file):
//! `REPORTING_PROVIDER`, `MYSQL_HOST`, `MYSQL_PORT`, `MYSQL_DATABASE`,
//! `MYSQL_USER`, `MYSQL_PASSWORD`, `MYSQL_POOL_SIZE`, `JWT_SECRET`, `PORT`,
//! `CLIENT_URL`.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::connection::{MySqlSettings, Provider};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CONDO_REPORTS_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnvValue { name: String, value: String },

    #[error(transparent)]
    Connection(#[from] super::connection::ConnectionError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// HTTP listener.
    pub server: ServerSettings,

    /// Provider selection.
    pub reporting: ReportingSettings,

    /// Relational store.
    pub mysql: MySqlSettings,

    /// Bearer token verification.
    pub auth: AuthSettings,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Origin of the single-page client, allowed by CORS. Any origin when unset.
    pub client_url: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            client_url: None,
        }
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Reporting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportingSettings {
    /// Active provider: "mysql" (default), "mongo" or "mongodb".
    pub provider: String,
}

impl Default for ReportingSettings {
    fn default() -> Self {
        Self {
            provider: "mysql".to_string(),
        }
    }
}

/// Token configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthSettings {
    /// HMAC secret shared with the login backend.
    pub jwt_secret: String,

    /// Lifetime of tokens minted by `condo-reports token`.
    pub token_ttl_hours: i64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: 8,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings the way the server does at startup: config file (or
    /// defaults) with `${VAR}` expansion, then environment overrides.
    ///
    /// Searches in order:
    /// 1. Environment variable `CONDO_REPORTS_CONFIG`
    /// 2. `./condo-reports.toml`
    /// 3. `~/.config/condo-reports/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_file()?.resolve(|name| env::var(name).ok())
    }

    /// Expand `${VAR}` references in file values, then apply overrides.
    /// Override values are taken verbatim, so a secret may contain `$`.
    pub fn resolve<F>(mut self, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.expand_env()?;
        self.apply_overrides(lookup)?;
        Ok(self)
    }

    fn load_file() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("condo-reports.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("condo-reports").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Apply environment-style overrides. `lookup` returns the value of a
    /// variable, or `None` when unset.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("REPORTING_PROVIDER") {
            self.reporting.provider = v;
        }
        if let Some(v) = lookup("MYSQL_HOST") {
            self.mysql.host = v;
        }
        if let Some(v) = lookup("MYSQL_PORT") {
            self.mysql.port = parse_override("MYSQL_PORT", &v)?;
        }
        if let Some(v) = lookup("MYSQL_DATABASE") {
            self.mysql.database = v;
        }
        if let Some(v) = lookup("MYSQL_USER") {
            self.mysql.user = v;
        }
        if let Some(v) = lookup("MYSQL_PASSWORD") {
            self.mysql.password = v;
        }
        if let Some(v) = lookup("MYSQL_POOL_SIZE") {
            self.mysql.pool_size = parse_override("MYSQL_POOL_SIZE", &v)?;
        }
        if let Some(v) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = parse_override("PORT", &v)?;
        }
        if let Some(v) = lookup("CLIENT_URL") {
            self.server.client_url = Some(v);
        }
        Ok(())
    }

    /// Expand `${VAR}` references in string values that commonly hold secrets.
    pub fn expand_env(&mut self) -> Result<(), SettingsError> {
        self.mysql.password = expand_env_vars(&self.mysql.password)?;
        self.auth.jwt_secret = expand_env_vars(&self.auth.jwt_secret)?;
        if let Some(url) = &self.server.client_url {
            self.server.client_url = Some(expand_env_vars(url)?);
        }
        Ok(())
    }

    /// The configured reporting provider.
    pub fn provider(&self) -> Result<Provider, SettingsError> {
        Ok(Provider::from_str(&self.reporting.provider)?)
    }

    /// Validate everything the server needs before it binds.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let provider = self.provider()?;
        if provider == Provider::MySql {
            self.mysql.validate()?;
        }
        if self.auth.jwt_secret.is_empty() {
            return Err(SettingsError::InvalidConfig(
                "auth.jwt_secret (JWT_SECRET) must be set".into(),
            ));
        }
        if self.auth.token_ttl_hours <= 0 {
            return Err(SettingsError::InvalidConfig(
                "auth.token_ttl_hours must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidEnvValue {
            name: name.to_string(),
            value: value.to_string(),
        })
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if !(ch.is_alphanumeric() || ch == '_') {
                    break;
                }
                var_name.push(ch);
                chars.next();
            }
            if var_name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
