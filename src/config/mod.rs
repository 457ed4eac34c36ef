//! Configuration module for the reporting service.
//!
//! Handles provider selection, relational connection settings, and the
//! TOML settings file. Everything here is read once at startup.

mod connection;
mod settings;

pub use connection::{ConnectionError, MySqlSettings, Provider};
pub use settings::{
    expand_env_vars, AuthSettings, ReportingSettings, ServerSettings, Settings, SettingsError,
    CONFIG_ENV_VAR,
};
