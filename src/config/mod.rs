//! Configuration module for schemagen.
//!
//! Handles connection configuration, environment variables, and settings.

mod connection;
mod settings;

pub use connection::{database_from_url, ConnectionConfig, ConnectionError, DEFAULT_PORT};
pub use settings::{
    expand_env_vars, ConnectionSettings, PoolSettings, RelationSettings, Settings, SettingsError,
};
