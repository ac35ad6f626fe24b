//! Database connection configuration.
//!
//! Supports configuration via environment variables:
//! - `SCHEMAGEN_DB_HOST`: Database server hostname
//! - `SCHEMAGEN_DB_NAME`: Database name
//! - `SCHEMAGEN_DB_PORT`: Port (optional, defaults to 3306)
//! - `SCHEMAGEN_DB_USER`: Username (optional)
//! - `SCHEMAGEN_DB_PASSWORD`: Password (optional)

use std::env;

use url::Url;

/// Default MySQL port.
pub const DEFAULT_PORT: u16 = 3306;

/// Error type for connection configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Database connection configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Server hostname.
    pub host: String,
    /// Port (optional).
    pub port: Option<u16>,
    /// Database name.
    pub database: String,
    /// Username.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
}

impl ConnectionConfig {
    /// Create a config for `database` on `host` without credentials.
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            database: database.into(),
            username: None,
            password: None,
        }
    }

    /// Set the credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `SCHEMAGEN_DB_HOST`
    /// - `SCHEMAGEN_DB_NAME`
    ///
    /// Optional:
    /// - `SCHEMAGEN_DB_PORT`, `SCHEMAGEN_DB_USER`, `SCHEMAGEN_DB_PASSWORD`
    pub fn from_env() -> Result<Self, ConnectionError> {
        let host = required_var("SCHEMAGEN_DB_HOST")?;
        let database = required_var("SCHEMAGEN_DB_NAME")?;

        let port = match env::var("SCHEMAGEN_DB_PORT") {
            Ok(p) => Some(p.parse().map_err(|_| {
                ConnectionError::InvalidConfig(format!("invalid port '{}'", p))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            host,
            port,
            database,
            username: env::var("SCHEMAGEN_DB_USER").ok(),
            password: env::var("SCHEMAGEN_DB_PASSWORD").ok(),
        })
    }

    /// Build a `mysql://` connection URL. Credentials are percent-encoded.
    pub fn to_url(&self) -> Result<String, ConnectionError> {
        let mut url = Url::parse(&format!("mysql://{}", self.host))
            .map_err(|e| ConnectionError::InvalidConfig(format!("invalid host: {}", e)))?;

        let invalid = |_| ConnectionError::InvalidConfig("host cannot carry credentials".into());

        url.set_port(Some(self.port.unwrap_or(DEFAULT_PORT)))
            .map_err(invalid)?;
        if let Some(user) = &self.username {
            url.set_username(user).map_err(invalid)?;
            url.set_password(self.password.as_deref()).map_err(invalid)?;
        }
        url.set_path(&format!("/{}", self.database));

        Ok(url.to_string())
    }
}

fn required_var(name: &str) -> Result<String, ConnectionError> {
    env::var(name).map_err(|_| ConnectionError::MissingEnvVar(name.to_string()))
}

/// Database name from the path of a connection URL, if any.
pub fn database_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let name = parsed.path().trim_start_matches('/');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
