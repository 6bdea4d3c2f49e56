//! Application configuration module
//!
//! Provides the server configuration and the ways to load it.
//!
//! # Sources
//!
//! Values are resolved in this order, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. A TOML file named by `SNAPSHARE_CONFIG`, if set
//! 3. Environment variables (`PORT`, `DATABASE_URL`, `SESSION_SECRET`,
//!    `SESSION_TTL_HOURS`, `STATIC_DIR`, `BCRYPT_COST`)
//!
//! A missing `DATABASE_URL` is not an error: the server then runs on the
//! in-memory store.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;
/// Default session lifetime
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 24;
/// Longest accepted session lifetime (one year)
pub const MAX_SESSION_TTL_HOURS: u64 = 24 * 365;
/// Default directory for static assets
pub const DEFAULT_STATIC_DIR: &str = "public";
/// bcrypt work factor used when none is configured (bcrypt's own default)
pub const DEFAULT_BCRYPT_COST: u32 = 12;

#[cfg(debug_assertions)]
const DEV_SESSION_SECRET: &str = "snapshare-development-secret-change-me";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server listens on
    pub port: u16,
    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// HMAC secret used to sign session tokens
    pub session_secret: String,
    /// Session token lifetime in hours
    pub session_ttl_hours: u64,
    /// Directory served for static assets
    pub static_dir: PathBuf,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

/// Shape of the optional TOML configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    port: Option<u16>,
    database_url: Option<String>,
    session_secret: Option<String>,
    session_ttl_hours: Option<u64>,
    static_dir: Option<PathBuf>,
    bcrypt_cost: Option<u32>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from `SNAPSHARE_CONFIG` and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    ///
    /// `lookup` plays the role of the environment; it is what `from_env`
    /// passes `std::env::var` through.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut builder = match lookup("SNAPSHARE_CONFIG") {
            Some(path) => {
                let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                AppConfigBuilder::from_toml_str(&text)?
            }
            None => AppConfigBuilder::default(),
        };

        if let Some(port) = lookup("PORT") {
            builder = builder.port(parse_var("PORT", &port)?);
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            builder = builder.database_url(url);
        }
        if let Some(secret) = lookup("SESSION_SECRET") {
            builder = builder.session_secret(secret);
        }
        if let Some(hours) = lookup("SESSION_TTL_HOURS") {
            builder = builder.session_ttl_hours(parse_var("SESSION_TTL_HOURS", &hours)?);
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            builder = builder.static_dir(dir);
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_var("BCRYPT_COST", &cost)?);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("SESSION_SECRET"));
        }
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&self.session_ttl_hours) {
            return Err(ConfigError::InvalidValue {
                key: "SESSION_TTL_HOURS",
                value: self.session_ttl_hours.to_string(),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    session_secret: Option<String>,
    session_ttl_hours: Option<u64>,
    static_dir: Option<PathBuf>,
    bcrypt_cost: Option<u32>,
}

impl AppConfigBuilder {
    /// Start from the contents of a TOML configuration file
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(text)?;
        Ok(Self {
            port: file.port,
            database_url: file.database_url,
            session_secret: file.session_secret,
            session_ttl_hours: file.session_ttl_hours,
            static_dir: file.static_dir,
            bcrypt_cost: file.bcrypt_cost,
        })
    }

    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the PostgreSQL connection string
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the session signing secret
    pub fn session_secret(mut self, secret: impl Into<String>) -> Self {
        self.session_secret = Some(secret.into());
        self
    }

    /// Set the session lifetime in hours
    pub fn session_ttl_hours(mut self, hours: u64) -> Self {
        self.session_ttl_hours = Some(hours);
        self
    }

    /// Set the static asset directory
    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self.database_url,
            session_secret: match self.session_secret {
                Some(secret) => secret,
                None => default_session_secret()?,
            },
            session_ttl_hours: self.session_ttl_hours.unwrap_or(DEFAULT_SESSION_TTL_HOURS),
            static_dir: self
                .static_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(debug_assertions)]
fn default_session_secret() -> Result<String, ConfigError> {
    tracing::warn!("SESSION_SECRET not set, using the development secret");
    Ok(DEV_SESSION_SECRET.to_string())
}

#[cfg(not(debug_assertions))]
fn default_session_secret() -> Result<String, ConfigError> {
    Err(ConfigError::MissingValue("SESSION_SECRET"))
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}
