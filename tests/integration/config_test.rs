//! Configuration loading tests
//!
//! These tests modify process environment variables, so they run serially.

use serial_test::serial;
use snapshare::shared::{AppConfig, ConfigError};
use std::io::Write;

const VARS: [&str; 7] = [
    "SNAPSHARE_CONFIG",
    "PORT",
    "DATABASE_URL",
    "SESSION_SECRET",
    "SESSION_TTL_HOURS",
    "STATIC_DIR",
    "BCRYPT_COST",
];

/// Clears the configuration variables and restores them on drop
struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn clear() -> Self {
        let saved = VARS.iter().map(|var| (*var, std::env::var(var).ok())).collect();
        for var in VARS {
            std::env::remove_var(var);
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (var, value) in &self.saved {
            match value {
                Some(value) => std::env::set_var(var, value),
                None => std::env::remove_var(var),
            }
        }
    }
}

#[test]
#[serial]
fn test_from_env() {
    let _env = EnvGuard::clear();
    std::env::set_var("PORT", "8081");
    std::env::set_var("SESSION_SECRET", "env-secret");
    std::env::set_var("BCRYPT_COST", "5");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.port, 8081);
    assert_eq!(config.session_secret, "env-secret");
    assert_eq!(config.bcrypt_cost, 5);
    assert!(config.database_url.is_none());
}

#[test]
#[serial]
fn test_env_overrides_file() {
    let _env = EnvGuard::clear();
    let path = std::env::temp_dir().join(format!("snapshare-{}.toml", uuid::Uuid::new_v4()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "port = 4000\nsession_secret = \"file-secret\"\nsession_ttl_hours = 6").unwrap();

    std::env::set_var("SNAPSHARE_CONFIG", &path);
    std::env::set_var("PORT", "5000");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.port, 5000);
    assert_eq!(config.session_secret, "file-secret");
    assert_eq!(config.session_ttl_hours, 6);

    std::fs::remove_file(path).ok();
}

#[test]
#[serial]
fn test_missing_config_file() {
    let _env = EnvGuard::clear();
    std::env::set_var("SNAPSHARE_CONFIG", "/definitely/not/here.toml");

    let err = AppConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
#[serial]
fn test_session_ttl_is_capped() {
    let _env = EnvGuard::clear();
    std::env::set_var("SESSION_SECRET", "env-secret");
    std::env::set_var("SESSION_TTL_HOURS", "8761");

    let err = AppConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { key: "SESSION_TTL_HOURS", .. }));

    std::env::set_var("SESSION_TTL_HOURS", "8760");
    assert_eq!(AppConfig::from_env().unwrap().session_ttl_hours, 8760);
}
