//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use serde_json::Value;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub database_pool_size: u32,
    pub log_level: Level,
    pub sessions_root: PathBuf,
    pub static_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub external_api_url: String,
    pub external_api_token: String,
    pub external_api_timeout: Duration,
    /// Key under which each request records its configuration entry.
    pub config_api_key: String,
    pub config_settings: Value,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source, applying defaults
    /// for every variable `lookup` does not know.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        // --- Server and Database Settings ---
        let bind_address = parse_value("BIND_ADDRESS", &var_or("BIND_ADDRESS", "0.0.0.0:5000"))?;
        let database_url = var_or("DATABASE_URL", "sqlite:relay.db?mode=rwc");
        let database_pool_size = parse_value("DATABASE_POOL_SIZE", &var_or("DATABASE_POOL_SIZE", "5"))?;
        let log_level = parse_log_level(&var_or("RUST_LOG", "INFO"))?;

        // --- Filesystem Locations ---
        let sessions_root = PathBuf::from(var_or("SESSIONS_ROOT", "."));
        let static_dir = PathBuf::from(var_or("STATIC_DIR", "static"));
        let templates_dir = PathBuf::from(var_or("TEMPLATES_DIR", "templates"));

        // --- External API ---
        let external_api_url = var_or("EXTERNAL_API_URL", "https://api.example.com/endpoint");
        let external_api_token = var_or("EXTERNAL_API_TOKEN", "YOUR_API_KEY");
        let external_api_timeout = Duration::from_secs(parse_value(
            "EXTERNAL_API_TIMEOUT_SECS",
            &var_or("EXTERNAL_API_TIMEOUT_SECS", "30"),
        )?);

        // --- Configuration Record ---
        let config_api_key = var_or("CONFIG_API_KEY", "example_api_key");
        let config_settings = parse_settings(&var_or("CONFIG_SETTINGS", r#"{"setting1":"value1"}"#))?;

        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN");

        Ok(Self {
            bind_address,
            database_url,
            database_pool_size,
            log_level,
            sessions_root,
            static_dir,
            templates_dir,
            external_api_url,
            external_api_token,
            external_api_timeout,
            config_api_key,
            config_settings,
            cors_allowed_origin,
        })
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string()))
}

fn parse_log_level(raw: &str) -> Result<Level, ConfigError> {
    raw.parse::<Level>().map_err(|_| {
        ConfigError::InvalidValue(
            "RUST_LOG".to_string(),
            format!("'{}' is not a valid log level", raw),
        )
    })
}

/// `CONFIG_SETTINGS` must hold a JSON document.
pub fn parse_settings(raw: &str) -> Result<Value, ConfigError> {
    serde_json::from_str::<Value>(raw)
        .map_err(|e| ConfigError::InvalidValue("CONFIG_SETTINGS".to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    fn rejected_variable(result: Result<Config, ConfigError>) -> String {
        match result {
            Err(ConfigError::InvalidValue(name, _)) => name,
            Ok(config) => panic!("accepted invalid configuration: {config:?}"),
        }
    }

    #[test]
    fn unset_variables_fall_back_to_their_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database_url, "sqlite:relay.db?mode=rwc");
        assert_eq!(config.database_pool_size, 5);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.sessions_root, PathBuf::from("."));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.external_api_url, "https://api.example.com/endpoint");
        assert_eq!(config.external_api_token, "YOUR_API_KEY");
        assert_eq!(config.external_api_timeout, Duration::from_secs(30));
        assert_eq!(config.config_api_key, "example_api_key");
        assert_eq!(config.config_settings, json!({"setting1": "value1"}));
        assert!(config.cors_allowed_origin.is_none());
    }

    #[test]
    fn provided_variables_override_the_defaults() {
        let config = load(&[
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("RUST_LOG", "debug"),
            ("EXTERNAL_API_TIMEOUT_SECS", "3"),
            ("CONFIG_SETTINGS", r#"{"theme": "dark", "limits": [1, 2]}"#),
            ("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
        ])
        .unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.external_api_timeout, Duration::from_secs(3));
        assert_eq!(config.config_settings, json!({"theme": "dark", "limits": [1, 2]}));
        assert_eq!(config.cors_allowed_origin.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn settings_that_are_not_json_are_rejected() {
        assert!(matches!(
            parse_settings("not json"),
            Err(ConfigError::InvalidValue(name, _)) if name == "CONFIG_SETTINGS"
        ));
        assert_eq!(
            rejected_variable(load(&[("CONFIG_SETTINGS", "{setting1: value1}")])),
            "CONFIG_SETTINGS"
        );
    }

    #[test]
    fn malformed_values_name_the_offending_variable() {
        for (name, raw) in [
            ("BIND_ADDRESS", "localhost"),
            ("RUST_LOG", "chatty"),
            ("DATABASE_POOL_SIZE", "-1"),
            ("EXTERNAL_API_TIMEOUT_SECS", "soon"),
        ] {
            assert_eq!(rejected_variable(load(&[(name, raw)])), name);
        }
    }
}
