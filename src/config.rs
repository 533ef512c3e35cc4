use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://recipes.db?mode=rwc";
pub const DEFAULT_SEED_PATH: &str = "recipes.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Which [`RecipeStore`](crate::store::RecipeStore) backend to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sql,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sql" | "sqlite" | "database" => Ok(Self::Sql),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!("expected 'sql' or 'memory', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub seed_path: PathBuf,
    pub bind_addr: String,
    pub store: StoreBackend,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            seed_path: PathBuf::from(DEFAULT_SEED_PATH),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            store: StoreBackend::Sql,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `RECIPE_STORE` or `REQUEST_TIMEOUT_SECS` is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `RECIPE_STORE` or `REQUEST_TIMEOUT_SECS` is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let store = match lookup("RECIPE_STORE") {
            Some(value) => value
                .parse::<StoreBackend>()
                .map_err(|reason| ConfigError::InvalidValue {
                    key: "RECIPE_STORE",
                    value,
                    reason,
                })?,
            None => defaults.store,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                Ok(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: "REQUEST_TIMEOUT_SECS",
                        value,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Err(err) => {
                    return Err(ConfigError::InvalidValue {
                        key: "REQUEST_TIMEOUT_SECS",
                        value,
                        reason: err.to_string(),
                    });
                }
            },
            None => defaults.request_timeout,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            seed_path: lookup("RECIPES_JSON").map_or(defaults.seed_path, PathBuf::from),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            store,
            request_timeout,
        })
    }
}
