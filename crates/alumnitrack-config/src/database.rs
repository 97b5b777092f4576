use std::time::Duration;

use crate::{ConfigError, env_source, parse_or};

/// Upper bound for a single storage operation when `STORE_TIMEOUT_SECS` is unset.
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    /// Required for [`StorageBackend::Postgres`].
    pub url: Option<String>,
    pub max_connections: u32,
    pub store_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(env_source)
    }

    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = parse_or(&get, "STORAGE_BACKEND", StorageBackend::Postgres)?;
        let url = get("DATABASE_URL").filter(|s| !s.trim().is_empty());

        if backend == StorageBackend::Postgres && url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let timeout_secs = parse_or(&get, "STORE_TIMEOUT_SECS", DEFAULT_STORE_TIMEOUT_SECS)?;

        Ok(Self {
            backend,
            url,
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 10)?,
            store_timeout: Duration::from_secs(timeout_secs.max(1)),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            url: None,
            max_connections: 1,
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        }
    }
}
