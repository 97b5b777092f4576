//! # Alumnitrack Config
//!
//! Configuration structures loaded once from environment variables at
//! startup and treated as read-only afterwards.
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`database`]: storage backend, connection target, and store timeout
//! - [`server`]: listen address
//! - [`cors`]: allowed CORS origins
//!
//! # Example
//!
//! ```ignore
//! use alumnitrack_config::{DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let db_config = DatabaseConfig::from_env()?;
//! let server = ServerConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::{DatabaseConfig, StorageBackend};
pub use jwt::JwtConfig;
pub use server::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Reads an optional variable and parses it, falling back to `default`
/// when unset. A present but unparsable value is an error.
pub(crate) fn parse_or<T, F>(get: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        _ => Ok(default),
    }
}

pub(crate) fn env_source(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
