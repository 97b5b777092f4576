use crate::{ConfigError, env_source, parse_or};

/// Token lifetime used when `JWT_TTL_SECS` is unset: 24 hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub token_ttl_secs: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    /// Loads the signing configuration. `JWT_SECRET` is required; there is
    /// no built-in fallback secret.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(env_source)
    }

    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = get("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let token_ttl_secs = parse_or(&get, "JWT_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;

        if token_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_TTL_SECS",
                value: token_ttl_secs.to_string(),
            });
        }

        Ok(Self {
            secret,
            token_ttl_secs,
        })
    }
}

// The secret must never end up in logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}
