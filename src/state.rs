use std::fmt;
use std::sync::Arc;

use alumnitrack_config::{CorsConfig, DatabaseConfig, JwtConfig};
use alumnitrack_db::Stores;
use alumnitrack_observability::MetricsHandle;

#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub jwt_config: Arc<JwtConfig>,
    pub cors_config: CorsConfig,
    /// Present when the Prometheus recorder is installed.
    pub metrics: Option<MetricsHandle>,
}

impl AppState {
    pub fn new(stores: Stores, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            stores,
            jwt_config: Arc::new(jwt_config),
            cors_config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Option<MetricsHandle>) -> Self {
        self.metrics = metrics;
        self
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &self.jwt_config)
            .field("cors_config", &self.cors_config)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}

/// Loads every configuration section from the environment and connects the
/// configured storage backend.
///
/// # Errors
///
/// Fails on missing `JWT_SECRET`, invalid values, or an unreachable
/// database.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    let stores = Stores::from_config(&db_config).await?;

    Ok(AppState::new(stores, jwt_config, CorsConfig::from_env()))
}
