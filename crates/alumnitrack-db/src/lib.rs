//! # Alumnitrack DB
//!
//! Storage for the Alumnitrack API.
//!
//! - [`store`]: the `UserStore`, `AlumniStore` and `JobStore` traits
//! - [`postgres`]: PostgreSQL implementations on a shared [`PgPool`]
//! - [`memory`]: in-memory implementations with the same semantics
//!
//! Services hold a [`Stores`] bundle of trait objects and never know which
//! backend is behind it.
//!
//! # Example
//!
//! ```ignore
//! use alumnitrack_config::DatabaseConfig;
//! use alumnitrack_db::Stores;
//!
//! let config = DatabaseConfig::from_env()?;
//! let stores = Stores::from_config(&config).await?;
//! let user = stores.users.find_by_username("alice").await?;
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;
mod timeout;

use std::sync::Arc;
use std::time::Duration;

use alumnitrack_config::{DatabaseConfig, StorageBackend};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use error::StoreError;
pub use sqlx::PgPool;
pub use store::{AlumniStore, JobStore, StoreResult, UserStore};

/// Creates a PostgreSQL connection pool from `config`.
///
/// # Errors
///
/// Fails when `DATABASE_URL` is missing or the database is unreachable.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let url = config
        .url
        .as_deref()
        .ok_or(StoreError::Unconfigured("DATABASE_URL"))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.store_timeout)
        .connect(url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies the migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// One handle per store, shared by every request.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub alumni: Arc<dyn AlumniStore>,
    pub jobs: Arc<dyn JobStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool, timeout: Duration) -> Self {
        Self {
            users: Arc::new(postgres::PgUserStore::new(pool.clone(), timeout)),
            alumni: Arc::new(postgres::PgAlumniStore::new(pool.clone(), timeout)),
            jobs: Arc::new(postgres::PgJobStore::new(pool, timeout)),
        }
    }

    pub fn in_memory(timeout: Duration) -> Self {
        Self {
            users: Arc::new(memory::MemoryUserStore::new(timeout)),
            alumni: Arc::new(memory::MemoryAlumniStore::new(timeout)),
            jobs: Arc::new(memory::MemoryJobStore::new(timeout)),
        }
    }

    /// Builds the configured backend. For PostgreSQL this connects and
    /// applies pending migrations.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, StoreError> {
        match config.backend {
            StorageBackend::Postgres => {
                let pool = init_db_pool(config).await?;
                run_migrations(&pool).await?;
                Ok(Self::postgres(pool, config.store_timeout))
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage; data is lost on shutdown");
                Ok(Self::in_memory(config.store_timeout))
            }
        }
    }
}
