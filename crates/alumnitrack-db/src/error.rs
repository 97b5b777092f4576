use alumnitrack_core::AppError;

/// Failure reported by a store.
///
/// Zero-row transitions are not errors at this level: mutating calls
/// return affected counts and the service layer decides what zero means.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("store operation timed out")]
    Timeout,
    #[error("stored value could not be decoded: {0}")]
    Decode(String),
    #[error("database error: {0}")]
    Database(sqlx::Error),
    #[error("{0} must be set")]
    Unconfigured(&'static str),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return StoreError::AlreadyExists(unique_field(db_err.constraint()));
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return StoreError::Conflict(
                        "Record is still referenced by other records".to_string(),
                    );
                }
                _ => {}
            }
        }
        if matches!(err, sqlx::Error::PoolTimedOut) {
            return StoreError::Timeout;
        }
        StoreError::Database(err)
    }
}

fn unique_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(c) if c.contains("username") => "username",
        Some(c) if c.contains("email") => "email",
        Some(c) if c.contains("nim") => "nim",
        _ => "record",
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::not_found(err),
            StoreError::AlreadyExists(_) | StoreError::Conflict(_) => AppError::conflict(err),
            StoreError::Timeout => AppError::unavailable(err),
            StoreError::Decode(_)
            | StoreError::Database(_)
            | StoreError::Unconfigured(_)
            | StoreError::Migrate(_) => AppError::internal(err),
        }
    }
}
