//! # Alumnitrack Core
//!
//! Core types, errors, and utilities for the Alumnitrack API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: List query normalization and pagination metadata
//! - [`password`]: Password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers for query strings
//!
//! # Example
//!
//! ```ignore
//! use alumnitrack_core::errors::AppError;
//! use alumnitrack_core::pagination::{ListParams, ListQuery};
//! use alumnitrack_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Alumni not found"));
//! let hash = hash_password("secret1")?;
//! let query: ListQuery<JobSortField> = ListParams::default().normalize(JobSortField::Id, SortOrder::Asc);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

pub use errors::AppError;
pub use pagination::{ListParams, ListQuery, Paginated, PaginationMeta, SortField, SortOrder};
pub use password::{hash_password, verify_password};
