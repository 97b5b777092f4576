//! # Alumnitrack Models
//!
//! Domain models and DTOs for the Alumnitrack API.
//!
//! - [`ids`]: strongly-typed identifiers
//! - [`users`]: user accounts and registration
//! - [`alumni`]: alumni records
//! - [`jobs`]: job records and their active/trashed lifecycle
//! - [`auth`]: login request and response
//!
//! These types never mention storage columns. Adapters in `alumnitrack-db`
//! convert between rows and the domain types here.

pub mod alumni;
pub mod auth;
pub mod ids;
pub mod jobs;
pub mod users;

pub use alumni::{Alumni, AlumniSortField, CreateAlumniDto, UpdateAlumniDto};
pub use auth::{LoginRequest, LoginResponse, MessageResponse};
pub use ids::{AlumniId, JobId, UserId};
pub use jobs::{
    CreateJobDto, JobRecord, JobSortField, JobState, OwnerFilter, TransitionResponse,
    TrashSortField, UpdateJobDto,
};
pub use users::{NewUser, RegisterRequest, User, UserSortField};

pub use alumnitrack_auth::UserRole;
