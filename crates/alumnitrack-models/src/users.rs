//! User accounts.

use alumnitrack_auth::UserRole;
use alumnitrack_core::SortField;
use alumnitrack_core::serde::deserialize_trimmed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{AlumniId, UserId};

/// A live (not soft-deleted) user account.
///
/// The password hash is carried for credential checks and never
/// serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: UserRole,
    /// Alumni record this account speaks for, if any.
    pub alumni_id: Option<AlumniId>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Input for the credential store's `create`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub alumni_id: Option<AlumniId>,
}

/// Public registration request. Always creates a `user` account.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 3, max = 50))]
    #[schema(example = "alice")]
    pub username: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(email)]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub alumni_id: Option<AlumniId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortField {
    Id,
    Username,
    Email,
}

impl SortField for UserSortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(UserSortField::Id),
            "username" => Some(UserSortField::Username),
            "email" => Some(UserSortField::Email),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            UserSortField::Id => "id",
            UserSortField::Username => "username",
            UserSortField::Email => "email",
        }
    }
}
