//! Alumni records.

use alumnitrack_core::SortField;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::AlumniId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Alumni {
    pub id: AlumniId,
    /// Student number, unique across alumni.
    pub nim: String,
    pub name: String,
    pub major: String,
    pub entry_year: i32,
    pub graduation_year: Option<i32>,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAlumniDto {
    #[validate(length(min = 1, max = 32))]
    #[schema(example = "2019102030")]
    pub nim: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub major: String,
    #[validate(range(min = 1900, max = 2100))]
    pub entry_year: i32,
    #[validate(range(min = 1900, max = 2100))]
    pub graduation_year: Option<i32>,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Only name, major and phone are mutable. Absent fields are left as is.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAlumniDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub major: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
}

impl UpdateAlumniDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.major.is_none() && self.phone.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlumniSortField {
    Id,
    Name,
    EntryYear,
    Major,
    Email,
}

impl SortField for AlumniSortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(AlumniSortField::Id),
            "name" => Some(AlumniSortField::Name),
            "entry_year" => Some(AlumniSortField::EntryYear),
            "major" => Some(AlumniSortField::Major),
            "email" => Some(AlumniSortField::Email),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            AlumniSortField::Id => "id",
            AlumniSortField::Name => "name",
            AlumniSortField::EntryYear => "entry_year",
            AlumniSortField::Major => "major",
            AlumniSortField::Email => "email",
        }
    }
}
