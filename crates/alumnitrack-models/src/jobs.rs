//! Job records and their soft-delete lifecycle.
//!
//! A job is either [`JobState::Active`] or [`JobState::Trashed`]. Trashed
//! jobs can be restored to active or removed permanently. Storage adapters
//! map the state onto whatever they persist (a nullable `deleted_at`
//! column for PostgreSQL); nothing above the adapters sees that column.

use alumnitrack_core::SortField;
use alumnitrack_core::serde::deserialize_optional_uuid;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::ids::{AlumniId, JobId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    Active,
    Trashed { deleted_at: DateTime<Utc> },
}

impl JobState {
    pub fn is_active(&self) -> bool {
        matches!(self, JobState::Active)
    }

    pub fn is_trashed(&self) -> bool {
        matches!(self, JobState::Trashed { .. })
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            JobState::Active => None,
            JobState::Trashed { deleted_at } => Some(*deleted_at),
        }
    }
}

impl From<Option<DateTime<Utc>>> for JobState {
    fn from(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            None => JobState::Active,
            Some(deleted_at) => JobState::Trashed { deleted_at },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JobRecord {
    pub id: JobId,
    /// Owning alumni. Never changes after creation.
    pub alumni_id: AlumniId,
    pub employer: String,
    pub position: String,
    pub industry: String,
    pub location: String,
    pub salary_range: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub employment_status: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: JobState,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_job_dates"))]
pub struct CreateJobDto {
    pub alumni_id: AlumniId,
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "PT Telkom Indonesia")]
    pub employer: String,
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Backend Engineer")]
    pub position: String,
    #[validate(length(min = 1, max = 255))]
    pub industry: String,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    #[validate(length(max = 100))]
    #[schema(example = "10-15 juta")]
    pub salary_range: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_employment_status")]
    #[validate(length(min = 1, max = 50))]
    pub employment_status: String,
    pub description: Option<String>,
}

fn default_employment_status() -> String {
    "active".to_string()
}

fn validate_job_dates(dto: &CreateJobDto) -> Result<(), ValidationError> {
    match dto.end_date {
        Some(end) if end < dto.start_date => {
            let mut err = ValidationError::new("end_before_start");
            err.message = Some("end_date must not be before start_date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

/// Only employer, position and salary range are mutable.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateJobDto {
    #[validate(length(min = 1, max = 255))]
    pub employer: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub position: Option<String>,
    #[validate(length(max = 100))]
    pub salary_range: Option<String>,
}

impl UpdateJobDto {
    pub fn is_empty(&self) -> bool {
        self.employer.is_none() && self.position.is_none() && self.salary_range.is_none()
    }
}

/// Optional `?alumni_id=` filter on delete, restore and hard-delete.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnerFilter {
    /// Restrict the operation to this alumni's jobs (admin only)
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    #[param(value_type = Option<String>, format = "uuid")]
    pub alumni_id: Option<Uuid>,
}

impl OwnerFilter {
    pub fn alumni_id(&self) -> Option<AlumniId> {
        self.alumni_id.map(AlumniId::from)
    }
}

/// Result of a lifecycle transition.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransitionResponse {
    pub message: String,
    /// Number of job records that changed state
    pub affected: u64,
}

/// Sort fields of the active job listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSortField {
    Id,
    AlumniId,
    Employer,
    Position,
    Industry,
    Location,
    SalaryRange,
}

impl SortField for JobSortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(JobSortField::Id),
            "alumni_id" => Some(JobSortField::AlumniId),
            "employer" => Some(JobSortField::Employer),
            "position" => Some(JobSortField::Position),
            "industry" => Some(JobSortField::Industry),
            "location" => Some(JobSortField::Location),
            "salary_range" => Some(JobSortField::SalaryRange),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            JobSortField::Id => "id",
            JobSortField::AlumniId => "alumni_id",
            JobSortField::Employer => "employer",
            JobSortField::Position => "position",
            JobSortField::Industry => "industry",
            JobSortField::Location => "location",
            JobSortField::SalaryRange => "salary_range",
        }
    }
}

/// Sort fields of the trash listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashSortField {
    Id,
    AlumniId,
    Employer,
    Position,
    DeletedAt,
}

impl SortField for TrashSortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(TrashSortField::Id),
            "alumni_id" => Some(TrashSortField::AlumniId),
            "employer" => Some(TrashSortField::Employer),
            "position" => Some(TrashSortField::Position),
            "deleted_at" => Some(TrashSortField::DeletedAt),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            TrashSortField::Id => "id",
            TrashSortField::AlumniId => "alumni_id",
            TrashSortField::Employer => "employer",
            TrashSortField::Position => "position",
            TrashSortField::DeletedAt => "deleted_at",
        }
    }
}
