//! Seed data and seeding configuration.

use alumnitrack_models::AlumniId;
use chrono::NaiveDate;

/// Domain of every seeded email address. `clear` only removes alumni
/// whose address ends with it.
pub const SEED_EMAIL_DOMAIN: &str = "example.com";

pub struct AlumniSeed {
    pub nim: String,
    pub name: String,
    pub major: String,
    pub entry_year: i32,
    pub graduation_year: Option<i32>,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

pub struct JobSeed {
    pub alumni_id: AlumniId,
    pub employer: String,
    pub position: String,
    pub industry: String,
    pub location: String,
    pub salary_range: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub employment_status: &'static str,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub num_alumni: usize,
    pub jobs_per_alumni: usize,
    /// Share of seeded jobs that start out in the trash, 0.0 to 1.0.
    pub trashed_ratio: f64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_alumni: 50,
            jobs_per_alumni: 2,
            trashed_ratio: 0.1,
        }
    }
}

impl SeedConfig {
    pub fn new(num_alumni: usize) -> Self {
        Self {
            num_alumni,
            ..Default::default()
        }
    }

    pub fn with_jobs_per_alumni(mut self, jobs: usize) -> Self {
        self.jobs_per_alumni = jobs;
        self
    }

    pub fn with_trashed_ratio(mut self, ratio: f64) -> Self {
        self.trashed_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn total_jobs(&self) -> usize {
        self.num_alumni * self.jobs_per_alumni
    }
}
