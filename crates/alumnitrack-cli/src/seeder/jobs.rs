//! Job seeding.

use std::time::Instant;

use alumnitrack_models::{AlumniId, JobId};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::company::en::{CatchPhrase, CompanyName, Industry, Profession};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use super::SeedResult;
use super::models::{JobSeed, SEED_EMAIL_DOMAIN};

const SALARY_RANGES: &[&str] = &["< 5 juta", "5-10 juta", "10-15 juta", "15-25 juta", "> 25 juta"];

// 12 params per job
const BATCH_SIZE: usize = 1000;

/// A generated job and, for trashed jobs, when it was deleted.
pub struct GeneratedJob {
    pub seed: JobSeed,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Generates `per_alumni` jobs for each alumni. Jobs of one alumni are
/// consecutive: every job but the last has ended.
pub fn generate_jobs(alumni_ids: &[AlumniId], per_alumni: usize, trashed_ratio: f64) -> Vec<GeneratedJob> {
    let today = Utc::now().date_naive();

    alumni_ids
        .par_iter()
        .flat_map(|&alumni_id| {
            let mut start = today - Duration::days(365 * per_alumni as i64 + (0..365).fake::<i64>());
            let mut jobs = Vec::with_capacity(per_alumni);

            for n in 0..per_alumni {
                let is_current = n + 1 == per_alumni;
                let end = if is_current {
                    None
                } else {
                    Some(start + Duration::days((180..365).fake::<i64>()))
                };

                jobs.push(GeneratedJob {
                    seed: generate_one(alumni_id, start, end),
                    deleted_at: should_trash(trashed_ratio)
                        .then(|| Utc::now() - Duration::days((1..60).fake::<i64>())),
                });

                if let Some(end) = end {
                    start = end + Duration::days((7..60).fake::<i64>());
                }
            }

            jobs
        })
        .collect()
}

fn should_trash(ratio: f64) -> bool {
    ratio > 0.0 && (0.0..1.0).fake::<f64>() < ratio
}

fn generate_one(alumni_id: AlumniId, start_date: NaiveDate, end_date: Option<NaiveDate>) -> JobSeed {
    let employer: String = CompanyName().fake();
    let position: String = Profession().fake();
    let description: String = CatchPhrase().fake();

    JobSeed {
        alumni_id,
        employer,
        position,
        industry: Industry().fake(),
        location: CityName().fake(),
        salary_range: Some(SALARY_RANGES[(0..SALARY_RANGES.len()).fake::<usize>()].to_string()),
        start_date,
        end_date,
        employment_status: if end_date.is_some() { "ended" } else { "active" },
        description: Some(format!("{} (since {})", description, start_date.year())),
    }
}

pub async fn seed_jobs(
    db: &PgPool,
    alumni_ids: &[AlumniId],
    per_alumni: usize,
    trashed_ratio: f64,
) -> SeedResult<Vec<JobId>> {
    let start_time = Instant::now();
    println!(
        "💼 Seeding {} jobs ({} per alumni)...",
        alumni_ids.len() * per_alumni,
        per_alumni
    );

    let jobs = generate_jobs(alumni_ids, per_alumni, trashed_ratio);
    let trashed = jobs.iter().filter(|j| j.deleted_at.is_some()).count();
    let ids = insert_jobs_batch(db, &jobs).await?;

    println!(
        "   ✓ Inserted {} jobs ({} trashed) in {:?}",
        ids.len(),
        trashed,
        start_time.elapsed()
    );

    Ok(ids)
}

pub async fn insert_jobs_batch(db: &PgPool, jobs: &[GeneratedJob]) -> SeedResult<Vec<JobId>> {
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(jobs.len());

    for chunk in jobs.chunks(BATCH_SIZE) {
        ids.extend(insert_jobs_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(ids)
}

async fn insert_jobs_chunk(
    tx: &mut Transaction<'_, Postgres>,
    jobs: &[GeneratedJob],
) -> SeedResult<Vec<JobId>> {
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb = QueryBuilder::<Postgres>::new(
        "INSERT INTO jobs (id, alumni_id, employer, position, industry, location, salary_range, \
         start_date, end_date, employment_status, description, deleted_at) ",
    );
    qb.push_values(jobs, |mut row, job| {
        let j = &job.seed;
        row.push_bind(JobId::new())
            .push_bind(j.alumni_id)
            .push_bind(&j.employer)
            .push_bind(&j.position)
            .push_bind(&j.industry)
            .push_bind(&j.location)
            .push_bind(&j.salary_range)
            .push_bind(j.start_date)
            .push_bind(j.end_date)
            .push_bind(j.employment_status)
            .push_bind(&j.description)
            .push_bind(job.deleted_at);
    });
    qb.push(" RETURNING id");

    let ids: Vec<JobId> = qb.build_query_scalar().fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Hard-deletes every job, active or trashed, owned by a seeded alumni.
pub async fn clear_jobs(db: &PgPool) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing jobs of seeded alumni...");

    let result = sqlx::query(
        "DELETE FROM jobs WHERE alumni_id IN (SELECT id FROM alumni WHERE email LIKE $1)",
    )
    .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
    .execute(db)
    .await?
    .rows_affected();

    println!(
        "   ✓ Deleted {} jobs in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
