use std::time::Duration;

use alumnitrack_core::ListQuery;
use alumnitrack_models::{
    AlumniId, CreateJobDto, JobId, JobRecord, JobSortField, JobState, TrashSortField,
    UpdateJobDto,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use super::{push_page, push_search};
use crate::store::{JobStore, StoreResult};
use crate::timeout::bounded;

macro_rules! job_columns {
    () => {
        "id, alumni_id, employer, position, industry, location, salary_range, start_date, \
         end_date, employment_status, description, created_at, updated_at, deleted_at"
    };
}

/// Storage shape of a job. `deleted_at` is the only place the trash state
/// exists as a nullable column.
#[derive(FromRow)]
struct JobRow {
    id: JobId,
    alumni_id: AlumniId,
    employer: String,
    position: String,
    industry: String,
    location: String,
    salary_range: Option<String>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    employment_status: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<JobRow> for JobRecord {
    fn from(row: JobRow) -> Self {
        JobRecord {
            id: row.id,
            alumni_id: row.alumni_id,
            employer: row.employer,
            position: row.position,
            industry: row.industry,
            location: row.location,
            salary_range: row.salary_range,
            start_date: row.start_date,
            end_date: row.end_date,
            employment_status: row.employment_status,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
            state: JobState::from(row.deleted_at),
        }
    }
}

fn active_sort_column(field: JobSortField) -> &'static str {
    match field {
        JobSortField::Id => "id",
        JobSortField::AlumniId => "alumni_id",
        JobSortField::Employer => "employer",
        JobSortField::Position => "position",
        JobSortField::Industry => "industry",
        JobSortField::Location => "location",
        JobSortField::SalaryRange => "salary_range",
    }
}

fn trash_sort_column(field: TrashSortField) -> &'static str {
    match field {
        TrashSortField::Id => "id",
        TrashSortField::AlumniId => "alumni_id",
        TrashSortField::Employer => "employer",
        TrashSortField::Position => "position",
        TrashSortField::DeletedAt => "deleted_at",
    }
}

const ACTIVE_SEARCH: [&str; 6] = [
    "alumni_id::text",
    "employer",
    "position",
    "industry",
    "location",
    "salary_range",
];
const TRASH_SEARCH: [&str; 3] = ["alumni_id::text", "employer", "position"];

#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgJobStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn execute(
        &self,
        operation: &'static str,
        sql: &'static str,
        id: Option<JobId>,
        owner: Option<AlumniId>,
    ) -> StoreResult<u64> {
        bounded(self.timeout, operation, async {
            let mut query = sqlx::query(sql);
            if let Some(id) = id {
                query = query.bind(id);
            }
            let result = query.bind(owner).execute(&self.pool).await?;
            Ok(result.rows_affected())
        })
        .await
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    #[instrument(skip(self), fields(db.table = "jobs", db.operation = "find_by_owner"))]
    async fn find_by_owner(&self, owner: AlumniId) -> StoreResult<Vec<JobRecord>> {
        bounded(self.timeout, "jobs.find_by_owner", async {
            let rows = sqlx::query_as::<_, JobRow>(concat!(
                "SELECT ",
                job_columns!(),
                " FROM jobs WHERE alumni_id = $1 AND deleted_at IS NULL ORDER BY start_date DESC, id"
            ))
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows.into_iter().map(JobRecord::from).collect())
        })
        .await
    }

    #[instrument(skip(self), fields(db.table = "jobs", db.operation = "find_by_id"))]
    async fn find_by_id(&self, id: JobId) -> StoreResult<Option<JobRecord>> {
        bounded(self.timeout, "jobs.find_by_id", async {
            let row = sqlx::query_as::<_, JobRow>(concat!(
                "SELECT ",
                job_columns!(),
                " FROM jobs WHERE id = $1"
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row.map(JobRecord::from))
        })
        .await
    }

    #[instrument(skip(self), fields(db.table = "jobs", db.operation = "count_by_owner"))]
    async fn count_by_owner(&self, owner: AlumniId) -> StoreResult<i64> {
        bounded(self.timeout, "jobs.count_by_owner", async {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE alumni_id = $1")
                .bind(owner)
                .fetch_one(&self.pool)
                .await?;
            Ok(count)
        })
        .await
    }

    #[instrument(skip(self, dto), fields(db.table = "jobs", db.operation = "insert", alumni.id = %dto.alumni_id))]
    async fn create(&self, dto: CreateJobDto) -> StoreResult<JobRecord> {
        bounded(self.timeout, "jobs.create", async {
            let row = sqlx::query_as::<_, JobRow>(concat!(
                "INSERT INTO jobs (id, alumni_id, employer, position, industry, location, ",
                "salary_range, start_date, end_date, employment_status, description) ",
                "VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING ",
                job_columns!()
            ))
            .bind(JobId::new())
            .bind(dto.alumni_id)
            .bind(&dto.employer)
            .bind(&dto.position)
            .bind(&dto.industry)
            .bind(&dto.location)
            .bind(&dto.salary_range)
            .bind(dto.start_date)
            .bind(dto.end_date)
            .bind(&dto.employment_status)
            .bind(&dto.description)
            .fetch_one(&self.pool)
            .await?;
            Ok(JobRecord::from(row))
        })
        .await
    }

    #[instrument(skip(self, dto), fields(db.table = "jobs", db.operation = "update"))]
    async fn update(&self, id: JobId, dto: UpdateJobDto) -> StoreResult<Option<JobRecord>> {
        bounded(self.timeout, "jobs.update", async {
            let row = sqlx::query_as::<_, JobRow>(concat!(
                "UPDATE jobs SET employer = COALESCE($2, employer), position = COALESCE($3, position), ",
                "salary_range = COALESCE($4, salary_range), updated_at = NOW() ",
                "WHERE id = $1 AND deleted_at IS NULL RETURNING ",
                job_columns!()
            ))
            .bind(id)
            .bind(&dto.employer)
            .bind(&dto.position)
            .bind(&dto.salary_range)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row.map(JobRecord::from))
        })
        .await
    }

    #[instrument(skip(self), fields(db.table = "jobs", db.operation = "search"))]
    async fn search(&self, query: &ListQuery<JobSortField>) -> StoreResult<(Vec<JobRecord>, i64)> {
        bounded(self.timeout, "jobs.search", async {
            let mut count =
                QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs WHERE deleted_at IS NULL");
            push_search(&mut count, query.search.as_deref(), &ACTIVE_SEARCH, &[]);
            let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

            let mut select = QueryBuilder::<Postgres>::new(concat!(
                "SELECT ",
                job_columns!(),
                " FROM jobs WHERE deleted_at IS NULL"
            ));
            push_search(&mut select, query.search.as_deref(), &ACTIVE_SEARCH, &[]);
            push_page(
                &mut select,
                active_sort_column(query.sort_by),
                query.order,
                query.limit,
                query.offset(),
            );
            let rows: Vec<JobRow> = select.build_query_as().fetch_all(&self.pool).await?;

            Ok((rows.into_iter().map(JobRecord::from).collect(), total))
        })
        .await
    }

    #[instrument(skip(self), fields(db.table = "jobs", db.operation = "search_trash"))]
    async fn search_trash(
        &self,
        query: &ListQuery<TrashSortField>,
        owner: Option<AlumniId>,
    ) -> StoreResult<(Vec<JobRecord>, i64)> {
        bounded(self.timeout, "jobs.search_trash", async {
            let mut count = QueryBuilder::<Postgres>::new(
                "SELECT COUNT(*) FROM jobs WHERE deleted_at IS NOT NULL",
            );
            if let Some(owner) = owner {
                count.push(" AND alumni_id = ").push_bind(owner);
            }
            push_search(&mut count, query.search.as_deref(), &TRASH_SEARCH, &[]);
            let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

            let mut select = QueryBuilder::<Postgres>::new(concat!(
                "SELECT ",
                job_columns!(),
                " FROM jobs WHERE deleted_at IS NOT NULL"
            ));
            if let Some(owner) = owner {
                select.push(" AND alumni_id = ").push_bind(owner);
            }
            push_search(&mut select, query.search.as_deref(), &TRASH_SEARCH, &[]);
            push_page(
                &mut select,
                trash_sort_column(query.sort_by),
                query.order,
                query.limit,
                query.offset(),
            );
            let rows: Vec<JobRow> = select.build_query_as().fetch_all(&self.pool).await?;

            Ok((rows.into_iter().map(JobRecord::from).collect(), total))
        })
        .await
    }

    #[instrument(skip(self), fields(db.table = "jobs", db.operation = "soft_delete_one"))]
    async fn soft_delete_one(&self, id: JobId, owner: Option<AlumniId>) -> StoreResult<u64> {
        self.execute(
            "jobs.soft_delete_one",
            "UPDATE jobs SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL AND ($2::uuid IS NULL OR alumni_id = $2)",
            Some(id),
            owner,
        )
        .await
    }

    #[instrument(skip(self), fields(db.table = "jobs", db.operation = "soft_delete_all_for_owner"))]
    async fn soft_delete_all_for_owner(&self, owner: AlumniId) -> StoreResult<u64> {
        self.execute(
            "jobs.soft_delete_all_for_owner",
            "UPDATE jobs SET deleted_at = NOW(), updated_at = NOW() \
             WHERE alumni_id = $1 AND deleted_at IS NULL",
            None,
            Some(owner),
        )
        .await
    }

    #[instrument(skip(self), fields(db.table = "jobs", db.operation = "restore_one"))]
    async fn restore_one(&self, id: JobId, owner: Option<AlumniId>) -> StoreResult<u64> {
        self.execute(
            "jobs.restore_one",
            "UPDATE jobs SET deleted_at = NULL, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NOT NULL AND ($2::uuid IS NULL OR alumni_id = $2)",
            Some(id),
            owner,
        )
        .await
    }

    #[instrument(skip(self), fields(db.table = "jobs", db.operation = "restore_all_for_owner"))]
    async fn restore_all_for_owner(&self, owner: AlumniId) -> StoreResult<u64> {
        self.execute(
            "jobs.restore_all_for_owner",
            "UPDATE jobs SET deleted_at = NULL, updated_at = NOW() \
             WHERE alumni_id = $1 AND deleted_at IS NOT NULL",
            None,
            Some(owner),
        )
        .await
    }

    #[instrument(skip(self), fields(db.table = "jobs", db.operation = "hard_delete_one"))]
    async fn hard_delete_one(&self, id: JobId, owner: Option<AlumniId>) -> StoreResult<u64> {
        self.execute(
            "jobs.hard_delete_one",
            "DELETE FROM jobs \
             WHERE id = $1 AND deleted_at IS NOT NULL AND ($2::uuid IS NULL OR alumni_id = $2)",
            Some(id),
            owner,
        )
        .await
    }

    #[instrument(skip(self), fields(db.table = "jobs", db.operation = "hard_delete_all_for_owner"))]
    async fn hard_delete_all_for_owner(&self, owner: AlumniId) -> StoreResult<u64> {
        self.execute(
            "jobs.hard_delete_all_for_owner",
            "DELETE FROM jobs WHERE alumni_id = $1 AND deleted_at IS NOT NULL",
            None,
            Some(owner),
        )
        .await
    }
}
