use std::time::Duration;

use alumnitrack_core::ListQuery;
use alumnitrack_models::{Alumni, AlumniId, AlumniSortField, CreateAlumniDto, UpdateAlumniDto};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use super::{push_page, push_search};
use crate::store::{AlumniStore, StoreResult};
use crate::timeout::bounded;

macro_rules! alumni_columns {
    () => {
        "id, nim, name, major, entry_year, graduation_year, email, phone, address, created_at, updated_at"
    };
}

fn sort_column(field: AlumniSortField) -> &'static str {
    match field {
        AlumniSortField::Id => "id",
        AlumniSortField::Name => "name",
        AlumniSortField::EntryYear => "entry_year",
        AlumniSortField::Major => "major",
        AlumniSortField::Email => "email",
    }
}

#[derive(Clone)]
pub struct PgAlumniStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgAlumniStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl AlumniStore for PgAlumniStore {
    #[instrument(skip(self), fields(db.table = "alumni", db.operation = "find_by_id"))]
    async fn find_by_id(&self, id: AlumniId) -> StoreResult<Option<Alumni>> {
        bounded(self.timeout, "alumni.find_by_id", async {
            let row = sqlx::query_as::<_, Alumni>(concat!(
                "SELECT ",
                alumni_columns!(),
                " FROM alumni WHERE id = $1"
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        })
        .await
    }

    #[instrument(skip(self), fields(db.table = "alumni", db.operation = "exists"))]
    async fn exists(&self, id: AlumniId) -> StoreResult<bool> {
        bounded(self.timeout, "alumni.exists", async {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM alumni WHERE id = $1)")
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await?;
            Ok(exists)
        })
        .await
    }

    #[instrument(skip(self, dto), fields(db.table = "alumni", db.operation = "insert", alumni.nim = %dto.nim))]
    async fn create(&self, dto: CreateAlumniDto) -> StoreResult<Alumni> {
        bounded(self.timeout, "alumni.create", async {
            let row = sqlx::query_as::<_, Alumni>(concat!(
                "INSERT INTO alumni (id, nim, name, major, entry_year, graduation_year, email, phone, address) ",
                "VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING ",
                alumni_columns!()
            ))
            .bind(AlumniId::new())
            .bind(&dto.nim)
            .bind(&dto.name)
            .bind(&dto.major)
            .bind(dto.entry_year)
            .bind(dto.graduation_year)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.address)
            .fetch_one(&self.pool)
            .await?;
            Ok(row)
        })
        .await
    }

    #[instrument(skip(self, dto), fields(db.table = "alumni", db.operation = "update"))]
    async fn update(&self, id: AlumniId, dto: UpdateAlumniDto) -> StoreResult<Option<Alumni>> {
        bounded(self.timeout, "alumni.update", async {
            let row = sqlx::query_as::<_, Alumni>(concat!(
                "UPDATE alumni SET name = COALESCE($2, name), major = COALESCE($3, major), ",
                "phone = COALESCE($4, phone), updated_at = NOW() WHERE id = $1 RETURNING ",
                alumni_columns!()
            ))
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.major)
            .bind(&dto.phone)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        })
        .await
    }

    #[instrument(skip(self), fields(db.table = "alumni", db.operation = "delete"))]
    async fn delete(&self, id: AlumniId) -> StoreResult<u64> {
        bounded(self.timeout, "alumni.delete", async {
            let result = sqlx::query("DELETE FROM alumni WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected())
        })
        .await
    }

    #[instrument(skip(self), fields(db.table = "alumni", db.operation = "search"))]
    async fn search(
        &self,
        query: &ListQuery<AlumniSortField>,
    ) -> StoreResult<(Vec<Alumni>, i64)> {
        bounded(self.timeout, "alumni.search", async {
            let text = ["name", "major", "email"];
            let exact = ["entry_year::text"];

            let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM alumni WHERE TRUE");
            push_search(&mut count, query.search.as_deref(), &text, &exact);
            let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

            let mut select = QueryBuilder::<Postgres>::new(concat!(
                "SELECT ",
                alumni_columns!(),
                " FROM alumni WHERE TRUE"
            ));
            push_search(&mut select, query.search.as_deref(), &text, &exact);
            push_page(
                &mut select,
                sort_column(query.sort_by),
                query.order,
                query.limit,
                query.offset(),
            );
            let rows: Vec<Alumni> = select.build_query_as().fetch_all(&self.pool).await?;

            Ok((rows, total))
        })
        .await
    }
}
