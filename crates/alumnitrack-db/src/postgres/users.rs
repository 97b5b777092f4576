use std::time::Duration;

use alumnitrack_core::ListQuery;
use alumnitrack_models::{AlumniId, NewUser, User, UserId, UserRole, UserSortField};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use super::{push_page, push_search};
use crate::error::StoreError;
use crate::store::{StoreResult, UserStore};
use crate::timeout::bounded;

macro_rules! user_columns {
    () => {
        "id, username, email, password_hash, role, alumni_id, created_at"
    };
}

#[derive(FromRow)]
struct UserRow {
    id: UserId,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    alumni_id: Option<AlumniId>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<UserRole>()
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            role,
            alumni_id: row.alumni_id,
            created_at: row.created_at,
        })
    }
}

fn sort_column(field: UserSortField) -> &'static str {
    match field {
        UserSortField::Id => "id",
        UserSortField::Username => "username",
        UserSortField::Email => "email",
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgUserStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self), fields(db.table = "users", db.operation = "find_by_id"))]
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        bounded(self.timeout, "users.find_by_id", async {
            let row = sqlx::query_as::<_, UserRow>(concat!(
                "SELECT ",
                user_columns!(),
                " FROM users WHERE id = $1 AND deleted_at IS NULL"
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            row.map(User::try_from).transpose()
        })
        .await
    }

    #[instrument(skip(self), fields(db.table = "users", db.operation = "find_by_username"))]
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        bounded(self.timeout, "users.find_by_username", async {
            let row = sqlx::query_as::<_, UserRow>(concat!(
                "SELECT ",
                user_columns!(),
                " FROM users WHERE username = $1 AND deleted_at IS NULL"
            ))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
            row.map(User::try_from).transpose()
        })
        .await
    }

    #[instrument(skip(self, user), fields(db.table = "users", db.operation = "insert", user.username = %user.username))]
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        bounded(self.timeout, "users.create", async {
            let row = sqlx::query_as::<_, UserRow>(concat!(
                "INSERT INTO users (id, username, email, password_hash, role, alumni_id) ",
                "VALUES ($1, $2, $3, $4, $5, $6) RETURNING ",
                user_columns!()
            ))
            .bind(UserId::new())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.alumni_id)
            .fetch_one(&self.pool)
            .await?;
            User::try_from(row)
        })
        .await
    }

    #[instrument(skip(self), fields(db.table = "users", db.operation = "search"))]
    async fn search(&self, query: &ListQuery<UserSortField>) -> StoreResult<(Vec<User>, i64)> {
        bounded(self.timeout, "users.search", async {
            let text = ["username", "email"];

            let mut count =
                QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL");
            push_search(&mut count, query.search.as_deref(), &text, &[]);
            let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

            let mut select = QueryBuilder::<Postgres>::new(concat!(
                "SELECT ",
                user_columns!(),
                " FROM users WHERE deleted_at IS NULL"
            ));
            push_search(&mut select, query.search.as_deref(), &text, &[]);
            push_page(
                &mut select,
                sort_column(query.sort_by),
                query.order,
                query.limit,
                query.offset(),
            );
            let rows: Vec<UserRow> = select.build_query_as().fetch_all(&self.pool).await?;

            let users = rows
                .into_iter()
                .map(User::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            Ok((users, total))
        })
        .await
    }

    #[instrument(skip(self), fields(db.table = "users", db.operation = "soft_delete"))]
    async fn soft_delete(&self, id: UserId) -> StoreResult<u64> {
        bounded(self.timeout, "users.soft_delete", async {
            let result =
                sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
            Ok(result.rows_affected())
        })
        .await
    }
}
