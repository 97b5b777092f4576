//! PostgreSQL backend.
//!
//! All queries are built at runtime. Sort columns come from closed enums,
//! search terms are always bound parameters, and `ILIKE` patterns have
//! their wildcard characters escaped so a term matches literally.

mod alumni;
mod jobs;
mod users;

pub use alumni::PgAlumniStore;
pub use jobs::PgJobStore;
pub use users::PgUserStore;

use sqlx::{Postgres, QueryBuilder};

/// Wraps `term` as a literal `ILIKE` substring pattern.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Appends ` AND (...)` matching `term` case-insensitively against
/// `text_columns` and exactly against `exact_columns`.
pub(crate) fn push_search(
    qb: &mut QueryBuilder<'_, Postgres>,
    term: Option<&str>,
    text_columns: &[&str],
    exact_columns: &[&str],
) {
    let Some(term) = term else {
        return;
    };
    let pattern = like_pattern(term);

    qb.push(" AND (");
    let mut separated = qb.separated(" OR ");
    for column in text_columns {
        separated
            .push(*column)
            .push_unseparated(" ILIKE ")
            .push_bind_unseparated(pattern.clone())
            .push_unseparated(" ESCAPE '\\'");
    }
    for column in exact_columns {
        separated
            .push(*column)
            .push_unseparated(" = ")
            .push_bind_unseparated(term.to_string());
    }
    qb.push(")");
}

/// Appends `ORDER BY`, `LIMIT` and `OFFSET`. `id` breaks ties so pages
/// never overlap.
pub(crate) fn push_page(
    qb: &mut QueryBuilder<'_, Postgres>,
    column: &'static str,
    order: alumnitrack_core::SortOrder,
    limit: i64,
    offset: i64,
) {
    qb.push(" ORDER BY ")
        .push(column)
        .push(" ")
        .push(order.as_sql());
    if column != "id" {
        qb.push(", id ").push(order.as_sql());
    }
    qb.push(" LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumnitrack_core::SortOrder;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("acme"), "%acme%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_push_search_without_term_adds_nothing() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM jobs WHERE deleted_at IS NULL");
        push_search(&mut qb, None, &["employer"], &[]);
        assert_eq!(qb.sql(), "SELECT 1 FROM jobs WHERE deleted_at IS NULL");
    }

    #[test]
    fn test_push_search_binds_every_column() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM alumni WHERE TRUE");
        push_search(&mut qb, Some("2019"), &["name", "major"], &["entry_year::text"]);
        assert_eq!(
            qb.sql(),
            "SELECT 1 FROM alumni WHERE TRUE AND (name ILIKE $1 ESCAPE '\\' OR major ILIKE $2 ESCAPE '\\' OR entry_year::text = $3)"
        );
    }

    #[test]
    fn test_push_page_adds_tie_breaker() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM jobs");
        push_page(&mut qb, "employer", SortOrder::Desc, 10, 20);
        assert_eq!(
            qb.sql(),
            "SELECT 1 FROM jobs ORDER BY employer DESC, id DESC LIMIT $1 OFFSET $2"
        );

        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 FROM jobs");
        push_page(&mut qb, "id", SortOrder::Asc, 10, 0);
        assert_eq!(qb.sql(), "SELECT 1 FROM jobs ORDER BY id ASC LIMIT $1 OFFSET $2");
    }
}
