//! List query normalization and pagination metadata.
//!
//! Every listing endpoint (users, alumni, jobs, trash) accepts the same
//! query string:
//!
//! - `page`: 1-indexed page number, values `<= 0` become 1
//! - `limit`: page size, values `<= 0` become 10, capped at 100
//! - `search`: optional case-insensitive substring filter
//! - `sortBy`: field name checked against a per-entity allow-list
//! - `order`: `asc` or `desc`
//!
//! [`ListParams`] is the raw query; [`ListParams::normalize`] turns it into a
//! [`ListQuery`] whose sort field is a closed enum, so only allow-listed
//! columns can ever reach a storage backend.
//!
//! # Example
//!
//! ```ignore
//! let query = params.normalize(JobSortField::Id, SortOrder::Asc);
//! let (rows, total) = store.search(&query).await?;
//! Ok(Json(Paginated::new(rows, query.meta(total))))
//! ```

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::serde::{deserialize_lenient_i64, deserialize_optional_trimmed};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// A sortable field of a listed entity.
///
/// Implementors are closed enums; `parse` returns `None` for anything
/// outside the entity's allow-list.
pub trait SortField: Copy + Send + Sync + 'static {
    fn parse(name: &str) -> Option<Self>;

    /// Name as exposed in the API (`sortBy` value).
    fn as_str(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Raw listing query parameters.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: Option<i64>,
    /// Items per page (default: 10, max: 100)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub limit: Option<i64>,
    /// Case-insensitive substring filter
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub search: Option<String>,
    /// Sort field; unknown values fall back to the listing's default
    #[serde(default, rename = "sortBy")]
    pub sort_by: Option<String>,
    /// `asc` or `desc`
    #[serde(default)]
    pub order: Option<String>,
}

impl ListParams {
    pub fn normalize<F: SortField>(&self, default_field: F, default_order: SortOrder) -> ListQuery<F> {
        let page = match self.page {
            Some(p) if p > 0 => p,
            _ => DEFAULT_PAGE,
        };
        let limit = match self.limit {
            Some(l) if l > 0 => l.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        };
        let sort_by = self
            .sort_by
            .as_deref()
            .and_then(F::parse)
            .unwrap_or(default_field);
        let order = self
            .order
            .as_deref()
            .and_then(SortOrder::parse)
            .unwrap_or(default_order);

        ListQuery {
            page,
            limit,
            search: self.search.clone().filter(|s| !s.is_empty()),
            sort_by,
            order,
        }
    }
}

/// A normalized listing query. Every field holds a valid value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<F> {
    pub page: i64,
    pub limit: i64,
    pub search: Option<String>,
    pub sort_by: F,
    pub order: SortOrder,
}

impl<F> ListQuery<F> {
    /// Number of rows skipped before the current page. Saturates, so a huge
    /// page number lands past the last row instead of overflowing.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl<F: SortField> ListQuery<F> {
    pub fn new(sort_by: F, order: SortOrder) -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
            sort_by,
            order,
        }
    }

    #[must_use]
    pub fn meta(&self, total: i64) -> PaginationMeta {
        PaginationMeta {
            page: self.page,
            limit: self.limit,
            total,
            pages: total_pages(total, self.limit),
            sort_by: self.sort_by.as_str().to_string(),
            order: self.order,
            search: self.search.clone().unwrap_or_default(),
        }
    }
}

/// `ceil(total / limit)`, zero when there is nothing to show.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Metadata attached to every listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
    #[serde(rename = "sortBy")]
    pub sort_by: String,
    pub order: SortOrder,
    pub search: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, meta: PaginationMeta) -> Self {
        Self { data, meta }
    }
}
