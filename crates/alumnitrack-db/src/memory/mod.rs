//! In-memory backend.
//!
//! Each store keeps its records in a `tokio::sync::RwLock` map. Conditional
//! transitions check their precondition and mutate under the same write
//! lock, so they are atomic with respect to each other.

mod alumni;
mod jobs;
mod users;

pub use alumni::MemoryAlumniStore;
pub use jobs::MemoryJobStore;
pub use users::MemoryUserStore;

use std::cmp::Ordering;

use alumnitrack_core::{ListQuery, SortOrder};

/// Case-insensitive substring match.
pub(crate) fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Orders optional values with `None` after every value when ascending,
/// matching PostgreSQL's default null ordering.
pub(crate) fn cmp_nullable<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(b),
    }
}

/// Sorts `rows`, then slices out the requested page. Returns the page and
/// the total before slicing.
pub(crate) fn paginate<T, F>(
    mut rows: Vec<T>,
    query: &ListQuery<F>,
    compare: impl Fn(&T, &T) -> Ordering,
) -> (Vec<T>, i64) {
    rows.sort_by(|a, b| match query.order {
        SortOrder::Asc => compare(a, b),
        SortOrder::Desc => compare(b, a),
    });

    let total = i64::try_from(rows.len()).unwrap_or(i64::MAX);
    let skip = usize::try_from(query.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(query.limit).unwrap_or(0);
    let page = rows.into_iter().skip(skip).take(take).collect();
    (page, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumnitrack_core::SortField;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct ById;

    impl SortField for ById {
        fn parse(_: &str) -> Option<Self> {
            Some(ById)
        }

        fn as_str(&self) -> &'static str {
            "id"
        }
    }

    #[test]
    fn test_second_page_of_twenty_five() {
        let rows: Vec<i32> = (1..=25).collect();
        let mut query = ListQuery::new(ById, SortOrder::Asc);
        query.page = 2;

        let (page, total) = paginate(rows, &query, |a, b| a.cmp(b));
        assert_eq!(total, 25);
        assert_eq!(page, (11..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let rows: Vec<i32> = (1..=5).collect();
        let mut query = ListQuery::new(ById, SortOrder::Desc);
        query.page = 3;

        let (page, total) = paginate(rows, &query, |a, b| a.cmp(b));
        assert_eq!(total, 5);
        assert!(page.is_empty());
    }

    #[test]
    fn test_largest_page_number_is_empty() {
        let rows: Vec<i32> = (1..=3).collect();
        let mut query = ListQuery::new(ById, SortOrder::Asc);
        query.page = i64::MAX;
        query.limit = 100;

        let (page, total) = paginate(rows, &query, |a, b| a.cmp(b));
        assert_eq!(total, 3);
        assert!(page.is_empty());
    }

    #[test]
    fn test_nulls_sort_last_ascending() {
        let mut values = vec![None, Some(2), Some(1)];
        values.sort_by(cmp_nullable);
        assert_eq!(values, vec![Some(1), Some(2), None]);
    }

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("PT Telkom Indonesia", "telkom"));
        assert!(!contains_ci("PT Telkom Indonesia", "google"));
    }
}
