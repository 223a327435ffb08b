//! Page request normalization, offset math and total-count queries.
//!
//! # Invariants
//! - Every repository list operation goes through `PageRequest`, so page and
//!   limit are normalized the same way everywhere.
//! - Totals ignore offset/limit but honor the caller's scope predicate.

use crate::model::custom_field::RecordId;
use crate::repo::common::to_count;
use crate::repo::error::RepoResult;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Limit applied when the caller passes none or an out-of-range value.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
/// Largest accepted page size.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Normalized 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Normalizes raw caller values.
    ///
    /// - `page < 1` becomes `1`.
    /// - `limit < 1` or `limit > MAX_PAGE_LIMIT` becomes `DEFAULT_PAGE_LIMIT`.
    pub fn new(page: i64, limit: i64) -> Self {
        let page = if page < 1 {
            1
        } else {
            u32::try_from(page).unwrap_or(u32::MAX)
        };
        let limit = match u32::try_from(limit) {
            Ok(value) if (1..=MAX_PAGE_LIMIT).contains(&value) => value,
            _ => DEFAULT_PAGE_LIMIT,
        };
        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows skipped before this page.
    pub fn offset(&self) -> u64 {
        offset(self.page, self.limit)
    }

    /// `(limit, offset)` ready to bind into `LIMIT ? OFFSET ?`.
    pub(crate) fn sql_bounds(&self) -> (i64, i64) {
        (
            i64::from(self.limit),
            i64::try_from(self.offset()).unwrap_or(i64::MAX),
        )
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// `max(0, page - 1) * limit`.
pub fn offset(page: u32, limit: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(limit)
}

/// One page of items plus the unpaginated total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    pub(crate) fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            limit: request.limit(),
        }
    }

    /// Number of pages needed to show `total` rows; `0` when empty.
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.limit))
    }
}

/// Equality filter applied to a count query.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CountScope {
    pub column: &'static str,
    pub value: RecordId,
}

/// Counts rows of `table`, optionally restricted to `scope`.
pub(crate) fn count_rows(
    conn: &Connection,
    table: &'static str,
    scope: Option<CountScope>,
) -> RepoResult<u64> {
    let total: i64 = match scope {
        Some(CountScope { column, value }) => conn.query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1;"),
            [value],
            |row| row.get(0),
        )?,
        None => conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
            row.get(0)
        })?,
    };
    Ok(to_count(total))
}

#[cfg(test)]
mod tests {
    use super::{offset, Page, PageRequest, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

    #[test]
    fn offset_is_zero_for_first_and_non_positive_pages() {
        assert_eq!(offset(0, 10), 0);
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(3, 10), 20);
    }

    #[test]
    fn page_request_clamps_page_to_one() {
        let request = PageRequest::new(-4, 20);
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 20);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn page_request_falls_back_to_default_limit() {
        assert_eq!(PageRequest::new(1, 0).limit(), DEFAULT_PAGE_LIMIT);
        assert_eq!(PageRequest::new(1, -1).limit(), DEFAULT_PAGE_LIMIT);
        assert_eq!(
            PageRequest::new(1, i64::from(MAX_PAGE_LIMIT) + 1).limit(),
            DEFAULT_PAGE_LIMIT
        );
        assert_eq!(
            PageRequest::new(1, i64::from(MAX_PAGE_LIMIT)).limit(),
            MAX_PAGE_LIMIT
        );
    }

    #[test]
    fn sql_bounds_match_offset() {
        assert_eq!(PageRequest::new(4, 25).sql_bounds(), (25, 75));
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Page<()> = Page::new(Vec::new(), 25, PageRequest::new(1, 10));
        assert_eq!(page.total_pages(), 3);

        let empty: Page<()> = Page::new(Vec::new(), 0, PageRequest::default());
        assert_eq!(empty.total_pages(), 0);
    }
}
