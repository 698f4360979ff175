//! Pagination: validated page requests and paged results.
//!
//! Bounds are checked at construction so that no query ever executes with an
//! out-of-range page or limit.

use serde::Serialize;
use thiserror::Error;

/// Rejected pagination parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    /// `page` was below 1.
    #[error("Page must be greater than 0")]
    PageTooSmall,

    /// `limit` was outside `[1, 100]`.
    #[error("Limit must be between 1 and 100")]
    LimitOutOfRange,
}

/// A validated pagination request: 1-based page, limit in `[1, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Default page size when the caller supplies none.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Largest permitted page size.
    pub const MAX_LIMIT: u32 = 100;

    /// Validate and build a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::PageTooSmall`] when `page < 1` and
    /// [`PageError::LimitOutOfRange`] when `limit` is outside `[1, 100]`.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageError> {
        if page < 1 {
            return Err(PageError::PageTooSmall);
        }
        if limit < 1 || limit > Self::MAX_LIMIT {
            return Err(PageError::LimitOutOfRange);
        }
        Ok(Self { page, limit })
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// SQL `OFFSET` for this page.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    /// SQL `LIMIT` for this page.
    #[must_use]
    pub const fn limit_i64(&self) -> i64 {
        self.limit as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the total count for pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// The rows on this page, newest first.
    pub items: Vec<T>,
    /// The 1-based page number that was requested.
    pub page: u32,
    /// The page size that was requested.
    pub limit: u32,
    /// Total matching rows across all pages.
    pub total: i64,
}

impl<T> Page<T> {
    /// Build a page from its parts.
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            page: request.page,
            limit: request.limit,
            total,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(PageRequest::new(1, 1).is_ok());
        assert!(PageRequest::new(1, 100).is_ok());
        assert!(PageRequest::new(7, 10).is_ok());
    }

    #[test]
    fn rejects_page_zero() {
        assert_eq!(PageRequest::new(0, 10), Err(PageError::PageTooSmall));
    }

    #[test]
    fn rejects_limit_out_of_range() {
        assert_eq!(PageRequest::new(1, 0), Err(PageError::LimitOutOfRange));
        assert_eq!(PageRequest::new(1, 101), Err(PageError::LimitOutOfRange));
    }

    #[test]
    fn offset_is_zero_based() {
        let req = PageRequest::new(3, 10).unwrap();
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit_i64(), 10);
    }

    #[test]
    fn default_is_first_page_of_ten() {
        let req = PageRequest::default();
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), PageRequest::DEFAULT_LIMIT);
    }
}
