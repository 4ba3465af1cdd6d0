//! Pagination query parameters with a hard upper bound.

use serde::Deserialize;

/// Default page size when `limit` is not given.
const DEFAULT_LIMIT: i64 = 100;

/// Hard cap applied regardless of the requested `limit`.
const MAX_LIMIT: i64 = 200;

/// `?skip=&limit=` query parameters for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Resolve to concrete `(skip, limit)` values: `limit` defaults to 100
    /// and never exceeds 200; negative inputs clamp to 0.
    pub fn clamped(&self) -> (i64, i64) {
        let skip = self.skip.unwrap_or(0).max(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(0, MAX_LIMIT);
        (skip, limit)
    }
}
