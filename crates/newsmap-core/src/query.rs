//! Query contract for reading stored sitemap entries.
//!
//! [`SitemapQueryParams`] is what arrives from a caller; [`SitemapQueryParams::validate`]
//! turns it into a [`SitemapQuery`] the store can trust. Both sides take their
//! defaults from [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("{field} is not an ISO-8601 timestamp: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("{field} must be a positive integer, got {value}")]
    NonPositive { field: &'static str, value: i64 },
}

/// Unvalidated query inputs, all optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SitemapQueryParams {
    pub after: Option<String>,
    pub before: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// A validated query: bounds are exclusive and compared against the
/// publication date of each stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitemapQuery {
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
    pub page: u32,
    pub limit: u32,
}

impl Default for SitemapQuery {
    fn default() -> Self {
        Self {
            after: None,
            before: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SitemapQuery {
    /// Rows to skip: `(page - 1) * limit`, saturating at `i64::MAX`.
    ///
    /// Postgres `OFFSET` is a `bigint`; an offset past the last row yields an
    /// empty page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1))
            .checked_mul(i64::from(self.limit))
            .unwrap_or(i64::MAX)
    }

    /// Rows to take.
    #[must_use]
    pub fn take(&self) -> i64 {
        i64::from(self.limit)
    }
}

impl SitemapQueryParams {
    /// Validate and apply defaults.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidTimestamp`] if `after` or `before` is not
    /// ISO-8601, or [`QueryError::NonPositive`] if `page` or `limit` is below 1
    /// (or too large to represent).
    pub fn validate(&self) -> Result<SitemapQuery, QueryError> {
        Ok(SitemapQuery {
            after: self
                .after
                .as_deref()
                .map(|v| parse_bound("after", v))
                .transpose()?,
            before: self
                .before
                .as_deref()
                .map(|v| parse_bound("before", v))
                .transpose()?,
            page: positive("page", self.page, DEFAULT_PAGE)?,
            limit: positive("limit", self.limit, DEFAULT_LIMIT)?,
        })
    }
}

fn positive(field: &'static str, value: Option<i64>, default: u32) -> Result<u32, QueryError> {
    match value {
        None => Ok(default),
        Some(v) if v >= 1 => u32::try_from(v).map_err(|_| QueryError::NonPositive { field, value: v }),
        Some(v) => Err(QueryError::NonPositive { field, value: v }),
    }
}

/// Parse an ISO-8601 timestamp. Accepts RFC 3339, a date-time without offset
/// (read as UTC), or a bare date (midnight UTC).
fn parse_bound(field: &'static str, raw: &str) -> Result<DateTime<Utc>, QueryError> {
    let value = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Some(naive) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc());
    }

    Err(QueryError::InvalidTimestamp {
        field,
        value: raw.to_string(),
    })
}
