//! Timestamp interpretation of text-stored publication dates.
//!
//! `publication_date` is stored exactly as the feed published it. Every
//! comparison or ordering that needs it as a timestamp goes through
//! `newsmap_try_timestamptz` (see migrations), which yields `NULL` for text
//! Postgres cannot cast. Moving to a native `TIMESTAMPTZ` column only
//! touches this module and a migration.

use chrono::{DateTime, Utc};
use newsmap_core::SitemapQuery;

/// SQL expression for the publication date as a timestamp, or `NULL`.
pub const PUBLISHED_AT: &str = "newsmap_try_timestamptz(publication_date)";

/// Newest first. Unparseable or missing dates sort last; raw text and `id`
/// break ties so paging is stable.
pub const ORDER_NEWEST_FIRST: &str = "newsmap_try_timestamptz(publication_date) DESC NULLS LAST, \
     publication_date DESC NULLS LAST, id";

/// Date-range predicates for a query, with the values to bind in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFilter {
    predicates: Vec<String>,
    binds: Vec<DateTime<Utc>>,
}

impl DateFilter {
    /// Builds one exclusive predicate per supplied bound, ANDed together.
    /// Placeholders start at `$1`.
    #[must_use]
    pub fn from_query(query: &SitemapQuery) -> Self {
        let mut filter = Self {
            predicates: Vec::new(),
            binds: Vec::new(),
        };
        if let Some(after) = query.after {
            filter.push(">", after);
        }
        if let Some(before) = query.before {
            filter.push("<", before);
        }
        filter
    }

    fn push(&mut self, op: &str, bound: DateTime<Utc>) {
        self.binds.push(bound);
        self.predicates
            .push(format!("{PUBLISHED_AT} {op} ${}", self.binds.len()));
    }

    /// ` WHERE ...` (leading space) or an empty string when unfiltered.
    #[must_use]
    pub fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.predicates.join(" AND "))
        }
    }

    #[must_use]
    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    #[must_use]
    pub fn binds(&self) -> &[DateTime<Utc>] {
        &self.binds
    }

    /// Index of the next free `$n` placeholder.
    #[must_use]
    pub fn next_placeholder(&self) -> usize {
        self.binds.len() + 1
    }
}
