use std::collections::{HashMap, HashSet};

use newsmap_core::{Page, SitemapQuery, SitemapRecord};

use crate::error::ServiceError;
use crate::source::SitemapSource;
use crate::store::SitemapStore;

/// Ties a sitemap source to a record store.
pub struct SitemapService<S, R> {
    source: S,
    store: R,
}

impl<S, R> SitemapService<S, R> {
    #[must_use]
    pub fn new(source: S, store: R) -> Self {
        Self { source, store }
    }
}

impl<R: SitemapStore> SitemapService<(), R> {
    /// A service that can only query; it has no source to ingest from.
    #[must_use]
    pub fn read_only(store: R) -> Self {
        Self { source: (), store }
    }
}

impl<S, R: SitemapStore> SitemapService<S, R> {
    /// Returns one page of stored records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StorageFailed`] if the store query fails.
    pub async fn find_all(
        &self,
        query: &SitemapQuery,
    ) -> Result<Page<SitemapRecord>, ServiceError> {
        let (data, total) = self.store.find_page(query).await?;
        tracing::debug!(
            page = query.page,
            limit = query.limit,
            returned = data.len(),
            total,
            "listed sitemap records"
        );
        Ok(Page::new(data, total, query.page, query.limit))
    }
}

impl<S, R> SitemapService<S, R>
where
    S: SitemapSource,
    R: SitemapStore,
{
    /// Fetches the sitemap, upserts every entry, and returns the stored
    /// records for this batch.
    ///
    /// The returned records follow the order in which their hashes first
    /// appear in the feed. An empty feed returns an empty vector without
    /// touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::FetchFailed`] if the source fails, or
    /// [`ServiceError::StorageFailed`] if the upsert or read-back fails.
    pub async fn fetch_and_store(&self) -> Result<Vec<SitemapRecord>, ServiceError> {
        let entries = self.source.fetch_sitemap().await?;
        if entries.is_empty() {
            tracing::info!("sitemap returned no entries; nothing to store");
            return Ok(Vec::new());
        }

        let written = self.store.upsert_entries(&entries).await?;

        let url_hashes = distinct_hashes(entries.iter().map(|e| e.url_hash.as_str()));
        let mut records = self.store.find_by_url_hashes(&url_hashes).await?;

        let position: HashMap<&str, usize> = url_hashes
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), i))
            .collect();
        records.sort_by_key(|r| position.get(r.url_hash.as_str()).copied());

        tracing::info!(
            fetched = entries.len(),
            distinct = url_hashes.len(),
            written,
            returned = records.len(),
            "sitemap ingest complete"
        );
        Ok(records)
    }
}

/// Unique hashes in first-seen order.
fn distinct_hashes<'a>(hashes: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    hashes
        .filter(|h| seen.insert(*h))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
