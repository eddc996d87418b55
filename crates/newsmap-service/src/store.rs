use async_trait::async_trait;
use newsmap_core::{NewsEntry, SitemapQuery, SitemapRecord};
use newsmap_db::DbError;
use sqlx::PgPool;

/// Persistence for sitemap records keyed by `url_hash`.
#[async_trait]
pub trait SitemapStore: Send + Sync {
    /// Inserts or updates every entry by `url_hash`; returns rows written.
    async fn upsert_entries(&self, entries: &[NewsEntry]) -> Result<u64, DbError>;

    async fn find_by_url_hashes(&self, url_hashes: &[String])
        -> Result<Vec<SitemapRecord>, DbError>;

    /// One page of matching records plus the total match count.
    async fn find_page(&self, query: &SitemapQuery)
        -> Result<(Vec<SitemapRecord>, u64), DbError>;
}

#[async_trait]
impl SitemapStore for PgPool {
    async fn upsert_entries(&self, entries: &[NewsEntry]) -> Result<u64, DbError> {
        newsmap_db::upsert_sitemap_entries(self, entries).await
    }

    async fn find_by_url_hashes(
        &self,
        url_hashes: &[String],
    ) -> Result<Vec<SitemapRecord>, DbError> {
        let rows = newsmap_db::list_sitemap_entries_by_hashes(self, url_hashes).await?;
        Ok(rows.into_iter().map(SitemapRecord::from).collect())
    }

    async fn find_page(
        &self,
        query: &SitemapQuery,
    ) -> Result<(Vec<SitemapRecord>, u64), DbError> {
        let (rows, total) = newsmap_db::list_sitemap_entries_page(self, query).await?;
        Ok((rows.into_iter().map(SitemapRecord::from).collect(), total))
    }
}
