use async_trait::async_trait;
use newsmap_core::NewsEntry;
use newsmap_sitemap::{SitemapClient, SitemapError};

/// Produces the current batch of entries from a news sitemap.
#[async_trait]
pub trait SitemapSource: Send + Sync {
    async fn fetch_sitemap(&self) -> Result<Vec<NewsEntry>, SitemapError>;
}

#[async_trait]
impl SitemapSource for SitemapClient {
    async fn fetch_sitemap(&self) -> Result<Vec<NewsEntry>, SitemapError> {
        SitemapClient::fetch_sitemap(self).await
    }
}
