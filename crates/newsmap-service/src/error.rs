use newsmap_db::DbError;
use newsmap_sitemap::SitemapError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The sitemap could not be fetched or decoded, including non-2xx responses.
    #[error("sitemap fetch failed: {0}")]
    FetchFailed(#[from] SitemapError),

    #[error("storage failed: {0}")]
    StorageFailed(#[from] DbError),
}
