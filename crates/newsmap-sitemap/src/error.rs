use thiserror::Error;

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to fetch sitemap: {status} {reason}")]
    FetchFailed { status: u16, reason: String },

    #[error("sitemap XML parse error: {0}")]
    ParseFailed(#[from] quick_xml::Error),

    #[error("invalid sitemap URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
