use newsmap_core::NewsEntry;
use reqwest::{Client, Url};

use crate::error::SitemapError;
use crate::parse::parse_sitemap;

/// HTTP client for a single configured news sitemap.
///
/// Uses reqwest's default timeouts and performs no retries: a failed fetch
/// fails the whole ingest.
pub struct SitemapClient {
    client: Client,
    sitemap_url: Url,
}

impl SitemapClient {
    /// Creates a client for `sitemap_url` sending the given `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`SitemapError::InvalidUrl`] if `sitemap_url` does not parse,
    /// or [`SitemapError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(sitemap_url: &str, user_agent: &str) -> Result<Self, SitemapError> {
        let sitemap_url = Url::parse(sitemap_url).map_err(|e| SitemapError::InvalidUrl {
            url: sitemap_url.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            sitemap_url,
        })
    }

    /// The URL this client fetches.
    #[must_use]
    pub fn sitemap_url(&self) -> &Url {
        &self.sitemap_url
    }

    /// Fetches the sitemap and decodes it into entries.
    ///
    /// # Errors
    ///
    /// - [`SitemapError::FetchFailed`]: non-2xx status; carries the code and reason.
    /// - [`SitemapError::Http`]: network or TLS failure, or an unreadable body.
    /// - [`SitemapError::ParseFailed`]: body is not well-formed XML.
    pub async fn fetch_sitemap(&self) -> Result<Vec<NewsEntry>, SitemapError> {
        tracing::info!(url = %self.sitemap_url, "fetching sitemap");

        let response = self.client.get(self.sitemap_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failed(status));
        }

        let body = response.text().await?;
        let entries = parse_sitemap(&body)?;
        tracing::debug!(count = entries.len(), "parsed sitemap entries");
        Ok(entries)
    }
}

fn fetch_failed(status: reqwest::StatusCode) -> SitemapError {
    SitemapError::FetchFailed {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_owned(),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
