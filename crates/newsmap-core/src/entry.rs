use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One `<url>` element of a news sitemap, normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsEntry {
    /// `<loc>` exactly as published.
    pub url: String,
    /// Identity key derived from `url`; 32 lowercase hex characters.
    pub url_hash: String,
    pub title: String,
    /// Kept as text; feeds are loose about date formats.
    pub publication_date: Option<String>,
    pub keywords: Vec<String>,
}

/// A stored news entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapRecord {
    pub id: Uuid,
    pub url_hash: String,
    pub url: String,
    pub title: String,
    pub publication_date: Option<String>,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
