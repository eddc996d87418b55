//! Google News sitemap parser: fetches the feed, decodes `<url>` entries, and
//! derives the identity hash used for deduplication.

pub mod client;
pub mod error;
pub mod hash;
pub mod normalize;
pub mod parse;

pub use client::SitemapClient;
pub use error::SitemapError;
pub use hash::url_hash;
pub use normalize::split_keywords;
pub use parse::parse_sitemap;
