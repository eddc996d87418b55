//! Ingest orchestration and query dispatch over a sitemap source and a store.

pub mod error;
pub mod service;
pub mod source;
pub mod store;

pub use error::ServiceError;
pub use service::SitemapService;
pub use source::SitemapSource;
pub use store::SitemapStore;
