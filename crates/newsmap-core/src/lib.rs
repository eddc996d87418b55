//! Shared data model, query contract, and configuration for newsmap.

pub mod app_config;
pub mod config;
pub mod entry;
pub mod page;
pub mod query;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use entry::{NewsEntry, SitemapRecord};
pub use page::{total_pages, Page};
pub use query::{QueryError, SitemapQuery, SitemapQueryParams, DEFAULT_LIMIT, DEFAULT_PAGE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
