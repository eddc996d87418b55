use newsmap_core::{QueryError, SitemapQuery, SitemapQueryParams};
use newsmap_service::SitemapService;
use sqlx::PgPool;

/// Validates `list` arguments into a query.
///
/// # Errors
///
/// Returns [`QueryError`] if a bound is not ISO-8601 or `page`/`limit` is not
/// positive.
pub(crate) fn build_query(
    after: Option<String>,
    before: Option<String>,
    page: Option<i64>,
    limit: Option<i64>,
) -> Result<SitemapQuery, QueryError> {
    SitemapQueryParams {
        after,
        before,
        page,
        limit,
    }
    .validate()
}

/// Fetches one page and prints it as JSON.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_list(pool: PgPool, query: &SitemapQuery) -> anyhow::Result<()> {
    let service = SitemapService::read_only(pool);
    let page = service.find_all(query).await?;

    if page.data.is_empty() && page.total == 0 {
        tracing::info!("no sitemap entries stored; run `newsmap ingest` first");
    }
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
