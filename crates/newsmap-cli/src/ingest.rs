use newsmap_core::AppConfig;
use newsmap_service::SitemapService;
use newsmap_sitemap::SitemapClient;
use sqlx::PgPool;

/// Migrates, runs one ingest, and prints the stored records as JSON.
///
/// # Errors
///
/// Returns an error if migrations fail, the client cannot be built, or the
/// ingest fails.
pub(crate) async fn run_ingest(pool: PgPool, config: &AppConfig) -> anyhow::Result<()> {
    newsmap_db::run_migrations(&pool).await?;

    let client = SitemapClient::new(&config.sitemap_url, &config.user_agent)?;
    let service = SitemapService::new(client, pool);
    let records = service.fetch_and_store().await?;

    tracing::info!(
        url = %config.sitemap_url,
        stored = records.len(),
        "ingest finished"
    );
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
