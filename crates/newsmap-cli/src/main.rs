mod ingest;
mod list;

use clap::{Parser, Subcommand};
use newsmap_core::AppConfig;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newsmap")]
#[command(about = "Google News sitemap ingestion and query tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the configured sitemap and upsert its entries
    Ingest,
    /// List stored entries, newest first
    List {
        /// Only entries published strictly after this ISO-8601 instant
        #[arg(long)]
        after: Option<String>,
        /// Only entries published strictly before this ISO-8601 instant
        #[arg(long)]
        before: Option<String>,
        /// 1-based page number
        #[arg(long, allow_negative_numbers = true)]
        page: Option<i64>,
        /// Entries per page
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },
    /// Apply pending database migrations
    Migrate,
    /// Print the identity hash for a URL
    Hash {
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Hashing needs neither config nor a database.
    if let Commands::Hash { url } = &cli.command {
        println!("{}", newsmap_sitemap::url_hash(url));
        return Ok(());
    }

    let config = newsmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ingest => ingest::run_ingest(connect(&config).await?, &config).await?,
        Commands::List {
            after,
            before,
            page,
            limit,
        } => {
            // Reject bad input before touching the database.
            let query = list::build_query(after, before, page, limit)?;
            list::run_list(connect(&config).await?, &query).await?;
        }
        Commands::Migrate => {
            let applied = newsmap_db::run_migrations(&connect(&config).await?).await?;
            println!("applied {applied} migration(s)");
        }
        Commands::Hash { .. } => {}
    }

    Ok(())
}

async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let pool_config = newsmap_db::PoolConfig::from_app_config(config);
    let pool = newsmap_db::connect_pool(&config.database_url, pool_config).await?;
    newsmap_db::health_check(&pool).await?;
    tracing::debug!(env = %config.env, "database reachable");
    Ok(pool)
}
