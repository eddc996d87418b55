//! Database operations for the `sitemap_entries` table.

use chrono::{DateTime, Utc};
use newsmap_core::{NewsEntry, SitemapQuery, SitemapRecord};
use sqlx::PgPool;
use uuid::Uuid;

use crate::published::{DateFilter, ORDER_NEWEST_FIRST};
use crate::DbError;

const COLUMNS: &str =
    "id, url_hash, url, title, publication_date, keywords, created_at, updated_at";

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `sitemap_entries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SitemapEntryRow {
    pub id: Uuid,
    pub url_hash: String,
    pub url: String,
    pub title: String,
    /// Raw feed text; see [`crate::published`].
    pub publication_date: Option<String>,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SitemapEntryRow> for SitemapRecord {
    fn from(row: SitemapEntryRow) -> Self {
        Self {
            id: row.id,
            url_hash: row.url_hash,
            url: row.url,
            title: row.title,
            publication_date: row.publication_date,
            keywords: row.keywords,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Upserts a batch of entries keyed by `url_hash`.
///
/// New hashes are inserted with a fresh `id`. Existing hashes get `url`,
/// `title`, `publication_date`, and `keywords` overwritten and `updated_at`
/// bumped, unless all four already match, in which case the row is left
/// untouched. Duplicate hashes within the batch resolve to the last one.
///
/// All writes run inside a single transaction; if any fails the whole batch
/// is rolled back. Returns the number of rows inserted or changed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement or the commit fails.
pub async fn upsert_sitemap_entries(pool: &PgPool, entries: &[NewsEntry]) -> Result<u64, DbError> {
    let mut tx = pool.begin().await?;
    let mut written = 0u64;

    for entry in entries {
        let result = sqlx::query(
            "INSERT INTO sitemap_entries \
                 (id, url_hash, url, title, publication_date, keywords) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (url_hash) DO UPDATE SET \
                 url              = EXCLUDED.url, \
                 title            = EXCLUDED.title, \
                 publication_date = EXCLUDED.publication_date, \
                 keywords         = EXCLUDED.keywords, \
                 updated_at       = NOW() \
             WHERE (sitemap_entries.url, sitemap_entries.title, \
                    sitemap_entries.publication_date, sitemap_entries.keywords) \
                   IS DISTINCT FROM \
                   (EXCLUDED.url, EXCLUDED.title, \
                    EXCLUDED.publication_date, EXCLUDED.keywords)",
        )
        .bind(Uuid::new_v4())
        .bind(&entry.url_hash)
        .bind(&entry.url)
        .bind(&entry.title)
        .bind(&entry.publication_date)
        .bind(&entry.keywords)
        .execute(&mut *tx)
        .await?;

        written += result.rows_affected();
    }

    tx.commit().await?;
    tracing::debug!(batch = entries.len(), written, "upserted sitemap entries");
    Ok(written)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Returns the rows whose `url_hash` is in `url_hashes`, in no particular order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_sitemap_entries_by_hashes(
    pool: &PgPool,
    url_hashes: &[String],
) -> Result<Vec<SitemapEntryRow>, DbError> {
    let rows = sqlx::query_as::<_, SitemapEntryRow>(&format!(
        "SELECT {COLUMNS} FROM sitemap_entries WHERE url_hash = ANY($1)"
    ))
    .bind(url_hashes)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns one page of rows matching the query's date range, newest first,
/// together with the total number of matching rows.
///
/// Both reads share one read-only `REPEATABLE READ` transaction, so the
/// count and the page describe the same snapshot.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either query fails.
pub async fn list_sitemap_entries_page(
    pool: &PgPool,
    query: &SitemapQuery,
) -> Result<(Vec<SitemapEntryRow>, u64), DbError> {
    let filter = DateFilter::from_query(query);
    let where_clause = filter.where_clause();
    let offset_param = filter.next_placeholder();

    let count_sql = format!("SELECT COUNT(*) FROM sitemap_entries{where_clause}");
    let page_sql = format!(
        "SELECT {COLUMNS} FROM sitemap_entries{where_clause} \
         ORDER BY {ORDER_NEWEST_FIRST} \
         OFFSET ${offset_param} LIMIT ${}",
        offset_param + 1
    );

    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for bound in filter.binds() {
        count_query = count_query.bind(*bound);
    }
    let total = count_query.fetch_one(&mut *tx).await?;

    let mut page_query = sqlx::query_as::<_, SitemapEntryRow>(&page_sql);
    for bound in filter.binds() {
        page_query = page_query.bind(*bound);
    }
    let rows = page_query
        .bind(query.offset())
        .bind(query.take())
        .fetch_all(&mut *tx)
        .await?;

    tx.commit().await?;

    let total = u64::try_from(total).map_err(|_| DbError::OutOfRange {
        field: "total",
        value: total,
    })?;
    Ok((rows, total))
}

/// Returns the number of stored entries.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_sitemap_entries(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sitemap_entries")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
