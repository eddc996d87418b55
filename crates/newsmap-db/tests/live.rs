//! Live integration tests for newsmap-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/newsmap-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use chrono::{TimeZone, Utc};
use newsmap_core::{NewsEntry, SitemapQuery};
use newsmap_db::{
    count_sitemap_entries, health_check, list_sitemap_entries_by_hashes, list_sitemap_entries_page,
    run_migrations, upsert_sitemap_entries,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Left-pads `key` with zeros to a 32-character hash.
fn hash(key: &str) -> String {
    format!("{key:0>32}")
}

fn make_entry(key: &str, publication_date: Option<&str>) -> NewsEntry {
    NewsEntry {
        url: format!("https://example.com/{key}"),
        url_hash: hash(key),
        title: format!("Article {key}"),
        publication_date: publication_date.map(str::to_owned),
        keywords: vec!["news".to_string()],
    }
}

fn page_of(page: u32, limit: u32) -> SitemapQuery {
    SitemapQuery {
        page,
        limit,
        ..SitemapQuery::default()
    }
}

// ---------------------------------------------------------------------------
// Section 0: Pool and migrations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn health_check_succeeds_on_live_pool(pool: sqlx::PgPool) {
    health_check(&pool).await.expect("health check failed");
}

#[sqlx::test(migrations = "../../migrations")]
async fn run_migrations_is_a_no_op_when_already_applied(pool: sqlx::PgPool) {
    let applied = run_migrations(&pool).await.expect("migrations failed");
    assert_eq!(applied, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn try_timestamptz_returns_null_for_garbage(pool: sqlx::PgPool) {
    let parsed: Option<chrono::DateTime<Utc>> =
        sqlx::query_scalar("SELECT newsmap_try_timestamptz('not a date')")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(parsed.is_none());

    let parsed: Option<chrono::DateTime<Utc>> =
        sqlx::query_scalar("SELECT newsmap_try_timestamptz('2024-06-15T10:00:00Z')")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(parsed, Some(Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap()));
}

#[sqlx::test(migrations = "../../migrations")]
async fn try_timestamptz_rejects_special_date_words(pool: sqlx::PgPool) {
    for word in ["now", "today", "tomorrow", "yesterday", "epoch", "infinity", "-infinity", " now "] {
        let parsed: Option<chrono::DateTime<Utc>> =
            sqlx::query_scalar("SELECT newsmap_try_timestamptz($1)")
                .bind(word)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert!(parsed.is_none(), "{word:?} must not parse as a timestamp");
    }
}

// ---------------------------------------------------------------------------
// Section 1: Upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_inserts_new_entries(pool: sqlx::PgPool) {
    let entries = vec![
        make_entry("a1", Some("2024-06-15T10:00:00Z")),
        make_entry("b2", None),
    ];

    let written = upsert_sitemap_entries(&pool, &entries)
        .await
        .expect("upsert failed");

    assert_eq!(written, 2);
    assert_eq!(count_sitemap_entries(&pool).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_same_batch_twice_creates_no_duplicates(pool: sqlx::PgPool) {
    let entries = vec![make_entry("a1", Some("2024-06-15T10:00:00Z"))];

    upsert_sitemap_entries(&pool, &entries).await.unwrap();
    let first = list_sitemap_entries_by_hashes(&pool, &[hash("a1")])
        .await
        .unwrap();

    let written = upsert_sitemap_entries(&pool, &entries).await.unwrap();
    let second = list_sitemap_entries_by_hashes(&pool, &[hash("a1")])
        .await
        .unwrap();

    assert_eq!(written, 0, "identical re-ingest must not write");
    assert_eq!(count_sitemap_entries(&pool).await.unwrap(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first[0].id, second[0].id);
    assert_eq!(
        first[0].updated_at, second[0].updated_at,
        "no-op upsert must not bump updated_at"
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_changed_fields_overwrites_and_keeps_identity(pool: sqlx::PgPool) {
    let original = make_entry("a1", Some("2024-06-15T10:00:00Z"));
    upsert_sitemap_entries(&pool, std::slice::from_ref(&original))
        .await
        .unwrap();
    let before = list_sitemap_entries_by_hashes(&pool, &[hash("a1")])
        .await
        .unwrap()
        .remove(0);

    let changed = NewsEntry {
        title: "Updated headline".to_string(),
        publication_date: Some("2024-06-16T08:00:00Z".to_string()),
        keywords: vec!["breaking".to_string(), "update".to_string()],
        ..original
    };
    let written = upsert_sitemap_entries(&pool, &[changed]).await.unwrap();
    let after = list_sitemap_entries_by_hashes(&pool, &[hash("a1")])
        .await
        .unwrap()
        .remove(0);

    assert_eq!(written, 1);
    assert_eq!(after.id, before.id);
    assert_eq!(after.url_hash, before.url_hash);
    assert_eq!(after.title, "Updated headline");
    assert_eq!(
        after.publication_date.as_deref(),
        Some("2024-06-16T08:00:00Z")
    );
    assert_eq!(after.keywords, vec!["breaking", "update"]);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_duplicate_hash_in_batch_keeps_last(pool: sqlx::PgPool) {
    let first = make_entry("a1", None);
    let second = NewsEntry {
        title: "Second copy".to_string(),
        ..make_entry("a1", None)
    };

    upsert_sitemap_entries(&pool, &[first, second]).await.unwrap();

    let rows = list_sitemap_entries_by_hashes(&pool, &[hash("a1")])
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Second copy");
}

#[sqlx::test(migrations = "../../migrations")]
async fn url_hash_uniqueness_is_enforced_by_the_schema(pool: sqlx::PgPool) {
    upsert_sitemap_entries(&pool, &[make_entry("a1", None)])
        .await
        .unwrap();

    let result = sqlx::query(
        "INSERT INTO sitemap_entries (id, url_hash, url, title) VALUES ($1, $2, $3, '')",
    )
    .bind(uuid::Uuid::new_v4())
    .bind(hash("a1"))
    .bind("https://example.com/other")
    .execute(&pool)
    .await;

    assert!(result.is_err(), "plain insert of a duplicate hash must fail");
}

#[sqlx::test(migrations = "../../migrations")]
async fn empty_keywords_round_trip_as_empty_vec(pool: sqlx::PgPool) {
    let entry = NewsEntry {
        keywords: vec![],
        ..make_entry("k0", None)
    };
    upsert_sitemap_entries(&pool, &[entry]).await.unwrap();

    let rows = list_sitemap_entries_by_hashes(&pool, &[hash("k0")])
        .await
        .unwrap();
    assert!(rows[0].keywords.is_empty());
}

// ---------------------------------------------------------------------------
// Section 2: Read-back by hash
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn list_by_hashes_returns_only_requested_rows(pool: sqlx::PgPool) {
    let entries = vec![
        make_entry("a1", None),
        make_entry("b2", None),
        make_entry("c3", None),
    ];
    upsert_sitemap_entries(&pool, &entries).await.unwrap();

    let mut rows = list_sitemap_entries_by_hashes(&pool, &[hash("a1"), hash("c3")])
        .await
        .unwrap();
    rows.sort_by(|a, b| a.url_hash.cmp(&b.url_hash));

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].url_hash, hash("a1"));
    assert_eq!(rows[1].url_hash, hash("c3"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_by_unknown_hashes_is_empty(pool: sqlx::PgPool) {
    upsert_sitemap_entries(&pool, &[make_entry("a1", None)])
        .await
        .unwrap();

    let rows = list_sitemap_entries_by_hashes(&pool, &[hash("zz")])
        .await
        .unwrap();
    assert!(rows.is_empty());
}

// ---------------------------------------------------------------------------
// Section 3: Paged queries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn page_orders_by_publication_date_desc(pool: sqlx::PgPool) {
    let entries = vec![
        make_entry("jan", Some("2024-01-01")),
        make_entry("jun", Some("2024-06-01")),
        make_entry("mar", Some("2024-03-01")),
    ];
    upsert_sitemap_entries(&pool, &entries).await.unwrap();

    let (rows, total) = list_sitemap_entries_page(&pool, &SitemapQuery::default())
        .await
        .unwrap();

    let dates: Vec<_> = rows
        .iter()
        .map(|r| r.publication_date.as_deref().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-06-01", "2024-03-01", "2024-01-01"]);
    assert_eq!(total, 3);
}

#[sqlx::test(migrations = "../../migrations")]
async fn page_orders_by_instant_not_by_text(pool: sqlx::PgPool) {
    // 10:00+05:30 is 04:30Z, earlier than 05:00Z even though it sorts later as text.
    let entries = vec![
        make_entry("ist", Some("2024-06-01T10:00:00+05:30")),
        make_entry("utc", Some("2024-06-01T05:00:00Z")),
    ];
    upsert_sitemap_entries(&pool, &entries).await.unwrap();

    let (rows, _) = list_sitemap_entries_page(&pool, &SitemapQuery::default())
        .await
        .unwrap();
    assert_eq!(rows[0].url_hash, hash("utc"));
    assert_eq!(rows[1].url_hash, hash("ist"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn page_sorts_missing_and_malformed_dates_last(pool: sqlx::PgPool) {
    let entries = vec![
        make_entry("none", None),
        make_entry("junk", Some("sometime last week")),
        make_entry("real", Some("2024-03-01T00:00:00Z")),
    ];
    upsert_sitemap_entries(&pool, &entries).await.unwrap();

    let (rows, total) = list_sitemap_entries_page(&pool, &SitemapQuery::default())
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(rows[0].url_hash, hash("real"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn page_skips_and_takes(pool: sqlx::PgPool) {
    let entries: Vec<NewsEntry> = (1..=21)
        .map(|day| make_entry(&format!("d{day}"), Some(&format!("2024-01-{day:02}"))))
        .collect();
    upsert_sitemap_entries(&pool, &entries).await.unwrap();

    let (first, total) = list_sitemap_entries_page(&pool, &page_of(1, 10))
        .await
        .unwrap();
    assert_eq!(total, 21);
    assert_eq!(first.len(), 10);
    assert_eq!(first[0].publication_date.as_deref(), Some("2024-01-21"));

    let (second, _) = list_sitemap_entries_page(&pool, &page_of(2, 10))
        .await
        .unwrap();
    assert_eq!(second[0].publication_date.as_deref(), Some("2024-01-11"));

    let (third, total) = list_sitemap_entries_page(&pool, &page_of(3, 10))
        .await
        .unwrap();
    assert_eq!(total, 21);
    assert_eq!(third.len(), 1);
    assert_eq!(third[0].publication_date.as_deref(), Some("2024-01-01"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn page_past_the_end_is_empty_with_real_total(pool: sqlx::PgPool) {
    upsert_sitemap_entries(&pool, &[make_entry("a1", Some("2024-01-01"))])
        .await
        .unwrap();

    let (rows, total) = list_sitemap_entries_page(&pool, &page_of(5, 10))
        .await
        .unwrap();
    assert!(rows.is_empty());
    assert_eq!(total, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn page_date_bounds_are_exclusive_and_anded(pool: sqlx::PgPool) {
    let entries = vec![
        make_entry("lo", Some("2024-01-01T00:00:00Z")),
        make_entry("mid", Some("2024-06-01T00:00:00Z")),
        make_entry("hi", Some("2024-12-31T23:59:59Z")),
        make_entry("junk", Some("not a date")),
        make_entry("moving", Some("now")),
        make_entry("none", None),
    ];
    upsert_sitemap_entries(&pool, &entries).await.unwrap();

    let query = SitemapQuery {
        after: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        before: Some(Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()),
        ..SitemapQuery::default()
    };
    let (rows, total) = list_sitemap_entries_page(&pool, &query).await.unwrap();

    assert_eq!(total, 1);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].url_hash, hash("mid"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn page_after_only_excludes_unparseable_dates(pool: sqlx::PgPool) {
    let entries = vec![
        make_entry("old", Some("2023-05-01")),
        make_entry("new", Some("2024-05-01")),
        make_entry("junk", Some("soon")),
        make_entry("moving", Some("now")),
        make_entry("forever", Some("infinity")),
    ];
    upsert_sitemap_entries(&pool, &entries).await.unwrap();

    let query = SitemapQuery {
        after: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        ..SitemapQuery::default()
    };
    let (rows, total) = list_sitemap_entries_page(&pool, &query).await.unwrap();

    assert_eq!(total, 1);
    assert_eq!(rows[0].url_hash, hash("new"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn page_on_empty_table_is_empty(pool: sqlx::PgPool) {
    let (rows, total) = list_sitemap_entries_page(&pool, &SitemapQuery::default())
        .await
        .unwrap();
    assert!(rows.is_empty());
    assert_eq!(total, 0);
}
