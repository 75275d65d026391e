use crate::{
    error::LinkError,
    models::{LinkFilter, ShortLink},
};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

const LINK_COLUMNS: &str = "id, token, original_url, is_active, due_date";

// ── Links ──────────────────────────────────────────────────────────────────

/// Insert a new link and return the newly created row.
///
/// A UNIQUE violation on `token` maps to [`LinkError::DuplicateToken`] so the
/// caller can retry with a fresh token instead of failing the request; any
/// other database error is a store failure.
pub async fn insert_link(
    pool: &SqlitePool,
    original_url: &str,
    token: &str,
    due_date: DateTime<Utc>,
) -> Result<ShortLink, LinkError> {
    let result = sqlx::query(
        "INSERT INTO links (token, original_url, is_active, due_date) VALUES (?1, ?2, 1, ?3)",
    )
    .bind(token)
    .bind(original_url)
    .bind(due_date)
    .execute(pool)
    .await;

    let id = match result {
        Ok(done) => done.last_insert_rowid(),
        Err(e) if e.as_database_error().is_some_and(|d| d.is_unique_violation()) => {
            return Err(LinkError::DuplicateToken);
        }
        Err(e) => return Err(e.into()),
    };

    let link: ShortLink = sqlx::query_as(&format!(
        "SELECT {LINK_COLUMNS} FROM links WHERE id = ?1"
    ))
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(link)
}

/// Fetch a single link by its token, regardless of active state.
pub async fn find_by_token(
    pool: &SqlitePool,
    token: &str,
) -> Result<Option<ShortLink>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {LINK_COLUMNS} FROM links WHERE token = ?1"
    ))
    .bind(token)
    .fetch_optional(pool)
    .await
}

/// Fetch a single link by its token only if it is still active. The due date
/// is not consulted here; the resolve flow applies the expiry policy itself.
pub async fn find_active_by_token(
    pool: &SqlitePool,
    token: &str,
) -> Result<Option<ShortLink>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {LINK_COLUMNS} FROM links WHERE token = ?1 AND is_active = 1"
    ))
    .bind(token)
    .fetch_optional(pool)
    .await
}

/// Mark a link inactive. Returns whether a row actually changed, so a second
/// call on the same token reports `false`. The filtered UPDATE is a single
/// atomic write, which keeps the transition idempotent under concurrent
/// deactivations.
pub async fn deactivate(pool: &SqlitePool, token: &str) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("UPDATE links SET is_active = 0 WHERE token = ?1 AND is_active = 1")
        .bind(token)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}

/// Count links matching `filter`, before any pagination.
pub async fn count_links(pool: &SqlitePool, filter: LinkFilter) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(match filter {
        LinkFilter::All => "SELECT COUNT(*) FROM links",
        LinkFilter::Active => "SELECT COUNT(*) FROM links WHERE is_active = 1",
        LinkFilter::Inactive => "SELECT COUNT(*) FROM links WHERE is_active = 0",
    })
    .fetch_one(pool)
    .await
}

/// Fetch one page of links matching `filter`, ascending by `id` (insertion
/// order).
pub async fn list_links(
    pool: &SqlitePool,
    filter: LinkFilter,
    offset: i64,
    limit: i64,
) -> Result<Vec<ShortLink>, sqlx::Error> {
    let where_clause = match filter {
        LinkFilter::All => "",
        LinkFilter::Active => " WHERE is_active = 1",
        LinkFilter::Inactive => " WHERE is_active = 0",
    };

    sqlx::query_as(&format!(
        "SELECT {LINK_COLUMNS} FROM links{where_clause} ORDER BY id ASC LIMIT ?1 OFFSET ?2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Fetch every link in insertion order. The ranked statistics listing sorts
/// globally by click volume, so it cannot page at the query level.
pub async fn all_links(pool: &SqlitePool) -> Result<Vec<ShortLink>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {LINK_COLUMNS} FROM links ORDER BY id ASC"
    ))
    .fetch_all(pool)
    .await
}

/// Deactivate every active link whose due date has passed. One atomic
/// filtered UPDATE; returns the number of rows changed. Used only by the
/// expiry sweeper.
pub async fn bulk_deactivate(pool: &SqlitePool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let affected = sqlx::query("UPDATE links SET is_active = 0 WHERE is_active = 1 AND due_date < ?1")
        .bind(now)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected)
}

// ── Clicks ─────────────────────────────────────────────────────────────────

/// Record one click for a link at the given instant.
pub async fn record_click(
    pool: &SqlitePool,
    link_id: i64,
    clicked_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO clicks (link_id, clicked_at) VALUES (?1, ?2)")
        .bind(link_id)
        .bind(clicked_at)
        .execute(pool)
        .await?;

    Ok(())
}

/// Count clicks for a link with `clicked_at >= since`.
pub async fn count_clicks_since(
    pool: &SqlitePool,
    link_id: i64,
    since: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE link_id = ?1 AND clicked_at >= ?2")
        .bind(link_id)
        .bind(since)
        .fetch_one(pool)
        .await
}
