use crate::{
    db,
    error::LinkError,
    expiry,
    models::{LinkFilter, ShortLink},
    paginate::{paginate, Page},
    token::TokenGenerator,
};
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

/// Maximum insert attempts when a generated token collides with an existing
/// row. The token space is 62^9, so even one collision is rare and a second
/// in a row vanishingly so.
const MAX_TOKEN_ATTEMPTS: u32 = 4;

// ── Create ─────────────────────────────────────────────────────────────────

/// Create a new short link for `original_url`, due `ttl_minutes` after `now`.
///
/// Draws a fresh token and retries on [`LinkError::DuplicateToken`], up to
/// [`MAX_TOKEN_ATTEMPTS`] attempts; any other store error is returned as-is.
pub async fn create_short_link(
    pool: &SqlitePool,
    generator: &TokenGenerator,
    ttl_minutes: i64,
    original_url: &str,
    now: DateTime<Utc>,
) -> Result<ShortLink, LinkError> {
    let due_date = now + Duration::minutes(ttl_minutes);

    for _ in 0..MAX_TOKEN_ATTEMPTS {
        let token = generator.generate();
        match db::insert_link(pool, original_url, &token, due_date).await {
            Ok(link) => return Ok(link),
            Err(LinkError::DuplicateToken) => continue,
            Err(e) => return Err(e),
        }
    }

    Err(LinkError::DuplicateToken)
}

// ── Resolve ────────────────────────────────────────────────────────────────

/// Resolve a token to its original URL as of `now`.
///
/// An active link past its due date is deactivated on the spot and reported
/// as not resolvable; the sweeper does not need to have run for expiry to be
/// observable. The deactivation is best-effort: if that write fails the
/// answer is still `NotResolvable`. A click is recorded only on the success
/// path, so a lazily-expired link leaves no click behind.
pub async fn resolve(
    pool: &SqlitePool,
    token: &str,
    now: DateTime<Utc>,
) -> Result<String, LinkError> {
    let Some(link) = db::find_active_by_token(pool, token).await? else {
        return Err(LinkError::NotResolvable);
    };

    if expiry::is_expired(&link, now) {
        if let Err(e) = db::deactivate(pool, token).await {
            tracing::error!("lazy deactivation of '{}' failed: {:?}", token, e);
        }
        return Err(LinkError::NotResolvable);
    }

    db::record_click(pool, link.id, now).await?;

    Ok(link.original_url)
}

// ── Deactivate ─────────────────────────────────────────────────────────────

/// Deactivate a link by token. `NotFound` covers both an unknown token and a
/// link that is already inactive; the store's filtered UPDATE cannot tell
/// them apart and the caller does not need to.
pub async fn deactivate(pool: &SqlitePool, token: &str) -> Result<(), LinkError> {
    if db::deactivate(pool, token).await? {
        Ok(())
    } else {
        Err(LinkError::NotFound)
    }
}

// ── Listing ────────────────────────────────────────────────────────────────

/// One page of links in insertion order, with the pagination metadata for the
/// full filtered count.
pub async fn list_links(
    pool: &SqlitePool,
    filter: LinkFilter,
    page: i64,
    size: i64,
) -> Result<(Vec<ShortLink>, Page), LinkError> {
    let total = db::count_links(pool, filter).await?;
    let window = paginate(page, size, total);
    let links = db::list_links(pool, filter, window.offset_min, size).await?;

    Ok((links, window))
}
