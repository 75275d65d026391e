use crate::{
    db,
    error::LinkError,
    models::{LinkStats, RankedLink},
    paginate::{paginate, Page},
};
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

// ── Per-link windows ───────────────────────────────────────────────────────

/// Click counts for one link over the last hour and the last 24 hours, both
/// windows anchored at `now` and recomputed from the click log on every call.
/// Nothing is cached.
pub async fn stats_for(
    pool: &SqlitePool,
    link_id: i64,
    now: DateTime<Utc>,
) -> Result<LinkStats, sqlx::Error> {
    let hour_count = db::count_clicks_since(pool, link_id, now - Duration::hours(1)).await?;
    let day_count = db::count_clicks_since(pool, link_id, now - Duration::hours(24)).await?;

    Ok(LinkStats {
        hour_count,
        day_count,
    })
}

// ── Ranked listing ─────────────────────────────────────────────────────────

/// Order links by recent click volume: most day-clicks first, day ties broken
/// by hour-clicks. The sort is stable, so links tied on both counts keep the
/// ascending-id order they arrived in.
pub fn rank(links: &mut [RankedLink]) {
    links.sort_by(|a, b| {
        b.stats
            .day_count
            .cmp(&a.stats.day_count)
            .then(b.stats.hour_count.cmp(&a.stats.hour_count))
    });
}

/// Ranked statistics listing: every link's windowed counts, sorted globally,
/// then cut to the requested page. Pagination must come after the sort;
/// ranking compares across all links, not within one page.
pub async fn ranked_stats(
    pool: &SqlitePool,
    page: i64,
    size: i64,
    now: DateTime<Utc>,
) -> Result<(Vec<RankedLink>, Page), LinkError> {
    let links = db::all_links(pool).await?;
    let total = links.len() as i64;

    let mut ranked = Vec::with_capacity(links.len());
    for link in links {
        let stats = stats_for(pool, link.id, now).await?;
        ranked.push(RankedLink { link, stats });
    }
    rank(&mut ranked);

    let window = paginate(page, size, total);
    let page_links: Vec<RankedLink> = ranked
        .into_iter()
        .skip(window.offset_min as usize)
        .take(size as usize)
        .collect();

    Ok((page_links, window))
}
