use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A shortened link record from the `links` table.
///
/// `is_active` starts true and flips to false exactly once, either lazily
/// during a resolve or by the expiry sweeper. An inactive link is never
/// resolvable again, whatever its due date says.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShortLink {
    pub id: i64,
    pub token: String,
    pub original_url: String,
    pub is_active: bool,
    pub due_date: DateTime<Utc>,
}

/// A single click event from the `clicks` table. Written once per successful
/// resolve, never updated.
#[derive(Debug, Clone, sqlx::FromRow)]
#[allow(dead_code)]
pub struct ClickEvent {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
}

/// Click counts for one link over the sliding hour/day windows, both
/// anchored at the instant the statistics were requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    pub hour_count: i64,
    pub day_count: i64,
}

/// A link joined with its windowed click counts, used by the ranked listing.
#[derive(Debug, Clone)]
pub struct RankedLink {
    pub link: ShortLink,
    pub stats: LinkStats,
}

/// Which activation states a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkFilter {
    #[default]
    All,
    Active,
    Inactive,
}
