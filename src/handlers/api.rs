use crate::{
    auth::AdminUser,
    config::AppConfig,
    error::LinkError,
    links,
    models::{LinkFilter, RankedLink, ShortLink},
    paginate::Page,
    stats, AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

// ── Request types ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GenerateRequest {
    url: String,
}

#[derive(Deserialize)]
pub struct DeactivateRequest {
    short_url: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    filter: LinkFilter,
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_size")]
    size: i64,
}

#[derive(Deserialize)]
pub struct StatsQuery {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_size")]
    size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    30
}

// ── Response types ─────────────────────────────────────────────────────────

/// One link in the plain listing. `link` carries the full short URL.
#[derive(Serialize)]
pub struct LinkInfo {
    id: i64,
    link: String,
    original_link: String,
    is_active: bool,
    due_date: DateTime<Utc>,
}

impl LinkInfo {
    fn new(link: ShortLink, config: &AppConfig) -> Self {
        Self {
            id: link.id,
            link: config.short_url(&link.token),
            original_link: link.original_url,
            is_active: link.is_active,
            due_date: link.due_date,
        }
    }
}

/// One link in the ranked statistics listing.
#[derive(Serialize)]
pub struct StatisticLinkInfo {
    link: String,
    orig_link: String,
    last_hour_clicks: i64,
    last_day_clicks: i64,
    is_active: bool,
    due_date: DateTime<Utc>,
}

impl StatisticLinkInfo {
    fn new(ranked: RankedLink, config: &AppConfig) -> Self {
        Self {
            link: config.short_url(&ranked.link.token),
            orig_link: ranked.link.original_url,
            last_hour_clicks: ranked.stats.hour_count,
            last_day_clicks: ranked.stats.day_count,
            is_active: ranked.link.is_active,
            due_date: ranked.link.due_date,
        }
    }
}

#[derive(Serialize)]
pub struct PaginationInfo {
    page: i64,
    size: i64,
    total_pages: i64,
    next: bool,
    prev: bool,
}

impl PaginationInfo {
    fn new(page: i64, size: i64, window: &Page) -> Self {
        Self {
            page,
            size,
            total_pages: window.total_pages,
            next: window.has_next,
            prev: window.has_prev,
        }
    }
}

/// Envelope shared by both listing endpoints.
#[derive(Serialize)]
pub struct Listing<T> {
    links: Vec<T>,
    info: PaginationInfo,
}

// ── Create link ────────────────────────────────────────────────────────────

/// POST /generate
///
/// Create a short link for the submitted URL, expiring after the configured
/// lifetime. Token collisions are retried internally; a request that still
/// cannot be stored fails with 400.
pub async fn generate_link(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateRequest>,
) -> Response {
    // Basic URL validation: well-formed shape only, never reachability
    let url = body.url.trim().to_owned();
    if url.is_empty() || !(url.starts_with("http://") || url.starts_with("https://")) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "url must start with http:// or https://" })),
        )
            .into_response();
    }

    match links::create_short_link(
        &state.db,
        &state.generator,
        state.config.expire_minutes,
        &url,
        Utc::now(),
    )
    .await
    {
        Ok(link) => (
            StatusCode::CREATED,
            Json(json!({ "message": state.config.short_url(&link.token) })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to create link for '{}': {:?}", url, e);
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "cannot create link" })),
            )
                .into_response()
        }
    }
}

// ── Deactivate link ────────────────────────────────────────────────────────

/// PUT /deactivate
///
/// Mark a link inactive ahead of its due date. 404 covers both an unknown
/// short URL and one that is already inactive.
pub async fn deactivate_link(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Json(body): Json<DeactivateRequest>,
) -> Response {
    let Some(token) = state.config.token_from_short_url(&body.short_url) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "short_url was not generated by this service" })),
        )
            .into_response();
    };

    match links::deactivate(&state.db, token).await {
        Ok(()) => Json(json!({ "message": "link deactivated" })).into_response(),
        Err(LinkError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "cannot find this active link" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to deactivate '{}': {:?}", token, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        }
    }
}

// ── Listings ───────────────────────────────────────────────────────────────

/// GET /links?filter=all|active|inactive&page&size
///
/// Links in insertion order, with pagination metadata computed over the full
/// filtered count.
pub async fn list_links(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Response {
    if let Err(response) = validate_page(query.page, query.size) {
        return response;
    }

    match links::list_links(&state.db, query.filter, query.page, query.size).await {
        Ok((rows, window)) => {
            let links = rows
                .into_iter()
                .map(|link| LinkInfo::new(link, &state.config))
                .collect();

            Json(Listing {
                links,
                info: PaginationInfo::new(query.page, query.size, &window),
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!("failed to list links: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        }
    }
}

/// GET /links/stats?page&size
///
/// All links ranked by recent click volume (day window first, hour window as
/// tie-break), paginated only after the full ranking.
pub async fn link_stats(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> Response {
    if let Err(response) = validate_page(query.page, query.size) {
        return response;
    }

    match stats::ranked_stats(&state.db, query.page, query.size, Utc::now()).await {
        Ok((rows, window)) => {
            let links = rows
                .into_iter()
                .map(|ranked| StatisticLinkInfo::new(ranked, &state.config))
                .collect();

            Json(Listing {
                links,
                info: PaginationInfo::new(query.page, query.size, &window),
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!("failed to compute link stats: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        }
    }
}

// ── Private helpers ────────────────────────────────────────────────────────

fn validate_page(page: i64, size: i64) -> Result<(), Response> {
    if page < 1 || size < 1 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "page and size must both be >= 1" })),
        )
            .into_response());
    }
    Ok(())
}
