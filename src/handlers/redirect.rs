use crate::{error::LinkError, links, AppState};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

/// GET /:token
///
/// Resolve the token and 302 to the original URL. Unknown, deactivated, and
/// just-expired tokens are all the same 404 to the outside; in the expired
/// case the lookup itself flips the link inactive, so the sweeper does not
/// have to run first.
pub async fn follow_link(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Response {
    match links::resolve(&state.db, &token, Utc::now()).await {
        Ok(original_url) => (StatusCode::FOUND, [(header::LOCATION, original_url)]).into_response(),
        Err(LinkError::NotResolvable) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "cannot find active link" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("resolve failed for token '{}': {:?}", token, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        }
    }
}
