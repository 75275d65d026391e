use crate::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::sync::Arc;

// ── AdminUser extractor ────────────────────────────────────────────────────

/// Extractor that enforces HTTP Basic auth on any handler that includes it as
/// a parameter. If the request carries credentials matching the configured
/// admin username/password the extractor succeeds; otherwise it
/// short-circuits with a 401 challenge so the handler never runs.
pub struct AdminUser;

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = Arc::<AppState>::from_ref(state);

        if let Some((username, password)) = basic_credentials(parts) {
            if username == state.config.admin_username && password == state.config.admin_password {
                return Ok(AdminUser);
            }
        }

        Err((
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic realm=\"shortspan\"")],
            "invalid credentials",
        )
            .into_response())
    }
}

/// Decode an `Authorization: Basic …` header into `(username, password)`,
/// if present and well-formed.
fn basic_credentials(parts: &Parts) -> Option<(String, String)> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(BASE64.decode(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_owned(), password.to_owned()))
}
