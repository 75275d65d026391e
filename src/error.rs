use thiserror::Error;

/// Failures surfaced by the link engine and the store layer.
///
/// `DuplicateToken` is the only retryable case: the create flow draws a fresh
/// token and tries again. `NotResolvable` and `NotFound` are terminal and map
/// to 404 at the HTTP boundary. `Store` wraps everything the database itself
/// failed at and is never retried by the engine.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("short token already in use")]
    DuplicateToken,

    #[error("cannot find active link")]
    NotResolvable,

    #[error("link not found")]
    NotFound,

    #[error("store unavailable: {0}")]
    Store(#[from] sqlx::Error),
}
