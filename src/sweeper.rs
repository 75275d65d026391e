use crate::db;
use chrono::Utc;
use sqlx::SqlitePool;
use std::time::Duration;

/// Recurring expiry sweep: every `interval`, flip all overdue active links to
/// inactive in one bulk update.
///
/// Runs until the owning task is aborted; `main` holds the JoinHandle and
/// aborts it when the server loop exits. Each run is stateless and
/// idempotent, and a failed run is logged and swallowed so the next tick
/// still fires. The first sweep happens immediately at startup, catching
/// links that expired while the service was down.
pub async fn run(pool: SqlitePool, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        ticker.tick().await;
        match db::bulk_deactivate(&pool, Utc::now()).await {
            Ok(0) => tracing::debug!("expiry sweep: nothing to deactivate"),
            Ok(n) => tracing::info!("expiry sweep: deactivated {} expired link(s)", n),
            Err(e) => tracing::error!("expiry sweep failed: {:?}", e),
        }
    }
}
