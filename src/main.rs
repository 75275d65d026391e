use std::{sync::Arc, time::Duration};

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shortspan::{config::AppConfig, handlers, sweeper, token::TokenGenerator, AppState};

// ── Entry point ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (ignore error if file is absent — env vars may already be set)
    dotenvy::dotenv().ok();

    // Initialise structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shortspan=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env()?;
    tracing::info!("Starting shortspan on {}:{}", config.host, config.port);
    tracing::info!("Base URL: {}", config.base_url);
    tracing::info!(
        "New links expire after {} minute(s); sweeping every {}s",
        config.expire_minutes,
        config.sweep_interval_seconds
    );

    // Open SQLite connection pool
    // CREATE the file if it doesn't exist yet
    let db = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            config
                .database_url
                .parse::<sqlx::sqlite::SqliteConnectOptions>()?
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .foreign_keys(true),
        )
        .await?;

    // Run embedded migrations (files in migrations/)
    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("Database migrations applied");

    // The expiry sweeper is owned by this run loop: spawned with the server,
    // aborted when the server loop returns.
    let sweep = tokio::spawn(sweeper::run(
        db.clone(),
        Duration::from_secs(config.sweep_interval_seconds),
    ));

    // Build shared state
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        generator: TokenGenerator::new(),
    });

    // ── Router ─────────────────────────────────────────────────────────────
    let app = Router::new()
        // Health check — returns 200 OK with no auth required
        .route("/health", get(|| async { axum::http::StatusCode::OK }))
        // Private API (Basic auth enforced per-handler)
        .route("/generate", post(handlers::api::generate_link))
        .route("/deactivate", put(handlers::api::deactivate_link))
        .route("/links", get(handlers::api::list_links))
        .route("/links/stats", get(handlers::api::link_stats))
        // Short-link redirect — must come LAST so the API routes take priority
        .route("/:token", get(handlers::redirect::follow_link))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // ── Serve ──────────────────────────────────────────────────────────────
    let bind_addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    sweep.abort();
    Ok(())
}
