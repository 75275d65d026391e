pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod expiry;
pub mod handlers;
pub mod links;
pub mod models;
pub mod paginate;
pub mod stats;
pub mod sweeper;
pub mod token;

use token::TokenGenerator;

// ── Shared application state ───────────────────────────────────────────────

pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub config: config::AppConfig,
    pub generator: TokenGenerator,
}
