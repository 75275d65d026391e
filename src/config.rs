use anyhow::{Context, Result};

use crate::token::TOKEN_LEN;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string, e.g. "sqlite:./shortspan.db"
    pub database_url: String,

    /// Host to bind the HTTP server to, e.g. "0.0.0.0"
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Public base URL embedded in generated short links, e.g. "https://go.example.com"
    /// Must NOT have a trailing slash.
    pub base_url: String,

    /// Lifetime of a newly created link, in minutes. The link's due date is
    /// set this far past its creation time.
    pub expire_minutes: i64,

    /// How often the expiry sweeper wakes up, in seconds.
    pub sweep_interval_seconds: u64,

    /// Credentials guarding the create/deactivate/listing endpoints.
    pub admin_username: String,
    pub admin_password: String,
}

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        let admin_username = std::env::var("ADMIN_USERNAME")
            .context("ADMIN_USERNAME must be set in the environment or .env file")?;

        let admin_password = std::env::var("ADMIN_PASSWORD")
            .context("ADMIN_PASSWORD must be set in the environment or .env file")?;

        if admin_password.trim().is_empty() {
            anyhow::bail!("ADMIN_PASSWORD must not be empty");
        }

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse::<u16>()
            .context("PORT must be a valid port number (1–65535)")?;

        let expire_minutes = std::env::var("EXPIRE_MINUTES")
            .unwrap_or_else(|_| "60".into())
            .parse::<i64>()
            .context("EXPIRE_MINUTES must be a whole number of minutes")?;

        if expire_minutes <= 0 {
            anyhow::bail!("EXPIRE_MINUTES must be greater than 0");
        }

        let sweep_interval_seconds = std::env::var("SWEEP_INTERVAL_SECONDS")
            .unwrap_or_else(|_| "15".into())
            .parse::<u64>()
            .context("SWEEP_INTERVAL_SECONDS must be a whole number of seconds")?;

        if sweep_interval_seconds == 0 {
            anyhow::bail!("SWEEP_INTERVAL_SECONDS must be greater than 0");
        }

        let base_url = std::env::var("BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_owned();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./shortspan.db".into()),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            base_url,
            expire_minutes,
            sweep_interval_seconds,
            admin_username,
            admin_password,
        })
    }

    /// Assemble the externally visible short URL for a token.
    pub fn short_url(&self, token: &str) -> String {
        format!("{}/{}", self.base_url, token)
    }

    /// Extract the token from a short URL this service generated. Returns
    /// `None` when the URL has the wrong base or the wrong token shape.
    pub fn token_from_short_url<'a>(&self, short_url: &'a str) -> Option<&'a str> {
        let token = short_url
            .trim()
            .strip_prefix(&self.base_url)?
            .strip_prefix('/')?;

        (token.len() == TOKEN_LEN && token.chars().all(|c| c.is_ascii_alphanumeric()))
            .then_some(token)
    }
}
