use anyhow::{bail, Context, Result};

/// Which `Store` implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process-local store seeded with the demo catalog.
    Memory,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    /// Required when `store_backend` is `Postgres`.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// Letterhead used on generated offer letters.
    pub company_name: String,
    pub company_tagline: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let store_backend = match optional_env("STORE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("STORE_BACKEND must be 'postgres' or 'memory', got '{other}'"),
        };
        let database_url = match store_backend {
            StoreBackend::Postgres => Some(require_env("DATABASE_URL")?),
            StoreBackend::Memory => optional_env("DATABASE_URL"),
        };

        Ok(Config {
            store_backend,
            database_url,
            db_max_connections: optional_env("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            company_name: optional_env("COMPANY_NAME")
                .unwrap_or_else(|| "Manac Infotech Pvt Ltd".to_string()),
            company_tagline: optional_env("COMPANY_TAGLINE")
                .unwrap_or_else(|| "Excellence in Technology".to_string()),
        })
    }

    /// Configuration used by tests: in-memory store, default letterhead.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            store_backend: StoreBackend::Memory,
            database_url: None,
            db_max_connections: 1,
            port: 0,
            rust_log: "debug".to_string(),
            company_name: "Manac Infotech Pvt Ltd".to_string(),
            company_tagline: "Excellence in Technology".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
