//! Document store configuration.
//!
//! # Environment Variables
//!
//! - `STORE_BACKEND`: `memory` (default) or `postgres`
//! - `DATABASE_URL`: PostgreSQL connection string, required for `postgres`
//! - `DATABASE_MAX_CONNECTIONS`: pool size for `postgres` (default: 5)

use std::env;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local store, lost on restart. Used for development and tests.
    #[default]
    Memory,
    /// JSONB documents in PostgreSQL.
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 5,
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let backend = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse().unwrap_or_else(|err| {
                tracing::warn!("{}, using the in-memory store", err);
                StoreBackend::Memory
            }),
            Err(_) => StoreBackend::default(),
        };

        Self {
            backend,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// In-memory configuration, handy for tests.
    #[must_use]
    pub fn memory() -> Self {
        Self::default()
    }
}
