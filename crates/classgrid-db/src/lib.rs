//! # Classgrid DB
//!
//! Document persistence for the Classgrid API.
//!
//! Records are stored as JSON documents in named collections behind the
//! object-safe [`DocumentStore`] trait. Two backends exist:
//!
//! - [`MemoryStore`]: process-local, for development and tests
//! - [`PgStore`]: a JSONB table in PostgreSQL, migrated on connect
//!
//! Application code works through the typed [`Collection`] handles in
//! [`collections`].
//!
//! # Example
//!
//! ```ignore
//! use classgrid_config::StoreConfig;
//! use classgrid_db::{Query, collections::ROOMS, connect};
//!
//! let store = connect(&StoreConfig::from_env()).await?;
//! let rooms = ROOMS.find(store.as_ref(), &Query::new().eq("name", "101")).await?;
//! ```

pub mod collection;
pub mod collections;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

use classgrid_config::{StoreBackend, StoreConfig};
use std::sync::Arc;

pub use collection::Collection;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{DocumentStore, Query};

/// Opens the backend named by `config`.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    let store: Arc<dyn DocumentStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                StoreError::Config("DATABASE_URL must be set for the postgres backend".into())
            })?;
            Arc::new(PgStore::connect(url, config.max_connections).await?)
        }
    };

    tracing::info!(backend = store.backend(), "Document store ready");
    Ok(store)
}
