use thiserror::Error;

/// Errors raised by a [`DocumentStore`](crate::DocumentStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The database rejected a query or could not be reached.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The store configuration is incomplete.
    #[error("Configuration error: {0}")]
    Config(String),
}
