//! # Classgrid CLI
//!
//! Administrative and development tooling for Classgrid.
//!
//! - [`coordinator`]: creates coordinator accounts, which the API never does
//! - [`seeder`]: fills a store with fake teachers, registries and assignments
//!
//! ## Usage
//!
//! ```ignore
//! use classgrid_cli::seeder::{SeedConfig, seed_all};
//!
//! let store = classgrid_db::connect(&StoreConfig::from_env()).await?;
//! seed_all(store.as_ref(), SeedConfig::new(20)).await?;
//! ```

pub mod coordinator;
pub mod seeder;

/// Error type shared by the CLI commands.
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;
