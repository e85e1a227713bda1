//! Classgrid Observability
//!
//! - [`init_tracing`]: global `tracing` subscriber (console, optional JSON file)
//! - [`logging_middleware`]: per-request HTTP logging for axum
//!
//! # Examples
//!
//! ```no_run
//! use classgrid_observability::{LoggingConfig, init_tracing};
//!
//! let _guard = init_tracing(&LoggingConfig::from_env());
//! tracing::info!("ready");
//! ```

pub mod logging;
pub mod middleware;

pub use logging::{LogFormat, LoggingConfig, init_tracing};
pub use middleware::{REQUEST_ID_HEADER, logging_middleware};
