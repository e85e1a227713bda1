//! # Classgrid Config
//!
//! Configuration types for the Classgrid API, loaded from environment variables
//! (a `.env` file is picked up by the binaries through `dotenvy`):
//!
//! - [`cors`]: allowed CORS origins
//! - [`jwt`]: JWT signing secret and token lifetime
//! - [`server`]: bind address
//! - [`store`]: document store backend selection
//!
//! # Example
//!
//! ```ignore
//! use classgrid_config::{CorsConfig, JwtConfig, ServerConfig, StoreConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let store_config = StoreConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;
pub mod store;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};
