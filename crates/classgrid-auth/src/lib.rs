//! # Classgrid Auth
//!
//! Authentication primitives for the Classgrid API:
//!
//! - [`claims`]: the [`Role`] enum and JWT [`Claims`]
//! - [`jwt`]: access token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use classgrid_auth::{Role, create_access_token, verify_token};
//! use classgrid_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "ana@escola.br", Role::Teacher, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, Role::Teacher);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, Role};
pub use jwt::{create_access_token, verify_token};
