//! # Classgrid Core
//!
//! Core types, errors, and utilities for the Classgrid API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`cpf`]: Brazilian CPF (identity number) canonicalization, validation and formatting
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Pagination utilities for API responses
//! - [`password`]: Password hashing and verification
//! - [`serde`]: Query-string deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use classgrid_core::cpf;
//! use classgrid_core::errors::AppError;
//!
//! assert!(cpf::is_valid("529.982.247-25"));
//! assert_eq!(cpf::display("52998224725"), "529.982.247-25");
//!
//! let error = AppError::not_found(anyhow::anyhow!("Room not found"));
//! ```

pub mod cpf;
pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{Paginated, PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
