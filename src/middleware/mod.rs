//! Request extractors for authentication and authorization.
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] verifies the JWT and exposes its claims
//! 3. [`auth::RequireCoordinator`] additionally rejects non-coordinators with 403
//!
//! ```ignore
//! use crate::middleware::auth::{AuthUser, RequireCoordinator};
//!
//! async fn get_profile(auth_user: AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! async fn create_room(RequireCoordinator(auth_user): RequireCoordinator) -> impl IntoResponse {
//!     // only coordinators get here
//! }
//! ```

pub mod auth;
