//! Authentication DTOs and small shared response bodies.

use classgrid_core::cpf;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::User;

pub use classgrid_auth::Claims;

/// Login request with email and password.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Successful login: a bearer token and the account it belongs to.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of checking a candidate CPF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CpfCheckResponse {
    pub canonical: String,
    pub well_formed: bool,
    pub valid: bool,
    /// `DDD.DDD.DDD-DD` when well formed, the input unchanged otherwise
    pub display: String,
}

impl CpfCheckResponse {
    pub fn check(input: &str) -> Self {
        Self {
            canonical: cpf::canonicalize(input),
            well_formed: cpf::is_well_formed(input),
            valid: cpf::is_valid(input),
            display: cpf::display(input),
        }
    }
}
