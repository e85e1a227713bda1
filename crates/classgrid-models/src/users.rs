//! User data models and DTOs.
//!
//! # Core Types
//!
//! - [`User`] - The public profile returned by the API
//! - [`UserRecord`] - The stored document: profile plus password hash
//!
//! # Request DTOs
//!
//! - [`RegisterDto`] - Self-registration of a teacher account
//! - [`UpdateProfileDto`] - Update the display name
//! - [`ChangePasswordDto`] - Change password (requires current password)
//! - [`ChangeEmailDto`] - Change email (requires password)
//! - [`UserFilterParams`] - Query parameters for listing users

use chrono::{DateTime, Utc};
use classgrid_auth::Role;
use classgrid_core::serde::deserialize_optional_from_str;
use classgrid_core::{Paginated, PaginationMeta, PaginationParams, cpf};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::ids::UserId;
use crate::value_types::{Cpf, Email};

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub cpf: Cpf,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user as persisted in the `users` collection.
///
/// Never returned directly from a handler; convert to [`User`] first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: User,
    pub password_hash: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        record.user
    }
}

/// Validation rule for CPF fields in request bodies.
pub fn validate_cpf(value: &str) -> Result<(), ValidationError> {
    if !cpf::is_well_formed(value) {
        let mut err = ValidationError::new("cpf_format");
        err.message = Some("CPF must contain exactly 11 digits".into());
        return Err(err);
    }
    if !cpf::is_valid(value) {
        let mut err = ValidationError::new("cpf_checksum");
        err.message = Some("CPF is not valid".into());
        return Err(err);
    }
    Ok(())
}

/// DTO for self-registration. Always creates a teacher account.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterDto {
    #[validate(length(min = 1, max = 120, message = "name is required"))]
    #[schema(example = "Ana Souza")]
    pub name: String,
    #[validate(email(message = "email is not valid"))]
    #[schema(example = "ana@escola.br")]
    pub email: String,
    /// Punctuated (`529.982.247-25`) or bare digits
    #[validate(custom(function = "validate_cpf"))]
    #[schema(example = "529.982.247-25")]
    pub cpf: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8 to 128 characters"))]
    #[schema(example = "password123")]
    pub password: String,
}

/// DTO for updating the caller's profile.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
}

/// DTO for changing the caller's password.
///
/// Requires the current password for verification before
/// allowing the password change.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordDto {
    #[validate(length(min = 1))]
    #[serde(alias = "old_password")]
    pub current_password: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8 to 128 characters"))]
    #[schema(example = "newPassword123")]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChangeEmailDto {
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(email(message = "email is not valid"))]
    pub new_email: String,
}

/// Query parameters for listing users.
#[derive(Debug, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub role: Option<Role>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl UserFilterParams {
    pub fn matches(&self, user: &User) -> bool {
        if self.role.is_some_and(|role| role != user.role) {
            return false;
        }
        match self.name.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => user
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }
}

/// Paginated response containing users.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}

impl From<Paginated<User>> for PaginatedUsersResponse {
    fn from(page: Paginated<User>) -> Self {
        Self {
            data: page.data,
            meta: page.meta,
        }
    }
}
