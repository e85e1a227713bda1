use axum::{Json, extract::State, http::StatusCode};
use classgrid_core::AppError;
use classgrid_core::errors::ErrorResponse;
use classgrid_models::{LoginRequest, LoginResponse, RegisterDto, User};
use tracing::instrument;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Register a new teacher account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Teacher registered successfully", body = User),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Email or CPF already registered", body = ErrorResponse),
        (status = 422, description = "Validation error, including an invalid CPF", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::register_user(state.store(), dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login and receive a JWT access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(state.store(), dto, &state.jwt_config).await?;
    Ok(Json(response))
}
