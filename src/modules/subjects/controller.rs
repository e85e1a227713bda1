use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use classgrid_core::AppError;
use classgrid_core::errors::ErrorResponse;
use classgrid_models::registry::RegistryFilterParams;
use classgrid_models::{CreateSubjectDto, PaginatedSubjectsResponse, Subject, SubjectId, UpdateSubjectDto};
use tracing::instrument;

use crate::middleware::auth::{AuthUser, RequireCoordinator};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::SubjectService;

/// Create a subject (coordinators only)
#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created successfully", body = Subject),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires the coordinator role", body = ErrorResponse),
        (status = 409, description = "A subject with this name already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_subject(
    State(state): State<AppState>,
    RequireCoordinator(_auth_user): RequireCoordinator,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let subject = SubjectService::create_subject(state.store(), dto).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

#[utoipa::path(
    get,
    path = "/api/subjects",
    params(RegistryFilterParams),
    responses(
        (status = 200, description = "List of subjects, ordered by name", body = PaginatedSubjectsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_subjects(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<RegistryFilterParams>,
) -> Result<Json<PaginatedSubjectsResponse>, AppError> {
    let subjects = SubjectService::get_subjects(state.store(), filters).await?;
    Ok(Json(subjects))
}

#[utoipa::path(
    get,
    path = "/api/subjects/{id}",
    params(
        ("id" = Uuid, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject details", body = Subject),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_subject(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<SubjectId>,
) -> Result<Json<Subject>, AppError> {
    let subject = SubjectService::get_subject(state.store(), id).await?;
    Ok(Json(subject))
}

/// Update a subject (coordinators only)
///
/// A subject referenced by any schedule assignment cannot be renamed.
#[utoipa::path(
    put,
    path = "/api/subjects/{id}",
    params(
        ("id" = Uuid, Path, description = "Subject ID")
    ),
    request_body = UpdateSubjectDto,
    responses(
        (status = 200, description = "Subject updated successfully", body = Subject),
        (status = 400, description = "Subject is in use and cannot be renamed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires the coordinator role", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse),
        (status = 409, description = "A subject with this name already exists", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_subject(
    State(state): State<AppState>,
    RequireCoordinator(_auth_user): RequireCoordinator,
    Path(id): Path<SubjectId>,
    ValidatedJson(dto): ValidatedJson<UpdateSubjectDto>,
) -> Result<Json<Subject>, AppError> {
    let subject = SubjectService::update_subject(state.store(), id, dto).await?;
    Ok(Json(subject))
}

/// Delete a subject (coordinators only)
#[utoipa::path(
    delete,
    path = "/api/subjects/{id}",
    params(
        ("id" = Uuid, Path, description = "Subject ID")
    ),
    responses(
        (status = 204, description = "Subject deleted successfully"),
        (status = 400, description = "Subject is in use and cannot be deleted", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires the coordinator role", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_subject(
    State(state): State<AppState>,
    RequireCoordinator(_auth_user): RequireCoordinator,
    Path(id): Path<SubjectId>,
) -> Result<StatusCode, AppError> {
    SubjectService::delete_subject(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
