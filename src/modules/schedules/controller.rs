use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use classgrid_core::AppError;
use classgrid_core::errors::ErrorResponse;
use classgrid_models::{
    AssignmentId, CreateAssignmentDto, GridParams, PaginatedAssignmentsResponse,
    ScheduleAssignment, ScheduleFilterParams, ScheduleGrid, SlotCatalog, SlotConflict,
    UpdateAssignmentDto,
};
use tracing::instrument;

use crate::middleware::auth::{AuthUser, RequireCoordinator};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::ScheduleService;

/// List the weekdays and time slots of the grid
#[utoipa::path(
    get,
    path = "/api/schedules/slots",
    responses(
        (status = 200, description = "Weekdays and time slots, in grid order", body = SlotCatalog),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
pub async fn get_slots(_auth_user: AuthUser) -> Json<SlotCatalog> {
    Json(SlotCatalog::default())
}

/// Book a class in the caller's own week
#[utoipa::path(
    post,
    path = "/api/schedules",
    request_body = CreateAssignmentDto,
    responses(
        (status = 201, description = "Assignment created", body = ScheduleAssignment),
        (status = 400, description = "Unknown subject, room, day or time slot", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Caller already has a class in this slot", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_assignment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateAssignmentDto>,
) -> Result<(StatusCode, Json<ScheduleAssignment>), AppError> {
    let assignment =
        ScheduleService::create_assignment(state.store(), auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// List assignments
///
/// Teachers see their own assignments. Coordinators see every teacher's, or
/// one teacher's when `teacher_id` is given.
#[utoipa::path(
    get,
    path = "/api/schedules",
    params(ScheduleFilterParams),
    responses(
        (status = 200, description = "Assignments ordered by day and time", body = PaginatedAssignmentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Teachers can only view their own schedule", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_assignments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(filters): Query<ScheduleFilterParams>,
) -> Result<Json<PaginatedAssignmentsResponse>, AppError> {
    let assignments = ScheduleService::get_assignments(
        state.store(),
        auth_user.user_id()?,
        auth_user.role(),
        filters,
    )
    .await?;
    Ok(Json(assignments))
}

/// Weekly grid with per-cell conflict results
#[utoipa::path(
    get,
    path = "/api/schedules/grid",
    params(GridParams),
    responses(
        (status = 200, description = "One row per time slot, one cell per weekday", body = ScheduleGrid),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Teachers can only view their own schedule", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_grid(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<GridParams>,
) -> Result<Json<ScheduleGrid>, AppError> {
    let grid =
        ScheduleService::get_grid(state.store(), auth_user.user_id()?, auth_user.role(), params)
            .await?;
    Ok(Json(grid))
}

/// Every conflicting slot across all teachers (coordinators only)
#[utoipa::path(
    get,
    path = "/api/schedules/conflicts",
    responses(
        (status = 200, description = "Conflicting slots ordered by day and time", body = Vec<SlotConflict>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires the coordinator role", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_conflicts(
    State(state): State<AppState>,
    RequireCoordinator(_auth_user): RequireCoordinator,
) -> Result<Json<Vec<SlotConflict>>, AppError> {
    let conflicts = ScheduleService::get_conflicts(state.store()).await?;
    Ok(Json(conflicts))
}

#[utoipa::path(
    get,
    path = "/api/schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Assignment ID")
    ),
    responses(
        (status = 200, description = "Assignment details", body = ScheduleAssignment),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_assignment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<AssignmentId>,
) -> Result<Json<ScheduleAssignment>, AppError> {
    let assignment =
        ScheduleService::get_assignment(state.store(), auth_user.user_id()?, auth_user.role(), id)
            .await?;
    Ok(Json(assignment))
}

/// Move or edit one of the caller's assignments
#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Assignment ID")
    ),
    request_body = UpdateAssignmentDto,
    responses(
        (status = 200, description = "Assignment updated", body = ScheduleAssignment),
        (status = 400, description = "Unknown subject, room, day or time slot", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the owning teacher can change this assignment", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse),
        (status = 409, description = "Caller already has a class in the target slot", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_assignment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<AssignmentId>,
    ValidatedJson(dto): ValidatedJson<UpdateAssignmentDto>,
) -> Result<Json<ScheduleAssignment>, AppError> {
    let assignment =
        ScheduleService::update_assignment(state.store(), auth_user.user_id()?, id, dto).await?;
    Ok(Json(assignment))
}

#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    params(
        ("id" = Uuid, Path, description = "Assignment ID")
    ),
    responses(
        (status = 204, description = "Assignment deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the owning teacher can change this assignment", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_assignment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<AssignmentId>,
) -> Result<StatusCode, AppError> {
    ScheduleService::delete_assignment(state.store(), auth_user.user_id()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
