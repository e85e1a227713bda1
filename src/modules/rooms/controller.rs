use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use classgrid_core::AppError;
use classgrid_core::errors::ErrorResponse;
use classgrid_models::registry::RegistryFilterParams;
use classgrid_models::{CreateRoomDto, PaginatedRoomsResponse, Room, RoomId, UpdateRoomDto};
use tracing::instrument;

use crate::middleware::auth::{AuthUser, RequireCoordinator};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::RoomService;

/// Create a room (coordinators only)
#[utoipa::path(
    post,
    path = "/api/rooms",
    request_body = CreateRoomDto,
    responses(
        (status = 201, description = "Room created successfully", body = Room),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires the coordinator role", body = ErrorResponse),
        (status = 409, description = "A room with this name already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Rooms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_room(
    State(state): State<AppState>,
    RequireCoordinator(_auth_user): RequireCoordinator,
    ValidatedJson(dto): ValidatedJson<CreateRoomDto>,
) -> Result<(StatusCode, Json<Room>), AppError> {
    let room = RoomService::create_room(state.store(), dto).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

#[utoipa::path(
    get,
    path = "/api/rooms",
    params(RegistryFilterParams),
    responses(
        (status = 200, description = "List of rooms, ordered by name", body = PaginatedRoomsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Rooms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_rooms(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<RegistryFilterParams>,
) -> Result<Json<PaginatedRoomsResponse>, AppError> {
    let rooms = RoomService::get_rooms(state.store(), filters).await?;
    Ok(Json(rooms))
}

#[utoipa::path(
    get,
    path = "/api/rooms/{id}",
    params(
        ("id" = Uuid, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room details", body = Room),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse)
    ),
    tag = "Rooms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_room(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<RoomId>,
) -> Result<Json<Room>, AppError> {
    let room = RoomService::get_room(state.store(), id).await?;
    Ok(Json(room))
}

/// Update a room (coordinators only)
///
/// A room referenced by any schedule assignment cannot be renamed.
#[utoipa::path(
    put,
    path = "/api/rooms/{id}",
    params(
        ("id" = Uuid, Path, description = "Room ID")
    ),
    request_body = UpdateRoomDto,
    responses(
        (status = 200, description = "Room updated successfully", body = Room),
        (status = 400, description = "Room is in use and cannot be renamed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires the coordinator role", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 409, description = "A room with this name already exists", body = ErrorResponse)
    ),
    tag = "Rooms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_room(
    State(state): State<AppState>,
    RequireCoordinator(_auth_user): RequireCoordinator,
    Path(id): Path<RoomId>,
    ValidatedJson(dto): ValidatedJson<UpdateRoomDto>,
) -> Result<Json<Room>, AppError> {
    let room = RoomService::update_room(state.store(), id, dto).await?;
    Ok(Json(room))
}

/// Delete a room (coordinators only)
#[utoipa::path(
    delete,
    path = "/api/rooms/{id}",
    params(
        ("id" = Uuid, Path, description = "Room ID")
    ),
    responses(
        (status = 204, description = "Room deleted successfully"),
        (status = 400, description = "Room is in use and cannot be deleted", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires the coordinator role", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse)
    ),
    tag = "Rooms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_room(
    State(state): State<AppState>,
    RequireCoordinator(_auth_user): RequireCoordinator,
    Path(id): Path<RoomId>,
) -> Result<StatusCode, AppError> {
    RoomService::delete_room(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
