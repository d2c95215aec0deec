use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::rooms::model::{CreateRoomDto, Room, RoomFilterParams, UpdateRoomDto};
use crate::modules::rooms::service::RoomService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/rooms",
    request_body = CreateRoomDto,
    responses(
        (status = 201, description = "Room created successfully", body = Room),
        (status = 400, description = "Bad request - hostel does not exist", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Rooms"
)]
#[instrument(skip(state, dto))]
pub async fn create_room(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateRoomDto>,
) -> Result<(StatusCode, Json<Room>), AppError> {
    let room = RoomService::create_room(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// List rooms, optionally restricted to one hostel via `?hostel_id=`.
#[utoipa::path(
    get,
    path = "/api/rooms",
    params(RoomFilterParams),
    responses(
        (status = 200, description = "List of rooms", body = Vec<Room>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Rooms"
)]
#[instrument(skip(state))]
pub async fn get_rooms(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<RoomFilterParams>,
) -> Result<Json<Vec<Room>>, AppError> {
    let rooms = RoomService::get_rooms(&state.db, params.hostel_id).await?;
    Ok(Json(rooms))
}

#[utoipa::path(
    get,
    path = "/api/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room details", body = Room),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Rooms"
)]
#[instrument(skip(state))]
pub async fn get_room(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Room>, AppError> {
    let room = RoomService::get_room(&state.db, id).await?;
    Ok(Json(room))
}

#[utoipa::path(
    put,
    path = "/api/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room ID")),
    request_body = UpdateRoomDto,
    responses(
        (status = 200, description = "Room updated successfully", body = Room),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Rooms"
)]
#[instrument(skip(state, dto))]
pub async fn update_room(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateRoomDto>,
) -> Result<Json<Room>, AppError> {
    let room = RoomService::update_room(&state.db, id, dto).await?;
    Ok(Json(room))
}

#[utoipa::path(
    delete,
    path = "/api/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Rooms"
)]
#[instrument(skip(state))]
pub async fn delete_room(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    RoomService::delete_room(&state.db, id).await?;
    Ok(Json(json!({"message": "Room deleted successfully"})))
}
