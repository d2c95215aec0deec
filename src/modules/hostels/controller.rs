use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::hostels::model::{CreateHostelDto, Hostel, UpdateHostelDto};
use crate::modules::hostels::service::HostelService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/hostels",
    request_body = CreateHostelDto,
    responses(
        (status = 201, description = "Hostel created successfully", body = Hostel),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Hostels"
)]
#[instrument(skip(state, dto))]
pub async fn create_hostel(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateHostelDto>,
) -> Result<(StatusCode, Json<Hostel>), AppError> {
    let hostel = HostelService::create_hostel(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(hostel)))
}

#[utoipa::path(
    get,
    path = "/api/hostels",
    responses(
        (status = 200, description = "List of hostels", body = Vec<Hostel>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn get_hostels(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Hostel>>, AppError> {
    let hostels = HostelService::get_hostels(&state.db).await?;
    Ok(Json(hostels))
}

#[utoipa::path(
    get,
    path = "/api/hostels/{id}",
    params(("id" = Uuid, Path, description = "Hostel ID")),
    responses(
        (status = 200, description = "Hostel details", body = Hostel),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Hostel not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn get_hostel(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Hostel>, AppError> {
    let hostel = HostelService::get_hostel(&state.db, id).await?;
    Ok(Json(hostel))
}

#[utoipa::path(
    put,
    path = "/api/hostels/{id}",
    params(("id" = Uuid, Path, description = "Hostel ID")),
    request_body = UpdateHostelDto,
    responses(
        (status = 200, description = "Hostel updated successfully", body = Hostel),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Hostel not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Hostels"
)]
#[instrument(skip(state, dto))]
pub async fn update_hostel(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateHostelDto>,
) -> Result<Json<Hostel>, AppError> {
    let hostel = HostelService::update_hostel(&state.db, id, dto).await?;
    Ok(Json(hostel))
}

#[utoipa::path(
    delete,
    path = "/api/hostels/{id}",
    params(("id" = Uuid, Path, description = "Hostel ID")),
    responses(
        (status = 200, description = "Hostel deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Hostel not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn delete_hostel(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    HostelService::delete_hostel(&state.db, id).await?;
    Ok(Json(json!({"message": "Hostel deleted successfully"})))
}
