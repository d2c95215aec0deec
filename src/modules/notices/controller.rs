use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::notices::model::{CreateNoticeDto, Notice, UpdateNoticeDto};
use crate::modules::notices::service::NoticeService;
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

/// Publish a notice authored by the caller.
#[utoipa::path(
    post,
    path = "/api/notices",
    request_body = CreateNoticeDto,
    responses(
        (status = 201, description = "Notice published successfully", body = Notice),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state, dto))]
pub async fn create_notice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateNoticeDto>,
) -> Result<(StatusCode, Json<Notice>), AppError> {
    let notice = NoticeService::create_notice(&state.db, dto, auth_user.user_id()?).await?;
    Ok((StatusCode::CREATED, Json(notice)))
}

/// List notices visible to the caller's role and hostel association.
#[utoipa::path(
    get,
    path = "/api/notices",
    responses(
        (status = 200, description = "Notices visible to the caller", body = Vec<Notice>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Caller has no student record", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state))]
pub async fn get_notices(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Notice>>, AppError> {
    let viewer = auth_user.viewer()?;
    let notices = NoticeService::get_notices(&state.db, &viewer).await?;
    Ok(Json(notices))
}

#[utoipa::path(
    get,
    path = "/api/notices/{id}",
    params(("id" = Uuid, Path, description = "Notice ID")),
    responses(
        (status = 200, description = "Notice details", body = Notice),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Notice not found or not visible", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state))]
pub async fn get_notice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Notice>, AppError> {
    let viewer = auth_user.viewer()?;
    let notice = NoticeService::get_notice(&state.db, id, &viewer).await?;
    Ok(Json(notice))
}

#[utoipa::path(
    put,
    path = "/api/notices/{id}",
    params(("id" = Uuid, Path, description = "Notice ID")),
    request_body = UpdateNoticeDto,
    responses(
        (status = 200, description = "Notice updated successfully", body = Notice),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Notice not found or not visible", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state, dto))]
pub async fn update_notice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateNoticeDto>,
) -> Result<Json<Notice>, AppError> {
    let viewer = auth_user.viewer()?;
    let notice = NoticeService::update_notice(&state.db, id, dto, &viewer).await?;
    Ok(Json(notice))
}

#[utoipa::path(
    delete,
    path = "/api/notices/{id}",
    params(("id" = Uuid, Path, description = "Notice ID")),
    responses(
        (status = 200, description = "Notice deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Notice not found or not visible", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state))]
pub async fn delete_notice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let viewer = auth_user.viewer()?;
    NoticeService::delete_notice(&state.db, id, &viewer).await?;
    Ok(Json(json!({"message": "Notice deleted successfully"})))
}
