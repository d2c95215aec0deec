use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::complaints::model::{Complaint, CreateComplaintDto, UpdateComplaintDto};
use crate::modules::complaints::service::ComplaintService;
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

/// File a complaint. A student always files for themselves; any
/// `student_id` in the body is ignored for student callers.
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = CreateComplaintDto,
    responses(
        (status = 201, description = "Complaint filed successfully", body = Complaint),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Caller has no student record", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Complaints"
)]
#[instrument(skip(state, dto))]
pub async fn create_complaint(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateComplaintDto>,
) -> Result<(StatusCode, Json<Complaint>), AppError> {
    let viewer = auth_user.viewer()?;
    let complaint = ComplaintService::create_complaint(&state.db, dto, &viewer).await?;
    Ok((StatusCode::CREATED, Json(complaint)))
}

/// List complaints visible to the caller's role.
#[utoipa::path(
    get,
    path = "/api/complaints",
    responses(
        (status = 200, description = "Complaints visible to the caller", body = Vec<Complaint>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Caller has no student record", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Complaints"
)]
#[instrument(skip(state))]
pub async fn get_complaints(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Complaint>>, AppError> {
    let viewer = auth_user.viewer()?;
    let complaints = ComplaintService::get_complaints(&state.db, &viewer).await?;
    Ok(Json(complaints))
}

#[utoipa::path(
    get,
    path = "/api/complaints/{id}",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint details", body = Complaint),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Complaint not found or out of scope", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Complaints"
)]
#[instrument(skip(state))]
pub async fn get_complaint(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Complaint>, AppError> {
    let viewer = auth_user.viewer()?;
    let complaint = ComplaintService::get_complaint(&state.db, id, &viewer).await?;
    Ok(Json(complaint))
}

#[utoipa::path(
    put,
    path = "/api/complaints/{id}",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    request_body = UpdateComplaintDto,
    responses(
        (status = 200, description = "Complaint updated successfully", body = Complaint),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Complaint not found or out of scope", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Complaints"
)]
#[instrument(skip(state, dto))]
pub async fn update_complaint(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateComplaintDto>,
) -> Result<Json<Complaint>, AppError> {
    let viewer = auth_user.viewer()?;
    let complaint = ComplaintService::update_complaint(&state.db, id, dto, &viewer).await?;
    Ok(Json(complaint))
}

#[utoipa::path(
    delete,
    path = "/api/complaints/{id}",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Complaint not found or out of scope", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Complaints"
)]
#[instrument(skip(state))]
pub async fn delete_complaint(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let viewer = auth_user.viewer()?;
    ComplaintService::delete_complaint(&state.db, id, &viewer).await?;
    Ok(Json(json!({"message": "Complaint deleted successfully"})))
}
