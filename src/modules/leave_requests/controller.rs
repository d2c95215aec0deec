use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::leave_requests::model::{
    CreateLeaveRequestDto, LeaveRequest, LeaveStatus, UpdateLeaveRequestDto,
};
use crate::modules::leave_requests::service::LeaveRequestService;
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

/// File a leave request. A student always files for themselves; any
/// `student_id` in the body is ignored for student callers.
#[utoipa::path(
    post,
    path = "/api/leave-requests",
    request_body = CreateLeaveRequestDto,
    responses(
        (status = 201, description = "Leave request filed successfully", body = LeaveRequest),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Caller has no student record", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
#[instrument(skip(state, dto))]
pub async fn create_leave_request(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateLeaveRequestDto>,
) -> Result<(StatusCode, Json<LeaveRequest>), AppError> {
    let viewer = auth_user.viewer()?;
    let leave_request = LeaveRequestService::create_leave_request(&state.db, dto, &viewer).await?;
    Ok((StatusCode::CREATED, Json(leave_request)))
}

/// List leave requests visible to the caller's role.
#[utoipa::path(
    get,
    path = "/api/leave-requests",
    responses(
        (status = 200, description = "Leave requests visible to the caller", body = Vec<LeaveRequest>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Caller has no student record", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
#[instrument(skip(state))]
pub async fn get_leave_requests(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<LeaveRequest>>, AppError> {
    let viewer = auth_user.viewer()?;
    let leave_requests = LeaveRequestService::get_leave_requests(&state.db, &viewer).await?;
    Ok(Json(leave_requests))
}

#[utoipa::path(
    get,
    path = "/api/leave-requests/{id}",
    params(("id" = Uuid, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request details", body = LeaveRequest),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Leave request not found or out of scope", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
#[instrument(skip(state))]
pub async fn get_leave_request(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<LeaveRequest>, AppError> {
    let viewer = auth_user.viewer()?;
    let leave_request = LeaveRequestService::get_leave_request(&state.db, id, &viewer).await?;
    Ok(Json(leave_request))
}

#[utoipa::path(
    put,
    path = "/api/leave-requests/{id}",
    params(("id" = Uuid, Path, description = "Leave request ID")),
    request_body = UpdateLeaveRequestDto,
    responses(
        (status = 200, description = "Leave request updated successfully", body = LeaveRequest),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Leave request not found or out of scope", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
#[instrument(skip(state, dto))]
pub async fn update_leave_request(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateLeaveRequestDto>,
) -> Result<Json<LeaveRequest>, AppError> {
    let viewer = auth_user.viewer()?;
    let leave_request =
        LeaveRequestService::update_leave_request(&state.db, id, dto, &viewer).await?;
    Ok(Json(leave_request))
}

#[utoipa::path(
    delete,
    path = "/api/leave-requests/{id}",
    params(("id" = Uuid, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Leave request not found or out of scope", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
#[instrument(skip(state))]
pub async fn delete_leave_request(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let viewer = auth_user.viewer()?;
    LeaveRequestService::delete_leave_request(&state.db, id, &viewer).await?;
    Ok(Json(json!({"message": "Leave request deleted successfully"})))
}

/// Approve a pending leave request. Admins and responsible wardens only.
#[utoipa::path(
    post,
    path = "/api/leave-requests/{id}/approve",
    params(("id" = Uuid, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request approved", body = LeaveRequest),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Permission denied", body = ErrorResponse),
        (status = 404, description = "Leave request not found", body = ErrorResponse),
        (status = 409, description = "Leave request already decided", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
#[instrument(skip(state))]
pub async fn approve_leave_request(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<LeaveRequest>, AppError> {
    let viewer = auth_user.viewer()?;
    let leave_request =
        LeaveRequestService::transition(&state.db, id, &viewer, LeaveStatus::Approved).await?;
    Ok(Json(leave_request))
}

/// Reject a pending leave request. Admins and responsible wardens only.
#[utoipa::path(
    post,
    path = "/api/leave-requests/{id}/reject",
    params(("id" = Uuid, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request rejected", body = LeaveRequest),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Permission denied", body = ErrorResponse),
        (status = 404, description = "Leave request not found", body = ErrorResponse),
        (status = 409, description = "Leave request already decided", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
#[instrument(skip(state))]
pub async fn reject_leave_request(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<LeaveRequest>, AppError> {
    let viewer = auth_user.viewer()?;
    let leave_request =
        LeaveRequestService::transition(&state.db, id, &viewer, LeaveStatus::Rejected).await?;
    Ok(Json(leave_request))
}
