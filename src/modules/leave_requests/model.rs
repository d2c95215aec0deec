use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema)]
#[sqlx(type_name = "leave_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// A leave request. `approved_by` is unset exactly while the request is
/// PENDING; APPROVED and REJECTED are terminal.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub student_id: Uuid,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    pub approved_by: Option<Uuid>,
}

/// DTO for filing a leave request.
///
/// `student_id` is ignored for student callers (the request is always filed
/// for the caller's own record) and required for everyone else.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateLeaveRequestDto {
    pub student_id: Option<Uuid>,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    #[validate(length(min = 1))]
    pub reason: String,
}

/// Absent fields are left unchanged. Status moves only through the
/// approve/reject actions.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateLeaveRequestDto {
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    #[validate(length(min = 1))]
    pub reason: Option<String>,
}
