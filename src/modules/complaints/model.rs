use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema)]
#[sqlx(type_name = "complaint_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ComplaintStatus {
    Pending,
    Resolved,
    Rejected,
}

/// A complaint filed by a student. `created_at` is set at creation and
/// never changes; `resolved_at` stays unset until resolution is recorded.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Complaint {
    pub id: Uuid,
    pub student_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: ComplaintStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for filing a complaint.
///
/// `student_id` is ignored for student callers (the complaint is always
/// filed for the caller's own record) and required for everyone else.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateComplaintDto {
    pub student_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
}

/// Absent fields are left unchanged.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateComplaintDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub status: Option<ComplaintStatus>,
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
}
