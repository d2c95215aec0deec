use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A hostel. `warden_id` points at the user administering it; deleting that
/// user leaves the hostel unstaffed rather than deleting it.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Hostel {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub total_rooms: i32,
    pub available_rooms: i32,
    pub warden_id: Option<Uuid>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateHostelDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(range(min = 0))]
    pub total_rooms: i32,
    #[validate(range(min = 0))]
    pub available_rooms: i32,
    pub warden_id: Option<Uuid>,
}

/// Absent fields are left unchanged. Passing `warden_id` replaces the
/// current warden assignment.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateHostelDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    #[validate(range(min = 0))]
    pub total_rooms: Option<i32>,
    #[validate(range(min = 0))]
    pub available_rooms: Option<i32>,
    pub warden_id: Option<Uuid>,
}
