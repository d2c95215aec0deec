use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A room in a hostel. Occupancy never exceeds capacity.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Room {
    pub id: Uuid,
    pub hostel_id: Uuid,
    pub room_number: String,
    pub capacity: i32,
    pub current_occupancy: i32,
    pub is_available: bool,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateRoomDto {
    pub hostel_id: Uuid,
    #[validate(length(min = 1))]
    pub room_number: String,
    #[validate(range(min = 1))]
    pub capacity: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub current_occupancy: i32,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateRoomDto {
    #[validate(length(min = 1))]
    pub room_number: Option<String>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[validate(range(min = 0))]
    pub current_occupancy: Option<i32>,
    pub is_available: Option<bool>,
}

/// Query parameters for the room listing.
#[derive(Deserialize, Debug, Clone, Default, IntoParams, ToSchema)]
pub struct RoomFilterParams {
    /// Restrict the listing to rooms of one hostel.
    pub hostel_id: Option<Uuid>,
}
