use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A student record, one-to-one with its user. `user_id` is the primary
/// key; the room assignment is nullable (unassigned, or the room was
/// deleted). `date_joined` is set at creation and never updated.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Student {
    pub user_id: Uuid,
    pub roll_number: String,
    pub department: String,
    pub year: i32,
    pub room_id: Option<Uuid>,
    pub date_joined: chrono::NaiveDate,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateStudentDto {
    pub user_id: Uuid,
    #[validate(length(min = 1))]
    pub roll_number: String,
    #[validate(length(min = 1))]
    pub department: String,
    #[validate(range(min = 1))]
    pub year: i32,
    pub room_id: Option<Uuid>,
}

/// Absent fields are left unchanged. `date_joined` is deliberately not
/// updatable.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1))]
    pub roll_number: Option<String>,
    #[validate(length(min = 1))]
    pub department: Option<String>,
    #[validate(range(min = 1))]
    pub year: Option<i32>,
    pub room_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_student_dto_validation() {
        let dto = CreateStudentDto {
            user_id: Uuid::new_v4(),
            roll_number: "CS-2024-001".to_string(),
            department: "Computer Science".to_string(),
            year: 2,
            room_id: None,
        };
        assert!(dto.validate().is_ok());

        let dto_bad_year = CreateStudentDto { year: 0, ..dto };
        assert!(dto_bad_year.validate().is_err());
    }

    #[test]
    fn test_update_student_dto_all_optional() {
        let dto: UpdateStudentDto = serde_json::from_str("{}").unwrap();
        assert!(dto.roll_number.is_none());
        assert!(dto.room_id.is_none());
        assert!(dto.validate().is_ok());
    }
}
