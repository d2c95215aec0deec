use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A notice, either global (`is_for_all`) or scoped to a set of hostels.
/// `hostel_ids` is aggregated from the notice-hostel link table.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub is_for_all: bool,
    pub hostel_ids: Vec<Uuid>,
}

/// DTO for publishing a notice. `created_by` is always the caller.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateNoticeDto {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(default = "default_true")]
    pub is_for_all: bool,
    #[serde(default)]
    pub hostel_ids: Vec<Uuid>,
}

fn default_true() -> bool {
    true
}

/// Absent fields are left unchanged; passing `hostel_ids` replaces the
/// whole hostel set.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateNoticeDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub is_for_all: Option<bool>,
    pub hostel_ids: Option<Vec<Uuid>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_notice_dto_defaults() {
        let dto: CreateNoticeDto =
            serde_json::from_str(r#"{"title":"Water maintenance","content":"No water on Sunday"}"#)
                .unwrap();
        assert!(dto.is_for_all);
        assert!(dto.hostel_ids.is_empty());
    }

    #[test]
    fn test_create_notice_dto_scoped() {
        let hostel_id = Uuid::new_v4();
        let json = format!(
            r#"{{"title":"Block A only","content":"...","is_for_all":false,"hostel_ids":["{}"]}}"#,
            hostel_id
        );
        let dto: CreateNoticeDto = serde_json::from_str(&json).unwrap();
        assert!(!dto.is_for_all);
        assert_eq!(dto.hostel_ids, vec![hostel_id]);
    }

    #[test]
    fn test_update_notice_dto_hostel_ids_absent_vs_empty() {
        let dto: UpdateNoticeDto = serde_json::from_str("{}").unwrap();
        assert!(dto.hostel_ids.is_none());

        let dto: UpdateNoticeDto = serde_json::from_str(r#"{"hostel_ids":[]}"#).unwrap();
        assert_eq!(dto.hostel_ids, Some(Vec::new()));
    }
}
