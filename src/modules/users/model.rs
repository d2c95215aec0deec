//! User data models and DTOs.
//!
//! # Core Types
//!
//! - [`User`] - user entity as stored (password hash never serialized)
//! - [`Role`] - the three system roles
//!
//! # Request DTOs
//!
//! - [`CreateUserDto`] - register a new user (unauthenticated endpoint)
//! - [`UpdateUserDto`] - partial profile update

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// System role assigned to every user.
///
/// Wardens administer hostels; students occupy rooms; admins see everything.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Warden,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Warden => "WARDEN",
            Role::Student => "STUDENT",
        }
    }
}

/// A user in the system.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub phone: String,
    pub address: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for registering a new user.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub role: Role,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// DTO for updating a user. Absent fields are left unchanged.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::to_string(&Role::Warden).unwrap(), "\"WARDEN\"");
        assert_eq!(
            serde_json::to_string(&Role::Student).unwrap(),
            "\"STUDENT\""
        );
    }

    #[test]
    fn test_role_deserialization() {
        let role: Role = serde_json::from_str("\"WARDEN\"").unwrap();
        assert_eq!(role, Role::Warden);

        assert!(serde_json::from_str::<Role>("\"warden\"").is_err());
        assert!(serde_json::from_str::<Role>("\"JANITOR\"").is_err());
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Admin.as_str(), "ADMIN");
        assert_eq!(Role::Warden.as_str(), "WARDEN");
        assert_eq!(Role::Student.as_str(), "STUDENT");
    }

    #[test]
    fn test_create_user_dto_validation() {
        let dto = CreateUserDto {
            email: "jane@example.com".to_string(),
            password: "password123".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            role: Role::Student,
            phone: String::new(),
            address: String::new(),
        };
        assert!(dto.validate().is_ok());

        let dto_bad_email = CreateUserDto {
            email: "not-an-email".to_string(),
            ..dto.clone()
        };
        assert!(dto_bad_email.validate().is_err());

        let dto_short_password = CreateUserDto {
            password: "short".to_string(),
            ..dto
        };
        assert!(dto_short_password.validate().is_err());
    }

    #[test]
    fn test_create_user_dto_optional_contact_fields() {
        let json = r#"{"email":"a@b.com","password":"password123","first_name":"A","last_name":"B","role":"WARDEN"}"#;
        let dto: CreateUserDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.role, Role::Warden);
        assert_eq!(dto.phone, "");
        assert_eq!(dto.address, "");
    }
}
