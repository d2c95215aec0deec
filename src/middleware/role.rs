//! Viewer roles and role-check helpers.
//!
//! Every scoped query and state transition dispatches on [`ViewerRole`], a
//! closed set over the roles a token can carry. A token minted with a role
//! outside the known set maps to [`ViewerRole::Unknown`] and is denied
//! wherever a role check applies, rather than silently passing through.

use uuid::Uuid;

use crate::modules::users::model::Role;
use crate::utils::errors::AppError;

/// The role a request acts as, as carried by its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerRole {
    Admin,
    Warden,
    Student,
    /// Role claim outside the known set. Sees nothing and may transition
    /// nothing.
    Unknown,
}

impl ViewerRole {
    pub fn from_claim(role: &str) -> Self {
        match role {
            "ADMIN" => ViewerRole::Admin,
            "WARDEN" => ViewerRole::Warden,
            "STUDENT" => ViewerRole::Student,
            _ => ViewerRole::Unknown,
        }
    }
}

impl From<Role> for ViewerRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => ViewerRole::Admin,
            Role::Warden => ViewerRole::Warden,
            Role::Student => ViewerRole::Student,
        }
    }
}

/// The authenticated identity a request acts as. Built once from the token
/// claims and passed explicitly through services.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub id: Uuid,
    pub role: ViewerRole,
}

/// Check that the viewer holds one of the allowed roles.
pub fn check_any_role(viewer: &Viewer, allowed_roles: &[ViewerRole]) -> Result<(), AppError> {
    if !allowed_roles.contains(&viewer.role) {
        return Err(AppError::forbidden(anyhow::anyhow!("Permission denied")));
    }

    Ok(())
}
