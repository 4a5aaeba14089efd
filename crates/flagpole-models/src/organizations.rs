use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::OrganizationId;
use crate::validation::not_blank;

/// An active organization. Soft-deleted organizations are never returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
}

/// Only the super admin creates organizations.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrganizationDto {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct OrganizationPath {
    pub id: OrganizationId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_rejected() {
        let dto = CreateOrganizationDto {
            name: "  ".to_string(),
        };
        let errors = dto.validate().unwrap_err();
        let field = errors.field_errors()["name"];
        assert_eq!(field[0].message.as_deref(), Some("Name is required"));
    }

    #[test]
    fn test_valid_name() {
        let dto = CreateOrganizationDto {
            name: "Acme".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
