use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{OrganizationId, UserId};

/// A stored, active user as exposed to clients. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub role: String,
    pub organization_id: OrganizationId,
}

/// A user row including the password hash. Used only for login; not serializable.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithPassword {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub role: String,
    pub organization_id: OrganizationId,
}

impl From<UserWithPassword> for User {
    fn from(row: UserWithPassword) -> Self {
        Self {
            id: row.id,
            email: row.email,
            role: row.role,
            organization_id: row.organization_id,
        }
    }
}

/// Insert payload for a user whose password has already been hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub organization_id: OrganizationId,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct UserPath {
    pub id: UserId,
}
