//! Signup, login and session payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::OrganizationId;
use crate::users::User;
use crate::validation::{not_blank, password_policy};

/// Signup payload shared by the organization admin and end user flows; the role is
/// fixed by the endpoint, never by the client.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(email(message = "Email must be a valid email"))]
    #[schema(example = "admin@acme.test")]
    pub email: String,
    #[validate(custom(function = "password_policy"))]
    #[schema(example = "Secret1!")]
    pub password: String,
    pub organization_id: OrganizationId,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(custom(function = "not_blank", message = "Email is required"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    pub password: String,
}

/// The identity a token was issued to. `id` is the stored user id, or `superadmin`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub role: String,
    pub organization_id: Option<OrganizationId>,
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            role: user.role,
            organization_id: Some(user.organization_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionData {
    pub user: SessionUser,
}

/// Response of every login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub status: String,
    pub token: String,
    pub data: SessionData,
}

impl AuthResponse {
    pub fn new(token: String, user: SessionUser) -> Self {
        Self {
            status: "success".to_string(),
            token,
            data: SessionData { user },
        }
    }
}

/// `data` of a signup response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserData {
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            organization_id: OrganizationId(1),
        }
    }

    #[test]
    fn test_valid_signup() {
        assert!(signup("admin@acme.test", "Secret1!").validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let errors = signup("not-an-email", "Secret1!").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(!errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_weak_password_names_password() {
        let errors = signup("admin@acme.test", "password").validate().unwrap_err();
        let field = errors.field_errors()["password"];
        assert!(field[0].message.as_deref().unwrap().starts_with("Password"));
    }

    #[test]
    fn test_organization_id_must_be_a_number() {
        let parsed = serde_json::from_str::<SignupRequest>(
            r#"{"email":"a@b.test","password":"Secret1!","organization_id":"1"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_blank_login_fields() {
        let login = LoginRequest {
            email: " ".into(),
            password: String::new(),
        };
        let errors = login.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_session_user_from_stored_user() {
        let user = User {
            id: crate::ids::UserId(9),
            email: "e@acme.test".into(),
            role: "END_USER".into(),
            organization_id: OrganizationId(3),
        };
        let session = SessionUser::from(user);
        assert_eq!(session.id, "9");
        assert_eq!(session.organization_id, Some(OrganizationId(3)));
    }
}
