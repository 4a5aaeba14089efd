//! Authentication: token extraction, the [`Authenticate`] stage and the resolved
//! [`Principal`].

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;

use flagpole_config::{AuthTransport, JwtConfig, Role, RolesConfig};
use flagpole_core::AppError;
use flagpole_db::UserRepository;
use flagpole_models::{OrganizationId, User, UserId};

use crate::middleware::pipeline::{Outcome, RequestContext, Stage};
use crate::state::AppState;

/// Name of the cookie carrying the token when the cookie transport is used.
pub const AUTH_COOKIE: &str = "jwt";

const NOT_LOGGED_IN: &str = "You are not logged in! Please log in to get access.";
const USER_GONE: &str = "The user with the given token does not exist";

/// The authenticated identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Configured break-glass operator. Never stored, never scoped to an organization.
    SuperAdmin,
    Stored { user: User, role: Role },
}

impl Principal {
    pub fn role(&self) -> Role {
        match self {
            Principal::SuperAdmin => Role::SuperAdmin,
            Principal::Stored { role, .. } => *role,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Principal::SuperAdmin => None,
            Principal::Stored { user, .. } => Some(user),
        }
    }

    pub fn organization_id(&self) -> Option<OrganizationId> {
        self.user().map(|u| u.organization_id)
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user().map(|u| u.id)
    }

    /// The stored user behind an organization-scoped request.
    pub fn require_user(&self) -> Result<&User, AppError> {
        self.user()
            .ok_or_else(|| AppError::forbidden("You do not have permission to perform this action"))
    }
}

/// Reads the token from the configured transport. Empty values count as absent.
pub fn extract_token(headers: &HeaderMap, transport: AuthTransport) -> Option<String> {
    let token = match transport {
        AuthTransport::Cookie => CookieJar::from_headers(headers)
            .get(AUTH_COOKIE)
            .map(|cookie| cookie.value().to_string()),
        AuthTransport::Bearer => headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string()),
    };

    token.filter(|t| !t.is_empty())
}

/// Verifies the token and resolves the principal.
///
/// A token claiming the configured super admin role yields [`Principal::SuperAdmin`]
/// without touching the store. Every other subject must be an active stored user whose
/// role string is still configured.
pub struct Authenticate {
    jwt_config: JwtConfig,
    roles: RolesConfig,
    users: Arc<dyn UserRepository>,
}

impl Authenticate {
    pub fn new(state: &AppState) -> Self {
        Self {
            jwt_config: state.config.jwt.clone(),
            roles: state.config.roles.clone(),
            users: state.store.users.clone(),
        }
    }

    pub async fn authenticate(&self, token: Option<&str>) -> Result<Principal, AppError> {
        let token = token.ok_or_else(|| AppError::unauthorized(NOT_LOGGED_IN))?;
        let claims = flagpole_auth::verify(token, &self.jwt_config)?;

        if self.roles.resolve(&claims.role) == Some(Role::SuperAdmin) {
            return Ok(Principal::SuperAdmin);
        }

        let user_id = claims
            .user_id()
            .ok_or_else(|| AppError::unauthorized(USER_GONE))?;
        let user = self
            .users
            .find_active_by_id(UserId(user_id))
            .await?
            .ok_or_else(|| AppError::unauthorized(USER_GONE))?;

        let Some(role) = self.roles.resolve(&user.role) else {
            tracing::warn!(user.id = %user.id, user.role = %user.role, "Stored role is not configured");
            return Err(AppError::unauthorized(USER_GONE));
        };

        Ok(Principal::Stored { user, role })
    }
}

#[async_trait]
impl Stage for Authenticate {
    fn name(&self) -> &'static str {
        "authenticate"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Outcome {
        match self.authenticate(ctx.token.as_deref()).await {
            Ok(principal) => {
                ctx.principal = Some(principal);
                Outcome::Continue
            }
            Err(err) => Outcome::Fail(err),
        }
    }
}

/// Extractor for the principal attached by the guard. Fails closed when absent.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or_else(|| AppError::forbidden("You do not have permission to perform this action"))
    }
}
