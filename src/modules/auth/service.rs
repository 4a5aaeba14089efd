use anyhow::anyhow;
use subtle::ConstantTimeEq;
use tracing::{info, instrument, warn};

use flagpole_auth::SUPER_ADMIN_SUBJECT;
use flagpole_config::{AuthConfig, JwtConfig, Role, RolesConfig};
use flagpole_core::{AppError, hash_password, verify_password};
use flagpole_db::Store;
use flagpole_models::{LoginRequest, NewUser, SessionUser, SignupRequest, User};

const BAD_SUPER_ADMIN_CREDENTIALS: &str = "Incorrect email or password";

/// A signed token and the identity it was issued to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

pub struct AuthService;

impl AuthService {
    /// Checks the configured break-glass credential. An unconfigured credential never
    /// matches.
    #[instrument(skip(auth, roles, jwt, dto))]
    pub fn super_admin_login(
        auth: &AuthConfig,
        roles: &RolesConfig,
        jwt: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<Session, AppError> {
        let email_matches = auth
            .super_admin_email
            .as_bytes()
            .ct_eq(dto.email.trim().as_bytes());
        let password_matches = auth
            .super_admin_password
            .as_bytes()
            .ct_eq(dto.password.as_bytes());

        if !auth.super_admin_enabled() || !bool::from(email_matches & password_matches) {
            warn!("Rejected super admin login");
            crate::metrics::track_login("super_admin", "rejected");
            return Err(AppError::unauthorized(BAD_SUPER_ADMIN_CREDENTIALS));
        }

        let role = roles.name_of(Role::SuperAdmin).to_string();
        let token = flagpole_auth::sign(SUPER_ADMIN_SUBJECT, role.clone(), None, jwt)?;

        info!("Super admin logged in");
        crate::metrics::track_login("super_admin", "success");

        Ok(Session {
            token,
            user: SessionUser {
                id: SUPER_ADMIN_SUBJECT.to_string(),
                email: auth.super_admin_email.clone(),
                role,
                organization_id: None,
            },
        })
    }

    /// Creates a user with `role` inside an active organization.
    #[instrument(skip(store, roles, dto), fields(organization.id = %dto.organization_id, db.operation = "INSERT", db.table = "users"))]
    pub async fn signup(
        store: &Store,
        roles: &RolesConfig,
        role: Role,
        dto: SignupRequest,
    ) -> Result<User, AppError> {
        if !store.organizations.exists_active(dto.organization_id).await? {
            warn!("Signup for a missing organization");
            return Err(AppError::not_found(anyhow!("Organization not found")));
        }

        let password = dto.password.trim().to_string();
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let user = store
            .users
            .create(&NewUser {
                email: dto.email.trim().to_string(),
                password_hash,
                role: roles.name_of(role).to_string(),
                organization_id: dto.organization_id,
            })
            .await?;

        info!(user.id = %user.id, user.role = %user.role, "User signed up");
        crate::metrics::track_signup(&user.role);

        Ok(user)
    }

    #[instrument(skip(store, jwt, dto), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn login(store: &Store, jwt: &JwtConfig, dto: LoginRequest) -> Result<Session, AppError> {
        let Some(stored) = store.users.find_active_by_email(dto.email.trim()).await? else {
            crate::metrics::track_login("user", "unknown_email");
            return Err(AppError::not_found(anyhow!("User not found")));
        };

        let password = dto.password.trim().to_string();
        let hash = stored.password.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;

        if !valid {
            warn!(user.id = %stored.id, "Invalid password");
            crate::metrics::track_login("user", "invalid_password");
            return Err(AppError::unauthorized("Invalid password"));
        }

        let user = User::from(stored);
        let token = flagpole_auth::sign(
            user.id.to_string(),
            user.role.clone(),
            Some(user.organization_id.into_inner()),
            jwt,
        )?;

        info!(user.id = %user.id, "User logged in");
        crate::metrics::track_login("user", "success");

        Ok(Session {
            token,
            user: user.into(),
        })
    }
}
