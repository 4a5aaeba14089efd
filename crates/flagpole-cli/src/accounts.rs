//! One-off organization and account creation.

use anyhow::{Context, anyhow, bail};
use sqlx::PgPool;
use validator::Validate;

use flagpole_config::{Role, RolesConfig};
use flagpole_core::hash_password;
use flagpole_db::{OrganizationRepository, PgOrganizationRepository, PgUserRepository, UserRepository};
use flagpole_models::{NewUser, Organization, OrganizationId, SignupRequest, User};

pub async fn create_organization(pool: &PgPool, name: &str) -> anyhow::Result<Organization> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Name is required");
    }

    PgOrganizationRepository::new(pool.clone())
        .create(name)
        .await
        .map_err(|e| e.error)
        .context("Failed to create organization")
}

/// Creates an organization admin or end user. The super admin is configured, never
/// stored, so it cannot be created here.
pub async fn create_user(
    pool: &PgPool,
    roles: &RolesConfig,
    role: Role,
    email: &str,
    password: &str,
    organization_id: OrganizationId,
) -> anyhow::Result<User> {
    if role == Role::SuperAdmin {
        bail!("The super admin is configured through SUPER_ADMIN_EMAIL and SUPER_ADMIN_PASSWORD");
    }

    let request = SignupRequest {
        email: email.trim().to_string(),
        password: password.trim().to_string(),
        organization_id,
    };
    request
        .validate()
        .map_err(|errors| anyhow!("Invalid account: {errors}"))?;

    let organizations = PgOrganizationRepository::new(pool.clone());
    if !organizations
        .exists_active(organization_id)
        .await
        .map_err(|e| e.error)?
    {
        bail!("Organization not found");
    }

    let password_hash = hash_password(&request.password).map_err(|e| e.error)?;

    PgUserRepository::new(pool.clone())
        .create(&NewUser {
            email: request.email,
            password_hash,
            role: roles.name_of(role).to_string(),
            organization_id,
        })
        .await
        .map_err(|e| e.error)
        .context("Failed to create user")
}
