//! Development data: organizations, their admins and end users, and feature flags.

mod feature_flags;
mod models;
mod organizations;
mod users;

use sqlx::PgPool;
use std::time::Instant;

use flagpole_config::{Role, RolesConfig};

pub use feature_flags::{generate_flags, seed_flags};
pub use models::{
    SEED_EMAIL_DOMAIN, SEED_ORGANIZATION_PREFIX, SEED_PASSWORD, SeedConfig, UsersPerOrganization,
};
pub use organizations::{generate_organizations, seed_organizations};
pub use users::{generate_users, seed_users};

pub async fn seed_all(db: &PgPool, roles: &RolesConfig, config: SeedConfig) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!(
        "🌱 Seeding {} organizations with {} users in total",
        config.organizations,
        config.total_users()
    );

    let organization_ids = seed_organizations(db, config.organizations).await?;
    let users = seed_users(db, &organization_ids, &config.users, roles).await?;

    // First admin of each organization owns its flags.
    let admin_role = roles.name_of(Role::OrgAdmin);
    let mut admins = Vec::new();
    for (user_id, organization_id, role) in &users {
        if role == admin_role && !admins.iter().any(|(org, _)| org == organization_id) {
            admins.push((*organization_id, *user_id));
        }
    }
    seed_flags(db, &admins, config.flags_per_organization).await?;

    println!("\n✅ Seeding finished in {:?}", start_time.elapsed());
    Ok(())
}

/// Removes everything `seed_all` created. Data created through the API is kept.
pub async fn clear_all(db: &PgPool) -> anyhow::Result<()> {
    println!("🗑️  Clearing seeded data...");
    feature_flags::clear_flags(db, SEED_ORGANIZATION_PREFIX).await?;
    users::clear_users(db).await?;
    organizations::clear_organizations(db).await?;
    println!("✅ Seeded data cleared");
    Ok(())
}
