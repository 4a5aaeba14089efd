//! Account seeding. Every seeded account shares [`SEED_PASSWORD`], hashed once.

use fake::Fake;
use fake::faker::name::en::FirstName;
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use flagpole_config::{Role, RolesConfig};
use flagpole_core::hash_password;
use flagpole_models::{OrganizationId, UserId};

use super::models::{SEED_EMAIL_DOMAIN, SEED_PASSWORD, UserSeed, UsersPerOrganization};

fn seed_email(first_name: &str, organization_id: OrganizationId, kind: &str, n: usize) -> String {
    format!(
        "{}.{kind}{n}.org{organization_id}@{SEED_EMAIL_DOMAIN}",
        first_name.to_lowercase()
    )
}

/// Generates admins and end users for each organization in parallel.
pub fn generate_users(
    organization_ids: &[OrganizationId],
    per_organization: &UsersPerOrganization,
    roles: &RolesConfig,
) -> Vec<UserSeed> {
    let admin_role = roles.name_of(Role::OrgAdmin);
    let end_user_role = roles.name_of(Role::EndUser);

    organization_ids
        .par_iter()
        .flat_map_iter(|&organization_id| {
            let admins = (0..per_organization.admins).map(move |n| {
                let first: String = FirstName().fake();
                UserSeed {
                    email: seed_email(&first, organization_id, "admin", n),
                    role: admin_role.to_string(),
                    organization_id,
                }
            });
            let end_users = (0..per_organization.end_users).map(move |n| {
                let first: String = FirstName().fake();
                UserSeed {
                    email: seed_email(&first, organization_id, "user", n),
                    role: end_user_role.to_string(),
                    organization_id,
                }
            });
            admins.chain(end_users)
        })
        .collect()
}

/// Inserts users and returns `(id, organization_id, role)` per row.
pub async fn seed_users(
    db: &PgPool,
    organization_ids: &[OrganizationId],
    per_organization: &UsersPerOrganization,
    roles: &RolesConfig,
) -> anyhow::Result<Vec<(UserId, OrganizationId, String)>> {
    let start_time = Instant::now();
    let users = generate_users(organization_ids, per_organization, roles);
    println!("👤 Seeding {} users...", users.len());

    let password_hash = hash_password(SEED_PASSWORD).map_err(|e| e.error)?;
    let mut tx = db.begin().await?;
    let mut inserted = Vec::with_capacity(users.len());

    for chunk in users.chunks(500) {
        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(
            "INSERT INTO users (email, password, role, organization_id) ",
        );
        builder.push_values(chunk, |mut row, user| {
            row.push_bind(&user.email)
                .push_bind(&password_hash)
                .push_bind(&user.role)
                .push_bind(user.organization_id);
        });
        builder.push(" RETURNING id, organization_id, role");

        let rows: Vec<(UserId, OrganizationId, String)> =
            builder.build_query_as().fetch_all(&mut *tx).await?;
        inserted.extend(rows);
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} users in {:?} (password: {SEED_PASSWORD})",
        inserted.len(),
        start_time.elapsed()
    );

    Ok(inserted)
}

pub async fn clear_users(db: &PgPool) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{SEED_EMAIL_DOMAIN}"))
        .execute(db)
        .await?
        .rows_affected();

    println!("   ✓ Deleted {result} users");
    Ok(result)
}
