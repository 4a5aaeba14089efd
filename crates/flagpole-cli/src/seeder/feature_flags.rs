//! Feature flag seeding.

use fake::Fake;
use fake::faker::lorem::en::Word;
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use flagpole_models::{OrganizationId, UserId};

use super::models::FeatureFlagSeed;

/// One batch of flags per organization, created by that organization's admin. Keys are
/// unique within an organization.
pub fn generate_flags(admins: &[(OrganizationId, UserId)], per_organization: usize) -> Vec<FeatureFlagSeed> {
    admins
        .par_iter()
        .flat_map_iter(|&(organization_id, created_by)| {
            (0..per_organization).map(move |n| {
                let word: String = Word().fake();
                FeatureFlagSeed {
                    feature_key: format!("{}-{}", word.to_lowercase(), n + 1),
                    is_enabled: n % 2 == 0,
                    organization_id,
                    created_by,
                }
            })
        })
        .collect()
}

pub async fn seed_flags(
    db: &PgPool,
    admins: &[(OrganizationId, UserId)],
    per_organization: usize,
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    let flags = generate_flags(admins, per_organization);
    println!("🚩 Seeding {} feature flags...", flags.len());

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in flags.chunks(500) {
        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(
            "INSERT INTO feature_flags (feature_key, is_enabled, organization_id, created_by) ",
        );
        builder.push_values(chunk, |mut row, flag| {
            row.push_bind(&flag.feature_key)
                .push_bind(flag.is_enabled)
                .push_bind(flag.organization_id)
                .push_bind(flag.created_by);
        });
        inserted += builder.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {inserted} feature flags in {:?}",
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Deletes every flag of seeded organizations.
pub async fn clear_flags(db: &PgPool, organization_prefix: &str) -> anyhow::Result<u64> {
    let result = sqlx::query(
        "DELETE FROM feature_flags WHERE organization_id IN
         (SELECT id FROM organizations WHERE name LIKE $1)",
    )
    .bind(format!("{organization_prefix}%"))
    .execute(db)
    .await?
    .rows_affected();

    println!("   ✓ Deleted {result} feature flags");
    Ok(result)
}
