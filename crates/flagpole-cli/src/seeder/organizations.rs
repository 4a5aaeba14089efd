//! Organization seeding.

use fake::Fake;
use fake::faker::company::en::CompanyName;
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use flagpole_models::OrganizationId;

use super::models::{OrganizationSeed, SEED_ORGANIZATION_PREFIX};

/// Generates organization names in parallel. The index keeps names unique.
pub fn generate_organizations(count: usize) -> Vec<OrganizationSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let company: String = CompanyName().fake();
            OrganizationSeed {
                name: format!("{SEED_ORGANIZATION_PREFIX}{company} {}", i + 1),
            }
        })
        .collect()
}

pub async fn seed_organizations(db: &PgPool, count: usize) -> anyhow::Result<Vec<OrganizationId>> {
    let start_time = Instant::now();
    println!("🏢 Seeding {count} organizations...");

    let organizations = generate_organizations(count);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(organizations.len());

    for chunk in organizations.chunks(500) {
        let mut builder =
            sqlx::QueryBuilder::<sqlx::Postgres>::new("INSERT INTO organizations (name) ");
        builder.push_values(chunk, |mut row, org| {
            row.push_bind(&org.name);
        });
        builder.push(" RETURNING id");

        let chunk_ids: Vec<i64> = builder.build_query_scalar().fetch_all(&mut *tx).await?;
        ids.extend(chunk_ids.into_iter().map(OrganizationId));
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} organizations in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Hard-deletes seeded organizations. Users and flags must be cleared first.
pub async fn clear_organizations(db: &PgPool) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM organizations WHERE name LIKE $1")
        .bind(format!("{SEED_ORGANIZATION_PREFIX}%"))
        .execute(db)
        .await?
        .rows_affected();

    println!("   ✓ Deleted {result} organizations");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_names_are_marked_and_unique() {
        let organizations = generate_organizations(50);
        assert_eq!(organizations.len(), 50);

        let names: HashSet<_> = organizations.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names.len(), 50);
        assert!(names.iter().all(|n| n.starts_with(SEED_ORGANIZATION_PREFIX)));
    }
}
