use async_trait::async_trait;
use sqlx::PgPool;

use flagpole_models::{Organization, OrganizationId};

use crate::Result;

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn create(&self, name: &str) -> Result<Organization>;
    async fn list_active(&self) -> Result<Vec<Organization>>;
    async fn exists_active(&self, id: OrganizationId) -> Result<bool>;
    /// Returns the number of rows flipped to inactive.
    async fn soft_delete(&self, id: OrganizationId) -> Result<u64>;
}

pub struct PgOrganizationRepository {
    pool: PgPool,
}

impl PgOrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationRepository for PgOrganizationRepository {
    async fn create(&self, name: &str) -> Result<Organization> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, status)
            VALUES ($1, 'Y')
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(organization)
    }

    async fn list_active(&self) -> Result<Vec<Organization>> {
        let organizations = sqlx::query_as::<_, Organization>(
            "SELECT id, name FROM organizations WHERE status = 'Y' ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(organizations)
    }

    async fn exists_active(&self, id: OrganizationId) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM organizations WHERE id = $1 AND status = 'Y')",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn soft_delete(&self, id: OrganizationId) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE organizations
            SET status = 'N', updated_at = NOW()
            WHERE id = $1 AND status = 'Y'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
