use async_trait::async_trait;
use sqlx::PgPool;

use flagpole_models::{FeatureFlag, FeatureFlagId, NewFeatureFlag, OrganizationId, UserId};

use crate::Result;

/// Feature flags are always addressed through the owning organization, so a caller can
/// never see or touch another tenant's rows.
#[async_trait]
pub trait FeatureFlagRepository: Send + Sync {
    async fn create(&self, flag: &NewFeatureFlag) -> Result<FeatureFlag>;
    async fn update_enabled(
        &self,
        organization_id: OrganizationId,
        id: FeatureFlagId,
        is_enabled: bool,
        updated_by: UserId,
    ) -> Result<u64>;
    async fn soft_delete(
        &self,
        organization_id: OrganizationId,
        id: FeatureFlagId,
        deleted_by: UserId,
    ) -> Result<u64>;
    async fn list_active(&self, organization_id: OrganizationId) -> Result<Vec<FeatureFlag>>;
    async fn find_active_by_key(
        &self,
        organization_id: OrganizationId,
        feature_key: &str,
    ) -> Result<Option<FeatureFlag>>;
}

pub struct PgFeatureFlagRepository {
    pool: PgPool,
}

impl PgFeatureFlagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeatureFlagRepository for PgFeatureFlagRepository {
    async fn create(&self, flag: &NewFeatureFlag) -> Result<FeatureFlag> {
        let created = sqlx::query_as::<_, FeatureFlag>(
            r#"
            INSERT INTO feature_flags (feature_key, is_enabled, organization_id, created_by, status)
            VALUES ($1, $2, $3, $4, 'Y')
            RETURNING id, feature_key, is_enabled
            "#,
        )
        .bind(&flag.feature_key)
        .bind(flag.is_enabled)
        .bind(flag.organization_id)
        .bind(flag.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_enabled(
        &self,
        organization_id: OrganizationId,
        id: FeatureFlagId,
        is_enabled: bool,
        updated_by: UserId,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE feature_flags
            SET is_enabled = $1, updated_by = $2, updated_at = NOW()
            WHERE organization_id = $3 AND id = $4 AND status = 'Y'
            "#,
        )
        .bind(is_enabled)
        .bind(updated_by)
        .bind(organization_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn soft_delete(
        &self,
        organization_id: OrganizationId,
        id: FeatureFlagId,
        deleted_by: UserId,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE feature_flags
            SET status = 'N', deleted_by = $1, updated_at = NOW()
            WHERE organization_id = $2 AND id = $3 AND status = 'Y'
            "#,
        )
        .bind(deleted_by)
        .bind(organization_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn list_active(&self, organization_id: OrganizationId) -> Result<Vec<FeatureFlag>> {
        let flags = sqlx::query_as::<_, FeatureFlag>(
            r#"
            SELECT id, feature_key, is_enabled
            FROM feature_flags
            WHERE organization_id = $1 AND status = 'Y'
            ORDER BY id
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(flags)
    }

    async fn find_active_by_key(
        &self,
        organization_id: OrganizationId,
        feature_key: &str,
    ) -> Result<Option<FeatureFlag>> {
        let flag = sqlx::query_as::<_, FeatureFlag>(
            r#"
            SELECT id, feature_key, is_enabled
            FROM feature_flags
            WHERE feature_key = $1 AND organization_id = $2 AND status = 'Y'
            "#,
        )
        .bind(feature_key)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flag)
    }
}
