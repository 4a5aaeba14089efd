//! Feature flag operations. Every query is scoped to the caller's organization, so a
//! flag id or key from another tenant behaves exactly like one that does not exist.

use anyhow::anyhow;
use tracing::{info, instrument, warn};

use flagpole_core::AppError;
use flagpole_db::FeatureFlagRepository;
use flagpole_models::{
    CheckFeatureFlagDto, CreateFeatureFlagDto, FeatureFlag, FeatureFlagId, NewFeatureFlag,
    UpdateFeatureFlagDto, User,
};

pub struct FeatureFlagService;

impl FeatureFlagService {
    #[instrument(skip(flags, actor, dto), fields(organization.id = %actor.organization_id, db.operation = "INSERT", db.table = "feature_flags"))]
    pub async fn create_flag(
        flags: &dyn FeatureFlagRepository,
        actor: &User,
        dto: CreateFeatureFlagDto,
    ) -> Result<FeatureFlag, AppError> {
        let flag = flags
            .create(&NewFeatureFlag {
                feature_key: dto.feature_key.trim().to_string(),
                is_enabled: dto.is_enabled,
                organization_id: actor.organization_id,
                created_by: actor.id,
            })
            .await?;

        info!(flag.id = %flag.id, flag.key = %flag.feature_key, "Feature flag created");
        Ok(flag)
    }

    #[instrument(skip(flags, actor, dto), fields(organization.id = %actor.organization_id, flag.id = %dto.id, db.operation = "UPDATE", db.table = "feature_flags"))]
    pub async fn update_flag(
        flags: &dyn FeatureFlagRepository,
        actor: &User,
        dto: UpdateFeatureFlagDto,
    ) -> Result<(), AppError> {
        let updated = flags
            .update_enabled(actor.organization_id, dto.id, dto.is_enabled, actor.id)
            .await?;

        if updated == 0 {
            warn!("No active flag to update");
            return Err(AppError::not_found(anyhow!("Feature flag failed to update")));
        }

        info!(flag.enabled = dto.is_enabled, "Feature flag updated");
        Ok(())
    }

    #[instrument(skip(flags, actor), fields(organization.id = %actor.organization_id, db.operation = "UPDATE", db.table = "feature_flags"))]
    pub async fn delete_flag(
        flags: &dyn FeatureFlagRepository,
        actor: &User,
        id: FeatureFlagId,
    ) -> Result<(), AppError> {
        if flags.soft_delete(actor.organization_id, id, actor.id).await? == 0 {
            warn!(flag.id = %id, "No active flag to delete");
            return Err(AppError::not_found(anyhow!("Feature flag failed to delete")));
        }

        info!(flag.id = %id, "Feature flag deleted");
        Ok(())
    }

    #[instrument(skip(flags, actor), fields(organization.id = %actor.organization_id, db.operation = "SELECT", db.table = "feature_flags"))]
    pub async fn list_flags(
        flags: &dyn FeatureFlagRepository,
        actor: &User,
    ) -> Result<Vec<FeatureFlag>, AppError> {
        flags.list_active(actor.organization_id).await
    }

    #[instrument(skip(flags, actor, dto), fields(organization.id = %actor.organization_id, db.operation = "SELECT", db.table = "feature_flags"))]
    pub async fn check_flag(
        flags: &dyn FeatureFlagRepository,
        actor: &User,
        dto: CheckFeatureFlagDto,
    ) -> Result<FeatureFlag, AppError> {
        let flag = flags
            .find_active_by_key(actor.organization_id, dto.feature_key.trim())
            .await?;
        crate::metrics::track_feature_flag_check(flag.is_some());

        flag.ok_or_else(|| AppError::not_found(anyhow!("Feature flag not found")))
    }
}
