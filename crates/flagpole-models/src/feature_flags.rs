use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{FeatureFlagId, OrganizationId, UserId};
use crate::validation::not_blank;

/// An active feature flag of the caller's organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FeatureFlag {
    pub id: FeatureFlagId,
    pub feature_key: String,
    pub is_enabled: bool,
}

/// Insert payload. `feature_key` is stored trimmed.
#[derive(Debug, Clone)]
pub struct NewFeatureFlag {
    pub feature_key: String,
    pub is_enabled: bool,
    pub organization_id: OrganizationId,
    pub created_by: UserId,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFeatureFlagDto {
    #[validate(custom(function = "not_blank", message = "Feature Key is required"))]
    #[schema(example = "beta-dashboard")]
    pub feature_key: String,
    #[serde(default)]
    pub is_enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateFeatureFlagDto {
    pub id: FeatureFlagId,
    pub is_enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CheckFeatureFlagDto {
    #[validate(custom(function = "not_blank", message = "Feature Key is required"))]
    pub feature_key: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct FeatureFlagPath {
    pub id: FeatureFlagId,
}
