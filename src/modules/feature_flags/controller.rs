use axum::extract::State;

use flagpole_core::{ApiResponse, AppError};
use flagpole_models::{
    CheckFeatureFlagDto, CreateFeatureFlagDto, FeatureFlag, FeatureFlagPath, UpdateFeatureFlagDto,
};

use crate::middleware::CurrentPrincipal;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::FeatureFlagService;

/// Create a flag in the caller's organization
#[utoipa::path(
    post,
    path = "/feature-flags/create",
    request_body = CreateFeatureFlagDto,
    responses(
        (status = 201, description = "Feature flag created", body = FeatureFlag),
        (status = 400, description = "Validation error or duplicate key"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not an organization admin")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Feature Flags"
)]
pub async fn create_feature_flag(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ValidatedJson(dto): ValidatedJson<CreateFeatureFlagDto>,
) -> Result<ApiResponse<FeatureFlag>, AppError> {
    let actor = principal.require_user()?;
    let flag = FeatureFlagService::create_flag(state.store.feature_flags.as_ref(), actor, dto).await?;
    Ok(ApiResponse::data(flag)
        .with_message("Feature flag created successfully")
        .created())
}

/// Enable or disable a flag
#[utoipa::path(
    put,
    path = "/feature-flags/update",
    request_body = UpdateFeatureFlagDto,
    responses(
        (status = 200, description = "Feature flag updated"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Feature flag failed to update")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Feature Flags"
)]
pub async fn update_feature_flag(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ValidatedJson(dto): ValidatedJson<UpdateFeatureFlagDto>,
) -> Result<ApiResponse<()>, AppError> {
    let actor = principal.require_user()?;
    FeatureFlagService::update_flag(state.store.feature_flags.as_ref(), actor, dto).await?;
    Ok(ApiResponse::message("Feature flag updated successfully"))
}

/// Soft-delete a flag
#[utoipa::path(
    put,
    path = "/feature-flags/delete/{id}",
    params(("id" = i64, Path, description = "Feature flag id")),
    responses(
        (status = 200, description = "Feature flag deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Feature flag failed to delete")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Feature Flags"
)]
pub async fn delete_feature_flag(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ValidatedPath(path): ValidatedPath<FeatureFlagPath>,
) -> Result<ApiResponse<()>, AppError> {
    let actor = principal.require_user()?;
    FeatureFlagService::delete_flag(state.store.feature_flags.as_ref(), actor, path.id).await?;
    Ok(ApiResponse::message("Feature flag deleted successfully"))
}

/// List the organization's active flags
#[utoipa::path(
    get,
    path = "/feature-flags/list",
    responses(
        (status = 200, description = "Active flags, possibly empty", body = Vec<FeatureFlag>),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not an organization admin")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Feature Flags"
)]
pub async fn list_feature_flags(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<ApiResponse<Vec<FeatureFlag>>, AppError> {
    let actor = principal.require_user()?;
    let flags = FeatureFlagService::list_flags(state.store.feature_flags.as_ref(), actor).await?;
    Ok(ApiResponse::data(flags))
}

/// Look up a flag by key within the caller's organization
#[utoipa::path(
    post,
    path = "/feature-flags/check",
    request_body = CheckFeatureFlagDto,
    responses(
        (status = 200, description = "Flag state", body = FeatureFlag),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not an end user"),
        (status = 404, description = "Feature flag not found")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Feature Flags"
)]
pub async fn check_feature_flag(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ValidatedJson(dto): ValidatedJson<CheckFeatureFlagDto>,
) -> Result<ApiResponse<FeatureFlag>, AppError> {
    let actor = principal.require_user()?;
    let flag = FeatureFlagService::check_flag(state.store.feature_flags.as_ref(), actor, dto).await?;
    Ok(ApiResponse::data(flag))
}
