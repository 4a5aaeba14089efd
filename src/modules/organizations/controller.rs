use axum::extract::State;

use flagpole_core::{ApiResponse, AppError};
use flagpole_models::{CreateOrganizationDto, Organization, OrganizationPath};

use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::OrganizationService;

/// Create an organization
#[utoipa::path(
    post,
    path = "/organizations",
    request_body = CreateOrganizationDto,
    responses(
        (status = 201, description = "Organization created", body = Organization),
        (status = 400, description = "Validation error or duplicate name"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not a super admin")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Organizations"
)]
pub async fn create_organization(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateOrganizationDto>,
) -> Result<ApiResponse<Organization>, AppError> {
    let organization =
        OrganizationService::create_organization(state.store.organizations.as_ref(), dto).await?;
    Ok(ApiResponse::data(organization)
        .with_message("Organization created successfully")
        .created())
}

/// List active organizations
#[utoipa::path(
    get,
    path = "/organizations",
    responses(
        (status = 200, description = "Active organizations", body = Vec<Organization>),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not a super admin"),
        (status = 404, description = "Organizations not found")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Organizations"
)]
pub async fn list_organizations(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Organization>>, AppError> {
    let organizations =
        OrganizationService::list_organizations(state.store.organizations.as_ref()).await?;
    Ok(ApiResponse::data(organizations))
}

/// Soft-delete an organization
#[utoipa::path(
    put,
    path = "/organizations/delete/{id}",
    params(("id" = i64, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Organization deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Organization failed to delete")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Organizations"
)]
pub async fn delete_organization(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<OrganizationPath>,
) -> Result<ApiResponse<()>, AppError> {
    OrganizationService::delete_organization(state.store.organizations.as_ref(), path.id).await?;
    Ok(ApiResponse::message("Organization deleted successfully"))
}
