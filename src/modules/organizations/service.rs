use anyhow::anyhow;
use tracing::{info, instrument, warn};

use flagpole_core::AppError;
use flagpole_db::OrganizationRepository;
use flagpole_models::{CreateOrganizationDto, Organization, OrganizationId};

pub struct OrganizationService;

impl OrganizationService {
    #[instrument(skip(organizations, dto), fields(organization.name = %dto.name, db.operation = "INSERT", db.table = "organizations"))]
    pub async fn create_organization(
        organizations: &dyn OrganizationRepository,
        dto: CreateOrganizationDto,
    ) -> Result<Organization, AppError> {
        let organization = organizations.create(dto.name.trim()).await?;

        info!(organization.id = %organization.id, "Organization created");
        Ok(organization)
    }

    #[instrument(skip(organizations), fields(db.operation = "SELECT", db.table = "organizations"))]
    pub async fn list_organizations(
        organizations: &dyn OrganizationRepository,
    ) -> Result<Vec<Organization>, AppError> {
        let list = organizations.list_active().await?;
        if list.is_empty() {
            return Err(AppError::not_found(anyhow!("Organizations not found")));
        }
        Ok(list)
    }

    #[instrument(skip(organizations), fields(db.operation = "UPDATE", db.table = "organizations"))]
    pub async fn delete_organization(
        organizations: &dyn OrganizationRepository,
        id: OrganizationId,
    ) -> Result<(), AppError> {
        if organizations.soft_delete(id).await? == 0 {
            warn!(organization.id = %id, "Nothing to delete");
            return Err(AppError::not_found(anyhow!("Organization failed to delete")));
        }

        info!(organization.id = %id, "Organization deleted");
        Ok(())
    }
}
