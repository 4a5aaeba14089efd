use anyhow::anyhow;
use tracing::{info, instrument, warn};

use flagpole_core::AppError;
use flagpole_db::UserRepository;
use flagpole_models::UserId;

use crate::middleware::Principal;

pub struct UserService;

impl UserService {
    /// Soft-deletes a user. Organization admins can only reach users of their own
    /// organization; the super admin is unscoped.
    #[instrument(skip(users, principal), fields(actor.role = %principal.role(), db.operation = "UPDATE", db.table = "users"))]
    pub async fn delete_user(
        users: &dyn UserRepository,
        principal: &Principal,
        id: UserId,
    ) -> Result<(), AppError> {
        let scope = match principal {
            Principal::SuperAdmin => None,
            Principal::Stored { user, .. } => Some(user.organization_id),
        };

        if users.soft_delete(id, scope).await? == 0 {
            warn!(user.id = %id, "Nothing to delete");
            return Err(AppError::not_found(anyhow!("User failed to delete")));
        }

        info!(user.id = %id, "User deleted");
        Ok(())
    }
}
