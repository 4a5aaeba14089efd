use axum::extract::State;

use flagpole_core::{ApiResponse, AppError};
use flagpole_models::UserPath;

use crate::middleware::CurrentPrincipal;
use crate::state::AppState;
use crate::validator::ValidatedPath;

use super::service::UserService;

/// Soft-delete a user
#[utoipa::path(
    put,
    path = "/users/delete/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Invalid id"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "User failed to delete")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    ValidatedPath(path): ValidatedPath<UserPath>,
) -> Result<ApiResponse<()>, AppError> {
    UserService::delete_user(state.store.users.as_ref(), &principal, path.id).await?;
    Ok(ApiResponse::message("User deleted successfully"))
}
