use axum::{Router, middleware, routing::post};

use crate::middleware::role::require_authenticated;
use crate::state::AppState;

use super::controller::{end_user_signup, login, logout, org_admin_signup, super_admin_login};

pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/super-admin/login", post(super_admin_login))
        .route("/org-admin-signup", post(org_admin_signup))
        .route("/end-user-signup", post(end_user_signup))
        .route("/login", post(login))
        .route(
            "/logout",
            post(logout).route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_authenticated,
            )),
        )
}
