use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::role::{require_end_user, require_org_admin};
use crate::state::AppState;

use super::controller::{
    check_feature_flag, create_feature_flag, delete_feature_flag, list_feature_flags,
    update_feature_flag,
};

/// Management routes are for organization admins, `/check` is for end users.
pub fn init_feature_flags_router(state: &AppState) -> Router<AppState> {
    let manage = Router::new()
        .route("/create", post(create_feature_flag))
        .route("/update", put(update_feature_flag))
        .route("/delete/{id}", put(delete_feature_flag))
        .route("/list", get(list_feature_flags))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_org_admin,
        ));

    let check = Router::new()
        .route("/check", post(check_feature_flag))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_end_user,
        ));

    manage.merge(check)
}
