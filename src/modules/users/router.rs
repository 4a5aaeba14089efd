use axum::{Router, routing::put};

use crate::state::AppState;

use super::controller::delete_user;

pub fn init_users_router() -> Router<AppState> {
    Router::new().route("/delete/{id}", put(delete_user))
}
