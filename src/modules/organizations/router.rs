use axum::{
    Router,
    routing::{post, put},
};

use crate::state::AppState;

use super::controller::{create_organization, delete_organization, list_organizations};

pub fn init_organizations_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_organization).get(list_organizations))
        .route("/delete/{id}", put(delete_organization))
}
