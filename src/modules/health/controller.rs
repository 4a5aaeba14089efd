use axum::response::IntoResponse;
use flagpole_core::ApiResponse;
use serde_json::Value;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "Health"
)]
pub async fn health_check() -> impl IntoResponse {
    ApiResponse::data(Value::Null)
}
