use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::response::Response;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::errors::{normalize_errors, route_not_found};
use crate::middleware::rate_limit::rate_limit;
use crate::middleware::role::{require_admin, require_super_admin};
use crate::modules::auth::router::init_auth_router;
use crate::modules::feature_flags::router::init_feature_flags_router;
use crate::modules::health::router::init_health_router;
use crate::modules::organizations::router::init_organizations_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

const BODY_LIMIT_BYTES: usize = 10 * 1024;

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

fn security_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}

pub fn init_router(state: AppState) -> Router {
    let error_mode = state.config.error_mode();
    let hsts = state
        .config
        .server
        .environment
        .is_production()
        .then(|| HeaderValue::from_static("max-age=15552000; includeSubDomains"));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/health", init_health_router())
        .nest("/auth", init_auth_router(&state))
        .nest(
            "/organizations",
            init_organizations_router().route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_super_admin,
            )),
        )
        .nest(
            "/users",
            init_users_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
        )
        .nest("/feature-flags", init_feature_flags_router(&state))
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .with_state(state.clone())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .layer(middleware::from_fn_with_state(error_mode, normalize_errors))
        .layer(cors_layer(&state))
        .layer(security_header(header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .layer(security_header(header::X_FRAME_OPTIONS, "SAMEORIGIN"))
        .layer(security_header(header::REFERRER_POLICY, "no-referrer"))
        .layer(security_header(header::X_DNS_PREFETCH_CONTROL, "off"))
        .layer(security_header(
            HeaderName::from_static("cross-origin-opener-policy"),
            "same-origin",
        ))
        .layer(security_header(header::X_XSS_PROTECTION, "0"))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            move |_: &Response| hsts.clone(),
        ))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
