use utoipa::openapi::security::{
    ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme,
};
use utoipa::{Modify, OpenApi};

use flagpole_models::{
    AuthResponse, CheckFeatureFlagDto, CreateFeatureFlagDto, CreateOrganizationDto, FeatureFlag,
    LoginRequest, Organization, SessionData, SessionUser, SignupRequest, UpdateFeatureFlagDto,
    User, UserData,
};

use crate::middleware::auth::AUTH_COOKIE;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::auth::controller::super_admin_login,
        crate::modules::auth::controller::org_admin_signup,
        crate::modules::auth::controller::end_user_signup,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::organizations::controller::create_organization,
        crate::modules::organizations::controller::list_organizations,
        crate::modules::organizations::controller::delete_organization,
        crate::modules::users::controller::delete_user,
        crate::modules::feature_flags::controller::create_feature_flag,
        crate::modules::feature_flags::controller::update_feature_flag,
        crate::modules::feature_flags::controller::delete_feature_flag,
        crate::modules::feature_flags::controller::list_feature_flags,
        crate::modules::feature_flags::controller::check_feature_flag,
    ),
    components(
        schemas(
            LoginRequest,
            SignupRequest,
            AuthResponse,
            SessionData,
            SessionUser,
            UserData,
            User,
            Organization,
            CreateOrganizationDto,
            FeatureFlag,
            CreateFeatureFlagDto,
            UpdateFeatureFlagDto,
            CheckFeatureFlagDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Signup, login and logout"),
        (name = "Organizations", description = "Organization management for the super admin"),
        (name = "Users", description = "User management"),
        (name = "Feature Flags", description = "Per-organization feature toggles")
    ),
    info(
        title = "Flagpole API",
        version = "0.1.0",
        description = "Multi-tenant feature flag service built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(AUTH_COOKIE))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/health",
            "/auth/login",
            "/auth/logout",
            "/organizations",
            "/organizations/delete/{id}",
            "/users/delete/{id}",
            "/feature-flags/check",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
