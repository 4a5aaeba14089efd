use axum::{Json, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{info, instrument};

use flagpole_config::{AuthTransport, Role};
use flagpole_core::{ApiResponse, AppError};
use flagpole_models::{AuthResponse, LoginRequest, SignupRequest, UserData};

use crate::middleware::CurrentPrincipal;
use crate::middleware::auth::AUTH_COOKIE;
use crate::state::{AppConfig, AppState};
use crate::validator::ValidatedJson;

use super::service::{AuthService, Session};

/// Sets the session cookie when tokens travel by cookie. Bearer deployments only get
/// the token in the body.
fn issue_session(jar: CookieJar, config: &AppConfig, session: Session) -> (CookieJar, Json<AuthResponse>) {
    let jar = match config.auth.transport {
        AuthTransport::Cookie => jar.add(
            Cookie::build((AUTH_COOKIE, session.token.clone()))
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(config.server.environment.is_production())
                .path("/")
                .max_age(time::Duration::seconds(config.jwt.expires_in_secs)),
        ),
        AuthTransport::Bearer => jar,
    };

    (jar, Json(AuthResponse::new(session.token, session.user)))
}

/// Log in with the configured super admin credential
#[utoipa::path(
    post,
    path = "/auth/super-admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Incorrect email or password")
    ),
    tag = "Authentication"
)]
pub async fn super_admin_login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let config = &state.config;
    let session = AuthService::super_admin_login(&config.auth, &config.roles, &config.jwt, dto)?;
    Ok(issue_session(jar, config, session))
}

async fn signup(
    state: &AppState,
    role: Role,
    dto: SignupRequest,
) -> Result<ApiResponse<UserData>, AppError> {
    let user = AuthService::signup(&state.store, &state.config.roles, role, dto).await?;
    Ok(ApiResponse::data(UserData { user })
        .with_message("Signup successful")
        .created())
}

/// Sign up as an organization admin
#[utoipa::path(
    post,
    path = "/auth/org-admin-signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Signup successful", body = UserData),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 404, description = "Organization not found")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn org_admin_signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<ApiResponse<UserData>, AppError> {
    signup(&state, Role::OrgAdmin, dto).await
}

/// Sign up as an end user
#[utoipa::path(
    post,
    path = "/auth/end-user-signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Signup successful", body = UserData),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 404, description = "Organization not found")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn end_user_signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<ApiResponse<UserData>, AppError> {
    signup(&state, Role::EndUser, dto).await
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid password"),
        (status = 404, description = "User not found")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let session = AuthService::login(&state.store, &state.config.jwt, dto).await?;
    Ok(issue_session(jar, &state.config, session))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Not logged in")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Authentication"
)]
pub async fn logout(
    CurrentPrincipal(principal): CurrentPrincipal,
    jar: CookieJar,
) -> (CookieJar, ApiResponse<()>) {
    info!(role = %principal.role(), user.id = ?principal.user_id(), "Logged out");
    // Always emit the removal, even when the token arrived in a header.
    let mut cookie = Cookie::build((AUTH_COOKIE, "")).path("/").build();
    cookie.make_removal();
    (jar.add(cookie), ApiResponse::message("Logged out successfully"))
}
