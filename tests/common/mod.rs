#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use flagpole::router::init_router;
use flagpole::state::{AppConfig, AppState};
use flagpole_config::{
    AuthConfig, AuthTransport, CorsConfig, Environment, JwtConfig, RateLimitConfig, RolesConfig,
    ServerConfig,
};
use flagpole_core::hash_password;
use flagpole_db::Store;
use flagpole_models::{NewUser, Organization, User};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const SUPER_ADMIN_EMAIL: &str = "root@flagpole.test";
pub const SUPER_ADMIN_PASSWORD: &str = "Root1!pass";
pub const PASSWORD: &str = "Secret1!";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn test_config(transport: AuthTransport, environment: Environment) -> AppConfig {
    AppConfig {
        jwt: JwtConfig::new(JWT_SECRET, 3600),
        auth: AuthConfig {
            transport,
            super_admin_email: SUPER_ADMIN_EMAIL.to_string(),
            super_admin_password: SUPER_ADMIN_PASSWORD.to_string(),
        },
        roles: RolesConfig::default(),
        cors: CorsConfig::default(),
        rate_limit: RateLimitConfig {
            max: 10_000,
            window_secs: 3600,
            trust_proxy: false,
        },
        server: ServerConfig {
            environment,
            metrics_enabled: false,
            ..ServerConfig::default()
        },
    }
}

pub fn setup_with_config(config: AppConfig) -> TestApp {
    let state = AppState::new(Store::in_memory(), config);
    TestApp {
        router: init_router(state.clone()),
        state,
    }
}

/// Bearer transport, terse errors.
pub fn setup_test_app() -> TestApp {
    setup_with_config(test_config(AuthTransport::Bearer, Environment::Production))
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn create_organization(&self, name: &str) -> Organization {
        self.state.store.organizations.create(name).await.unwrap()
    }

    /// Stores a user directly, bypassing signup.
    pub async fn create_user(&self, email: &str, role: &str, organization: &Organization) -> User {
        self.state
            .store
            .users
            .create(&NewUser {
                email: email.to_string(),
                password_hash: hash_password(PASSWORD).unwrap(),
                role: role.to_string(),
                organization_id: organization.id,
            })
            .await
            .unwrap()
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/auth/login",
                None,
                json!({"email": email, "password": password}),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn super_admin_token(&self) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/auth/super-admin/login",
                None,
                json!({"email": SUPER_ADMIN_EMAIL, "password": SUPER_ADMIN_PASSWORD}),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        body["token"].as_str().unwrap().to_string()
    }

    /// Creates a stored user with the default password and returns its token.
    pub async fn user_token(&self, email: &str, role: &str, organization: &Organization) -> String {
        self.create_user(email, role, organization).await;
        self.login(email, PASSWORD).await
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn assert_error(response: Response, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], status.as_u16());
    assert_eq!(body["message"], message);
}
