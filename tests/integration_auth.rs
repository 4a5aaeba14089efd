mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use common::{
    PASSWORD, SUPER_ADMIN_EMAIL, SUPER_ADMIN_PASSWORD, assert_error, body_json, empty_request,
    json_request, setup_test_app, setup_with_config, test_config,
};
use flagpole_config::{AuthTransport, Environment, JwtConfig};

#[tokio::test]
async fn test_super_admin_login_success() {
    let app = setup_test_app();

    let response = app
        .send(json_request(
            "POST",
            "/auth/super-admin/login",
            None,
            json!({"email": SUPER_ADMIN_EMAIL, "password": SUPER_ADMIN_PASSWORD}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["user"]["id"], "superadmin");
    assert_eq!(body["data"]["user"]["role"], "SUPER_ADMIN");
    assert!(body["data"]["user"]["organization_id"].is_null());

    let claims = flagpole_auth::verify(
        body["token"].as_str().unwrap(),
        &JwtConfig::new(common::JWT_SECRET, 60),
    )
    .unwrap();
    assert_eq!(claims.sub, "superadmin");
    assert_eq!(claims.organization_id, None);
}

#[tokio::test]
async fn test_super_admin_login_wrong_password() {
    let app = setup_test_app();

    let response = app
        .send(json_request(
            "POST",
            "/auth/super-admin/login",
            None,
            json!({"email": SUPER_ADMIN_EMAIL, "password": "nope"}),
        ))
        .await;

    assert_error(response, StatusCode::UNAUTHORIZED, "Incorrect email or password").await;
}

#[tokio::test]
async fn test_org_admin_signup_hides_password() {
    let app = setup_test_app();
    let org = app.create_organization("Acme").await;

    let response = app
        .send(json_request(
            "POST",
            "/auth/org-admin-signup",
            None,
            json!({"email": "admin@acme.test", "password": PASSWORD, "organization_id": org.id}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Signup successful");

    let user = &body["data"]["user"];
    assert_eq!(user["email"], "admin@acme.test");
    assert_eq!(user["role"], "ORG_ADMIN");
    assert_eq!(user["organization_id"], org.id.into_inner());
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn test_signup_then_login_resolves_same_user() {
    let app = setup_test_app();
    let org = app.create_organization("Acme").await;

    let response = app
        .send(json_request(
            "POST",
            "/auth/end-user-signup",
            None,
            json!({"email": "user@acme.test", "password": PASSWORD, "organization_id": org.id}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["user"]["role"], "END_USER");
    let user_id = body["data"]["user"]["id"].as_i64().unwrap();

    let token = app.login("user@acme.test", PASSWORD).await;
    let claims = flagpole_auth::verify(&token, &JwtConfig::new(common::JWT_SECRET, 60)).unwrap();

    assert_eq!(claims.user_id(), Some(user_id));
    assert_eq!(claims.role, "END_USER");
    assert_eq!(claims.organization_id, Some(org.id.into_inner()));
}

#[tokio::test]
async fn test_padded_password_round_trip() {
    let app = setup_test_app();
    let org = app.create_organization("Acme").await;
    let padded = format!(" {PASSWORD} ");

    let response = app
        .send(json_request(
            "POST",
            "/auth/org-admin-signup",
            None,
            json!({"email": "padded@acme.test", "password": padded, "organization_id": org.id}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    app.login("padded@acme.test", &padded).await;
    app.login("padded@acme.test", PASSWORD).await;
}

#[tokio::test]
async fn test_signup_unknown_organization() {
    let app = setup_test_app();

    let response = app
        .send(json_request(
            "POST",
            "/auth/org-admin-signup",
            None,
            json!({"email": "admin@ghost.test", "password": PASSWORD, "organization_id": 999}),
        ))
        .await;

    assert_error(response, StatusCode::NOT_FOUND, "Organization not found").await;
}

#[tokio::test]
async fn test_signup_weak_password_is_rejected_before_store_access() {
    let app = setup_test_app();

    // The organization does not exist either; validation must answer first.
    let response = app
        .send(json_request(
            "POST",
            "/auth/end-user-signup",
            None,
            json!({"email": "user@acme.test", "password": "password1", "organization_id": 42}),
        ))
        .await;

    assert_error(
        response,
        StatusCode::BAD_REQUEST,
        "Password must include uppercase, lowercase, number, and special character.",
    )
    .await;
}

#[tokio::test]
async fn test_signup_rejects_non_integer_organization_id() {
    let app = setup_test_app();

    let response = app
        .send(json_request(
            "POST",
            "/auth/end-user-signup",
            None,
            json!({"email": "user@acme.test", "password": PASSWORD, "organization_id": "1"}),
        ))
        .await;

    assert_error(response, StatusCode::BAD_REQUEST, "Invalid field type in request").await;
}

#[tokio::test]
async fn test_duplicate_email_signup() {
    let app = setup_test_app();
    let org = app.create_organization("Acme").await;
    app.create_user("taken@acme.test", "END_USER", &org).await;

    let response = app
        .send(json_request(
            "POST",
            "/auth/end-user-signup",
            None,
            json!({"email": "taken@acme.test", "password": PASSWORD, "organization_id": org.id}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], "fail");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Duplicate entry:")
    );
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = setup_test_app();

    let response = app
        .send(json_request(
            "POST",
            "/auth/login",
            None,
            json!({"email": "ghost@acme.test", "password": PASSWORD}),
        ))
        .await;

    assert_error(response, StatusCode::NOT_FOUND, "User not found").await;
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = setup_test_app();
    let org = app.create_organization("Acme").await;
    app.create_user("user@acme.test", "END_USER", &org).await;

    let response = app
        .send(json_request(
            "POST",
            "/auth/login",
            None,
            json!({"email": "user@acme.test", "password": "Wrong1!pw"}),
        ))
        .await;

    assert_error(response, StatusCode::UNAUTHORIZED, "Invalid password").await;
}

#[tokio::test]
async fn test_login_blank_email() {
    let app = setup_test_app();

    let response = app
        .send(json_request(
            "POST",
            "/auth/login",
            None,
            json!({"email": "  ", "password": PASSWORD}),
        ))
        .await;

    assert_error(response, StatusCode::BAD_REQUEST, "Email is required").await;
}

#[tokio::test]
async fn test_login_missing_field() {
    let app = setup_test_app();

    let response = app
        .send(json_request(
            "POST",
            "/auth/login",
            None,
            json!({"email": "user@acme.test"}),
        ))
        .await;

    assert_error(response, StatusCode::BAD_REQUEST, "password is required").await;
}

#[tokio::test]
async fn test_logout_requires_token() {
    let app = setup_test_app();

    let response = app.send(empty_request("POST", "/auth/logout", None)).await;

    assert_error(
        response,
        StatusCode::UNAUTHORIZED,
        "You are not logged in! Please log in to get access.",
    )
    .await;
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = setup_test_app();
    let org = app.create_organization("Acme").await;
    let token = app.user_token("user@acme.test", "END_USER", &org).await;

    let response = app
        .send(empty_request("POST", "/auth/logout", Some(&token)))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("jwt="));

    let body = body_json(response).await;
    assert_eq!(body["message"], "Logged out successfully");
}

#[tokio::test]
async fn test_cookie_transport_round_trip() {
    let app = setup_with_config(test_config(AuthTransport::Cookie, Environment::Production));
    let org = app.create_organization("Acme").await;
    app.create_user("admin@acme.test", "ORG_ADMIN", &org).await;

    let response = app
        .send(json_request(
            "POST",
            "/auth/login",
            None,
            json!({"email": "admin@acme.test", "password": PASSWORD}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("jwt="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Secure"));

    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap();

    let list = Request::builder()
        .method("GET")
        .uri("/feature-flags/list")
        .header(header::COOKIE, format!("jwt={token}"))
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.send(list).await.status(), StatusCode::OK);

    // The bearer header is ignored under the cookie transport.
    let bearer = empty_request("GET", "/feature-flags/list", Some(token));
    assert_eq!(app.send(bearer).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_transport_sets_no_cookie() {
    let app = setup_test_app();
    let org = app.create_organization("Acme").await;
    app.create_user("user@acme.test", "END_USER", &org).await;

    let response = app
        .send(json_request(
            "POST",
            "/auth/login",
            None,
            json!({"email": "user@acme.test", "password": PASSWORD}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}
