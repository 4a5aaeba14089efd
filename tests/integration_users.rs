mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{PASSWORD, assert_error, body_json, empty_request, json_request, setup_test_app};

#[tokio::test]
async fn test_org_admin_deletes_user_of_own_organization() {
    let app = setup_test_app();
    let org = app.create_organization("Acme").await;
    let admin = app.user_token("admin@acme.test", "ORG_ADMIN", &org).await;
    let user = app.create_user("user@acme.test", "END_USER", &org).await;

    let response = app
        .send(empty_request(
            "PUT",
            &format!("/users/delete/{}", user.id),
            Some(&admin),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User deleted successfully");

    // A deleted user can neither log in nor keep using an issued token.
    let response = app
        .send(json_request(
            "POST",
            "/auth/login",
            None,
            json!({"email": "user@acme.test", "password": PASSWORD}),
        ))
        .await;
    assert_error(response, StatusCode::NOT_FOUND, "User not found").await;
}

#[tokio::test]
async fn test_deleted_user_token_is_rejected() {
    let app = setup_test_app();
    let org = app.create_organization("Acme").await;
    let admin_token = app.user_token("admin@acme.test", "ORG_ADMIN", &org).await;
    let super_admin = app.super_admin_token().await;

    let response = app
        .send(empty_request("GET", "/feature-flags/list", Some(&admin_token)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let admin = app
        .state
        .store
        .users
        .find_active_by_email("admin@acme.test")
        .await
        .unwrap()
        .unwrap();
    let response = app
        .send(empty_request(
            "PUT",
            &format!("/users/delete/{}", admin.id),
            Some(&super_admin),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send(empty_request("GET", "/feature-flags/list", Some(&admin_token)))
        .await;
    assert_error(
        response,
        StatusCode::UNAUTHORIZED,
        "The user with the given token does not exist",
    )
    .await;
}

#[tokio::test]
async fn test_org_admin_cannot_delete_user_of_other_organization() {
    let app = setup_test_app();
    let acme = app.create_organization("Acme").await;
    let globex = app.create_organization("Globex").await;
    let admin = app.user_token("admin@acme.test", "ORG_ADMIN", &acme).await;
    let outsider = app.create_user("user@globex.test", "END_USER", &globex).await;

    let response = app
        .send(empty_request(
            "PUT",
            &format!("/users/delete/{}", outsider.id),
            Some(&admin),
        ))
        .await;

    assert_error(response, StatusCode::NOT_FOUND, "User failed to delete").await;
    assert!(
        app.state
            .store
            .users
            .find_active_by_id(outsider.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_repeated_user_delete_is_not_found() {
    let app = setup_test_app();
    let org = app.create_organization("Acme").await;
    let user = app.create_user("user@acme.test", "END_USER", &org).await;
    let token = app.super_admin_token().await;
    let uri = format!("/users/delete/{}", user.id);

    assert_eq!(
        app.send(empty_request("PUT", &uri, Some(&token))).await.status(),
        StatusCode::OK
    );
    let response = app.send(empty_request("PUT", &uri, Some(&token))).await;
    assert_error(response, StatusCode::NOT_FOUND, "User failed to delete").await;
}

#[tokio::test]
async fn test_end_user_cannot_delete_users() {
    let app = setup_test_app();
    let org = app.create_organization("Acme").await;
    let token = app.user_token("user@acme.test", "END_USER", &org).await;
    let other = app.create_user("other@acme.test", "END_USER", &org).await;

    let response = app
        .send(empty_request(
            "PUT",
            &format!("/users/delete/{}", other.id),
            Some(&token),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
