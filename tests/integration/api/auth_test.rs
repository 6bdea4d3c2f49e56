//! Authentication API integration tests
//!
//! Tests for the authentication endpoints including signup, login, logout
//! and user info.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{auth_header, create_test_user, set_cookie_pair, TestApp, TEST_PASSWORD};
use crate::assert_contains;

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "username": "alice",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"].get("password_hash").is_none());
    assert!(set_cookie_pair(&response, "snapshare_session").is_some());
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let app = TestApp::new();
    let first = create_test_user(&app.server, "alice").await;

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "username": "alice",
            "password": "another-password"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], 409);

    // The first account still logs in with its own password
    let login = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({ "username": "alice", "password": TEST_PASSWORD }))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);
    let body: serde_json::Value = login.json();
    assert_eq!(body["user"]["id"], first.id.as_str());
}

#[tokio::test]
async fn test_signup_validation() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&serde_json::json!({ "username": "x", "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&serde_json::json!({ "username": "alice", "password": "short" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_contains!(response.text(), "at least 8 characters");
}

#[tokio::test]
async fn test_login_failures_look_the_same() {
    let app = TestApp::new();
    create_test_user(&app.server, "alice").await;

    let wrong_password = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({ "username": "alice", "password": "wrongpassword" }))
        .await;
    let unknown_user = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({ "username": "nobody", "password": TEST_PASSWORD }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.text(), unknown_user.text());
}

#[tokio::test]
async fn test_get_me_with_bearer_token() {
    let app = TestApp::new();
    let user = create_test_user(&app.server, "alice").await;

    let (name, value) = auth_header(&user.token);
    let response = app.server.get("/api/auth/me").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], user.id.as_str());
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn test_get_me_unauthorized() {
    let app = TestApp::new();

    let response = app.server.get("/api/auth/me").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let (name, value) = auth_header("invalid.token.here");
    let response = app.server.get("/api/auth/me").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new();
    let user = create_test_user(&app.server, "alice").await;

    let (name, value) = auth_header(&user.token);
    let response = app
        .server
        .post("/api/auth/logout")
        .add_header(name.clone(), value.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = app.server.get("/api/auth/me").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
