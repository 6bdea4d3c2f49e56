//! Authentication test helpers
//!
//! Provides utilities for creating test users through the API and for
//! carrying their session between requests.

use axum::http::{
    header::{AUTHORIZATION, COOKIE, SET_COOKIE},
    HeaderName, HeaderValue, StatusCode,
};
use axum_test::{TestResponse, TestServer};
use uuid::Uuid;

/// Password used for every test user
pub const TEST_PASSWORD: &str = "test_password_123";

/// Test user credentials
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub password: String,
    pub token: String,
}

/// Sign a user up through `POST /api/auth/signup`
pub async fn create_test_user(server: &TestServer, username: &str) -> TestUser {
    let response = server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "username": username,
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "signup failed: {}", response.text());

    let body: serde_json::Value = response.json();
    TestUser {
        id: body["user"]["id"].as_str().unwrap().to_string(),
        username: username.to_string(),
        password: TEST_PASSWORD.to_string(),
        token: body["token"].as_str().unwrap().to_string(),
    }
}

/// Sign up a user with a unique name
pub async fn create_unique_test_user(server: &TestServer) -> TestUser {
    let suffix = Uuid::new_v4().simple().to_string();
    create_test_user(server, &format!("user_{}", &suffix[..12])).await
}

/// `Authorization` header carrying a bearer token
pub fn auth_header(token: &str) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    )
}

/// `Cookie` header carrying the given `name=value` pairs
pub fn cookie_header(pairs: &[String]) -> (HeaderName, HeaderValue) {
    (COOKIE, HeaderValue::from_str(&pairs.join("; ")).unwrap())
}

/// The `name=value` part of the `Set-Cookie` header for `name`, if any
pub fn set_cookie_pair(response: &TestResponse, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{}=", name)))
        .map(|pair| pair.to_string())
}
