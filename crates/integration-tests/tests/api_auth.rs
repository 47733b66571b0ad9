//! JSON authentication and session tests.
//!
//! These tests require a running, seeded server (see the crate docs).

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use werescuecats_integration_tests::{
    ADMIN_EMAIL, ADMIN_PASSWORD, USER_PASSWORD, api_login, client, register_unique, url,
};

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_health_endpoints() {
    let client = client().unwrap();

    let resp = client.get(url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = client.get(url("/health/ready")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_login_sets_session() {
    let client = client().unwrap();

    let status = api_login(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    assert_eq!(status, StatusCode::OK);

    let me: Value = client
        .get(url("/api/users/me"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["email"], ADMIN_EMAIL);
    assert_eq!(me["role"], "ADMIN");
    assert!(me.get("passwordHash").is_none());
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_login_wrong_password() {
    let client = client().unwrap();

    let resp = client
        .post(url("/api/auth/login"))
        .json(&json!({ "email": ADMIN_EMAIL, "password": "not-the-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_register_then_login() {
    let client = client().unwrap();

    let (email, body) = register_unique(&client).await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], email.as_str());
    assert_eq!(body["user"]["role"], "USER");

    let status = api_login(&client, &email, USER_PASSWORD).await.unwrap();
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_register_duplicate_email() {
    let client = client().unwrap();
    let (email, _) = register_unique(&client).await.unwrap();

    let resp = client
        .post(url("/api/auth/register"))
        .json(&json!({
            "email": email,
            "password": USER_PASSWORD,
            "firstName": "Second",
            "lastName": "Attempt",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_logout_clears_session() {
    let client = client().unwrap();
    api_login(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    let resp = client.post(url("/api/auth/logout")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client.get(url("/api/users/me")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_admin_endpoints_forbidden_for_users() {
    let client = client().unwrap();
    let (email, _) = register_unique(&client).await.unwrap();
    api_login(&client, &email, USER_PASSWORD).await.unwrap();

    let resp = client.get(url("/api/users")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = client.get(url("/api/dashboard/stats")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
