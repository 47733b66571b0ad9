//! Adoption lifecycle through the JSON API.
//!
//! These tests require a running, seeded server with available cats.
//! Every test except the completion one leaves its cat available again.

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use werescuecats_integration_tests::{
    ADMIN_EMAIL, ADMIN_PASSWORD, USER_PASSWORD, api_login, client, register_unique, url,
};

async fn logged_in_user() -> Client {
    let client = client().unwrap();
    let (email, _) = register_unique(&client).await.unwrap();
    api_login(&client, &email, USER_PASSWORD).await.unwrap();
    client
}

async fn first_available_cat(client: &Client) -> i64 {
    let cats: Value = client
        .get(url("/api/cats/available"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    cats.as_array()
        .unwrap()
        .first()
        .expect("needs an available cat")["id"]
        .as_i64()
        .unwrap()
}

async fn cat_status(client: &Client, cat_id: i64) -> String {
    let cat: Value = client
        .get(url(&format!("/api/cats/{cat_id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    cat["status"].as_str().unwrap().to_owned()
}

async fn admin() -> Client {
    let admin = client().unwrap();
    api_login(&admin, ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    admin
}

async fn reject(admin: &Client, id: i64) {
    let resp = admin
        .put(url(&format!("/api/adoptions/{id}/reject")))
        .json(&json!({ "reason": "Cleaning up" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

async fn apply(client: &Client, cat_id: i64) -> Value {
    let resp = client
        .post(url("/api/adoptions"))
        .json(&json!({
            "catId": cat_id,
            "experience": "Grew up with two cats",
            "reason": "Quiet flat with a balcony",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.unwrap()
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_apply_requires_login() {
    let client = client().unwrap();
    let resp = client
        .post(url("/api/adoptions"))
        .json(&json!({ "catId": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_apply_then_cancel_releases_cat() {
    let client = logged_in_user().await;
    let cat_id = first_available_cat(&client).await;

    let adoption = apply(&client, cat_id).await;
    assert_eq!(adoption["status"], "PENDING");
    assert!(
        adoption["notes"]
            .as_str()
            .unwrap()
            .contains("Grew up with two cats")
    );
    assert_eq!(cat_status(&client, cat_id).await, "PENDING");

    // A reserved cat cannot take a second application
    let other = logged_in_user().await;
    let resp = other
        .post(url("/api/adoptions"))
        .json(&json!({ "catId": cat_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let id = adoption["id"].as_i64().unwrap();
    let resp = client
        .put(url(&format!("/api/adoptions/{id}/cancel")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cancelled: Value = resp.json().await.unwrap();
    assert_eq!(cancelled["status"], "CANCELLED");
    assert_eq!(cat_status(&client, cat_id).await, "AVAILABLE");
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_admin_reject_releases_cat() {
    let user = logged_in_user().await;
    let cat_id = first_available_cat(&user).await;
    let id = apply(&user, cat_id).await["id"].as_i64().unwrap();

    let admin = admin().await;

    // A reason is required
    let resp = admin
        .put(url(&format!("/api/adoptions/{id}/reject")))
        .json(&json!({ "reason": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let rejected: Value = admin
        .put(url(&format!("/api/adoptions/{id}/reject")))
        .json(&json!({ "reason": "Landlord does not allow pets" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rejected["status"], "REJECTED");
    assert_eq!(rejected["adminNotes"], "Landlord does not allow pets");
    assert_eq!(cat_status(&admin, cat_id).await, "AVAILABLE");

    // Only pending applications can be approved
    let resp = admin
        .put(url(&format!("/api/adoptions/{id}/approve")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_second_application_to_reserved_cat_rejected() {
    let first = logged_in_user().await;
    let cat_id = first_available_cat(&first).await;
    let id = apply(&first, cat_id).await["id"].as_i64().unwrap();

    let second = logged_in_user().await;
    let resp = second
        .post(url("/api/adoptions"))
        .json(&json!({ "catId": cat_id, "notes": "Me too" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
    assert_eq!(cat_status(&second, cat_id).await, "PENDING");

    reject(&admin().await, id).await;
    assert_eq!(cat_status(&first, cat_id).await, "AVAILABLE");
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_complete_requires_approval() {
    let user = logged_in_user().await;
    let cat_id = first_available_cat(&user).await;
    let id = apply(&user, cat_id).await["id"].as_i64().unwrap();

    let admin = admin().await;
    let resp = admin
        .put(url(&format!("/api/adoptions/{id}/complete")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(cat_status(&admin, cat_id).await, "PENDING");

    reject(&admin, id).await;
    assert_eq!(cat_status(&admin, cat_id).await, "AVAILABLE");
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_approve_then_complete_adopts_cat() {
    let user = logged_in_user().await;
    let cat_id = first_available_cat(&user).await;
    let id = apply(&user, cat_id).await["id"].as_i64().unwrap();

    let admin = admin().await;
    let approved: Value = admin
        .put(url(&format!("/api/adoptions/{id}/approve")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(approved["status"], "APPROVED");
    assert!(approved["approvedDate"].is_string());
    assert!(approved["completedDate"].is_null());
    assert_eq!(cat_status(&admin, cat_id).await, "PENDING");

    let resp = admin
        .put(url(&format!("/api/adoptions/{id}/complete")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let completed: Value = resp.json().await.unwrap();
    assert_eq!(completed["status"], "COMPLETED");
    assert!(completed["completedDate"].is_string());
    assert_eq!(cat_status(&admin, cat_id).await, "ADOPTED");

    // Terminal: the owner can no longer cancel
    let resp = user
        .put(url(&format!("/api/adoptions/{id}/cancel")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_users_cannot_read_others_applications() {
    let client = logged_in_user().await;
    let me: Value = client
        .get(url("/api/users/me"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let my_id = me["id"].as_i64().unwrap();

    let resp = client
        .get(url(&format!("/api/adoptions/user/{my_id}/stats")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(url(&format!("/api/adoptions/user/{}", my_id + 100_000)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
