//! Cat and breed endpoint tests.
//!
//! These tests require a running, seeded server (see the crate docs).

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::Value;

use werescuecats_core::CatStatus;
use werescuecats_integration_tests::{ADMIN_EMAIL, ADMIN_PASSWORD, api_login, client, url};

async fn get_json(path: &str) -> (StatusCode, Value) {
    let resp = client().unwrap().get(url(path)).send().await.unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap_or(Value::Null))
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_available_cats_are_available() {
    let (status, body) = get_json("/api/cats/available").await;
    assert_eq!(status, StatusCode::OK);

    for cat in body.as_array().unwrap() {
        let parsed: CatStatus = cat["status"].as_str().unwrap().parse().unwrap();
        assert_eq!(parsed, CatStatus::Available);
    }
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_area_search_around_dresden() {
    let (status, body) = get_json("/api/cats/area?lat=51.0504&lon=13.7373&radius=50").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());

    let (status, body) = get_json("/api/cats/area?lat=0&lon=0&radius=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_unknown_cat_is_not_found() {
    let (status, body) = get_json("/api/cats/999999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999999999"));
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_cat_management_requires_admin() {
    let client = client().unwrap();

    let resp = client.get(url("/api/cats/pending")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    api_login(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    let resp = client.get(url("/api/cats?page=1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["page"], 1);
    assert!(body["items"].is_array());
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_breed_pages() {
    let (status, body) = get_json("/api/breeds?page=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);

    let items = body["items"].as_array().unwrap();
    assert!(!items.is_empty(), "breeds should be synced before testing");

    let id = items.first().unwrap()["id"].as_str().unwrap().to_owned();
    let (status, breed) = get_json(&format!("/api/breeds/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(breed["id"], id.as_str());
    assert!(breed["energy_level"].as_u64().unwrap() <= 5);
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_breed_search_by_trait() {
    let (status, body) = get_json("/api/breeds/search?childFriendly=4").await;
    assert_eq!(status, StatusCode::OK);

    for breed in body.as_array().unwrap() {
        assert!(breed["child_friendly"].as_u64().unwrap() >= 4);
    }
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_unknown_breed_is_not_found() {
    let (status, _) = get_json("/api/breeds/zzzz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
