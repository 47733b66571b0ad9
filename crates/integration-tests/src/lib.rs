//! Integration tests for WeRescueCats.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database, migrate and seed
//! cargo run -p werescuecats-cli -- migrate
//! cargo run -p werescuecats-cli -- seed
//!
//! # Start the server, then run the ignored tests
//! cargo run -p werescuecats-web
//! cargo test -p werescuecats-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_auth` - JSON login, registration and session tests
//! - `api_catalog` - Cat and breed endpoints
//! - `api_adoptions` - Application lifecycle through the JSON API
//! - `health_data` - Token-protected anonymous export
//! - `pages` - Server-rendered pages and redirects
//!
//! Tests expect the seeded accounts (`admin@werescuecats.io` / `admin123`).

use reqwest::{Client, StatusCode, redirect};
use serde_json::{Value, json};

pub const ADMIN_EMAIL: &str = "admin@werescuecats.io";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const USER_PASSWORD: &str = "password123";

/// Base URL of the running server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("WRC_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Absolute URL for a path on the running server.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", base_url())
}

/// Client that keeps the session cookie and does not follow redirects, so
/// tests can assert on `Location`.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn client() -> reqwest::Result<Client> {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
}

/// Log in through the JSON API and return the status code.
///
/// # Errors
///
/// Returns an error if the request fails to send.
pub async fn api_login(client: &Client, email: &str, password: &str) -> reqwest::Result<StatusCode> {
    let resp = client
        .post(url("/api/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?;
    Ok(resp.status())
}

/// Register a fresh user with a unique email and return the response body.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not JSON.
pub async fn register_unique(client: &Client) -> reqwest::Result<(String, Value)> {
    let email = format!("it-{}@example.com", uuid::Uuid::new_v4().simple());
    let body = client
        .post(url("/api/auth/register"))
        .json(&json!({
            "email": email,
            "password": USER_PASSWORD,
            "firstName": "Integration",
            "lastName": "Tester",
            "streetAddress": "12 Hauptstrasse",
            "postalCode": "01067",
        }))
        .send()
        .await?
        .json()
        .await?;
    Ok((email, body))
}
