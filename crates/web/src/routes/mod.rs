//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Cats
//! GET  /cats                   - Available cats (?breed=&gender=&age=&page=)
//! GET  /cats/{id}              - Cat detail with adoption form
//! POST /cats/{id}/adopt        - File an application (requires auth)
//!
//! # Breeds
//! GET  /breeds                 - Breed browser (?name=&<characteristic>=on&page=)
//! GET  /breeds/{id}            - Breed detail with care tips
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Profile (requires auth)
//! GET  /profile                        - Applications and stats
//! POST /profile/password               - Change password
//! POST /profile/adoptions/{id}/cancel  - Withdraw a pending application
//!
//! # Admin (requires admin), see [`admin`]
//! # JSON API, see [`api`]
//! ```

pub mod admin;
pub mod api;
pub mod auth;
pub mod breeds;
pub mod cats;
pub mod home;
pub mod profile;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
///
/// Form submissions share the login rate limit with the JSON API.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .layer(auth_rate_limiter())
        .route("/login", get(auth::login_page))
        .route("/register", get(auth::register_page))
        .route("/logout", post(auth::logout))
}

/// Create the cat routes router.
pub fn cat_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cats::index))
        .route("/{id}", get(cats::show))
        .route("/{id}/adopt", post(cats::adopt))
}

/// Create the breed routes router.
pub fn breed_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(breeds::index))
        .route("/{id}", get(breeds::show))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show))
        .route("/password", post(profile::change_password))
        .route("/adoptions/{id}/cancel", post(profile::cancel_adoption))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cats", cat_routes())
        .nest("/breeds", breed_routes())
        .nest("/auth", auth_routes())
        .nest("/profile", profile_routes())
        .nest("/admin", admin::routes())
        .nest("/api", api::routes())
}
