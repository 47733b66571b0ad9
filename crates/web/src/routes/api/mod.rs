//! JSON API under `/api`.
//!
//! Authentication uses the same session cookie as the pages; the health
//! data endpoint uses an `X-API-Token` header instead.

pub mod adoptions;
pub mod auth;
pub mod breeds;
pub mod cats;
pub mod dashboard;
pub mod extract;
pub mod health_data;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .layer(auth_rate_limiter())
        .route("/logout", post(auth::logout))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index))
        .route("/me", get(users::me))
        .route("/{id}", get(users::show))
}

fn cat_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cats::index).post(cats::create))
        .route("/available", get(cats::available))
        .route("/pending", get(cats::pending))
        .route("/adopted", get(cats::adopted))
        .route("/area", get(cats::in_area))
        .route("/breed/{breed_id}", get(cats::by_breed))
        .route("/{id}", get(cats::show).delete(cats::delete))
        .route("/{id}/status", put(cats::update_status))
}

fn breed_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(breeds::index))
        .route("/search", get(breeds::search))
        .route("/{id}", get(breeds::show))
}

fn adoption_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(adoptions::index).post(adoptions::create))
        .route("/pending", get(adoptions::pending))
        .route("/user/{user_id}", get(adoptions::by_user))
        .route("/user/{user_id}/stats", get(adoptions::user_stats))
        .route("/{id}", get(adoptions::show))
        .route("/{id}/approve", put(adoptions::approve))
        .route("/{id}/complete", put(adoptions::complete))
        .route("/{id}/reject", put(adoptions::reject))
        .route("/{id}/cancel", put(adoptions::cancel))
}

/// All `/api` routes, rate limited per client IP.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/cats", cat_routes())
        .nest("/breeds", breed_routes())
        .nest("/adoptions", adoption_routes())
        .route("/dashboard/stats", get(dashboard::stats))
        .route(
            "/health-data/anonymous-adoptions",
            get(health_data::anonymous_adoptions),
        )
        .layer(api_rate_limiter())
}
