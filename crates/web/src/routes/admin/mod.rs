//! Admin back-office pages.
//!
//! # Route Structure
//!
//! ```text
//! GET  /admin                           - Dashboard figures
//!
//! # Cats
//! GET  /admin/cats                      - Paged cat table (?status=&page=)
//! GET  /admin/cats/new                  - Intake form
//! POST /admin/cats                      - Create cat
//! POST /admin/cats/{id}/status          - Change status
//! POST /admin/cats/{id}/delete          - Delete cat
//!
//! # Applications
//! GET  /admin/applications              - All applications
//! POST /admin/applications/{id}/approve
//! POST /admin/applications/{id}/complete
//! POST /admin/applications/{id}/reject  - Requires a reason
//!
//! # Users
//! GET  /admin/users                     - All users
//! POST /admin/users/{id}/delete         - Delete a non-admin user
//! ```
//!
//! Every handler takes [`RequireAdmin`](crate::middleware::RequireAdmin).
//! Actions redirect back to their list page with `?success=` or `?error=`.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::state::AppState;

pub mod applications;
pub mod cats;
pub mod dashboard;
pub mod users;

/// Flash message carried in the redirect query string.
#[derive(Debug, Default, Deserialize)]
pub struct Notice {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Redirect to `path` with the outcome of an action.
///
/// Client errors become an `?error=` banner. Server errors propagate.
fn redirect_after<T, E>(
    path: &str,
    outcome: std::result::Result<T, E>,
    done: &str,
) -> Result<Redirect>
where
    AppError: From<E>,
{
    match outcome {
        Ok(_) => Ok(Redirect::to(&format!(
            "{path}?success={}",
            urlencoding::encode(done)
        ))),
        Err(e) => {
            let err = AppError::from(e);
            if err.status().is_server_error() {
                return Err(err);
            }
            Ok(Redirect::to(&format!(
                "{path}?error={}",
                urlencoding::encode(&err.public_message())
            )))
        }
    }
}

/// Build the admin router, mounted at `/admin`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/cats", get(cats::index).post(cats::create))
        .route("/cats/new", get(cats::new_form))
        .route("/cats/{id}/status", post(cats::update_status))
        .route("/cats/{id}/delete", post(cats::delete))
        .route("/applications", get(applications::index))
        .route("/applications/{id}/approve", post(applications::approve))
        .route("/applications/{id}/complete", post(applications::complete))
        .route("/applications/{id}/reject", post(applications::reject))
        .route("/users", get(users::index))
        .route("/users/{id}/delete", post(users::delete))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::header::LOCATION;
    use axum::response::IntoResponse;
    use werescuecats_core::CatId;

    use super::*;
    use crate::services::CatError;

    fn location(redirect: Redirect) -> String {
        let response = redirect.into_response();
        response.headers()[LOCATION].to_str().unwrap().to_owned()
    }

    #[test]
    fn test_redirect_after_success() {
        let redirect = redirect_after::<(), AppError>("/admin/cats", Ok(()), "Cat deleted").unwrap();
        assert_eq!(location(redirect), "/admin/cats?success=Cat%20deleted");
    }

    #[test]
    fn test_redirect_after_client_error() {
        let outcome: std::result::Result<(), CatError> = Err(CatError::InUse(CatId::new(4)));
        let redirect = redirect_after("/admin/cats", outcome, "Cat deleted").unwrap();
        assert!(location(redirect).starts_with("/admin/cats?error=Cat%204"));
    }

    #[test]
    fn test_redirect_after_server_error_propagates() {
        let outcome: std::result::Result<(), AppError> = Err(AppError::Internal("boom".into()));
        assert!(redirect_after("/admin/cats", outcome, "x").is_err());
    }
}
