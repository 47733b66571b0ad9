//! Unified error handling with Sentry integration.
//!
//! Page handlers return `Result<T, AppError>` and get a plain-text error
//! page. JSON handlers return `Result<T, ApiError>`, which renders the same
//! status with a `{"error": message}` body. Server errors are captured to
//! Sentry before responding.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AdoptionError, ApiTokenError, AuthError, CatApiError, CatError};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Adoption error: {0}")]
    Adoption(#[from] AdoptionError),

    #[error("Cat error: {0}")]
    Cat(#[from] CatError),

    /// TheCatAPI call failed.
    #[error("Cat API error: {0}")]
    CatApi(#[from] CatApiError),

    #[error("API token error: {0}")]
    ApiToken(#[from] ApiTokenError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Rate limited.
    #[error("Rate limited")]
    RateLimited,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(RepositoryError::Conflict(_)) | Self::Conflict(_) => {
                StatusCode::CONFLICT
            }
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::CatApi(_) => StatusCode::BAD_GATEWAY,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::UserAlreadyExists
                | AuthError::WeakPassword(_)
                | AuthError::InvalidEmail(_)
                | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Adoption(err) => match err {
                AdoptionError::NotFound(_) => StatusCode::NOT_FOUND,
                AdoptionError::CatNotAvailable(_)
                | AdoptionError::InvalidTransition { .. }
                | AdoptionError::Validation(_) => StatusCode::BAD_REQUEST,
                AdoptionError::NotOwner => StatusCode::FORBIDDEN,
                AdoptionError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Cat(err) => match err {
                CatError::NotFound(_) => StatusCode::NOT_FOUND,
                CatError::InUse(_) => StatusCode::CONFLICT,
                CatError::Validation(_) | CatError::Geo(_) => StatusCode::BAD_REQUEST,
                CatError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::ApiToken(err) => match err {
                ApiTokenError::Invalid => StatusCode::UNAUTHORIZED,
                ApiTokenError::LimitExceeded => StatusCode::TOO_MANY_REQUESTS,
                ApiTokenError::Validation(_) => StatusCode::BAD_REQUEST,
                ApiTokenError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// Message safe to show to the client.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.status().is_server_error() {
            return match self {
                Self::CatApi(_) => "External service error".to_owned(),
                _ => "Internal server error".to_owned(),
            };
        }

        match self {
            Self::Database(RepositoryError::NotFound) => "Not found".to_owned(),
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::Auth(AuthError::InvalidEmail(_)) => "Invalid email address".to_owned(),
            Self::Auth(err) => err.to_string(),
            Self::Adoption(err) => err.to_string(),
            Self::Cat(err) => err.to_string(),
            Self::ApiToken(err) => err.to_string(),
            Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::BadRequest(msg)
            | Self::Conflict(msg) => msg.clone(),
            _ => self.to_string(),
        }
    }

    fn report(&self) {
        if self.status().is_server_error() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.report();
        (self.status(), self.public_message()).into_response()
    }
}

/// JSON flavour of [`AppError`] for `/api` handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

macro_rules! api_error_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for ApiError {
                fn from(err: $source) -> Self {
                    Self(AppError::from(err))
                }
            }
        )*
    };
}

api_error_from!(
    AppError,
    RepositoryError,
    AuthError,
    AdoptionError,
    CatError,
    CatApiError,
    ApiTokenError,
);

macro_rules! api_error_from_rejection {
    ($($rejection:ty),* $(,)?) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    Self(AppError::BadRequest(rejection.body_text()))
                }
            }
        )*
    };
}

api_error_from_rejection!(JsonRejection, PathRejection, QueryRejection);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.report();
        let body = serde_json::json!({ "error": self.0.public_message() });
        (self.0.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for `/api` handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Set the Sentry user context.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context on logout.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for an adoption or admin action.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use werescuecats_core::{AdoptionStatus, CatId};

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("cat 7".to_string());
        assert_eq!(err.to_string(), "Not found: cat 7");
        assert_eq!(err.public_message(), "cat 7");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            AppError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(AuthError::UserAlreadyExists).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(AdoptionError::NotOwner).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::from(CatError::InUse(CatId::new(3))).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(ApiTokenError::Invalid).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = AppError::from(AdoptionError::InvalidTransition {
            expected: AdoptionStatus::Pending,
            target: AdoptionStatus::Approved,
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.public_message(),
            "Adoption must be PENDING to be transitioned to APPROVED"
        );
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::Internal("connection refused on 10.0.0.3".into());
        assert_eq!(err.public_message(), "Internal server error");
        let err = AppError::from(RepositoryError::DataCorruption("bad enum".into()));
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[tokio::test]
    async fn test_api_error_body() {
        let response = ApiError::from(AuthError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Invalid credentials");
    }
}
