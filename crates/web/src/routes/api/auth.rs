//! `/api/auth` handlers.
//!
//! Logging in through the API sets the same session cookie the pages use.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::users::UserDto;
use crate::error::{ApiError, AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::api::extract::ApiJson;
use crate::services::AuthService;
use crate::services::auth::{AuthError, Registration};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Envelope for login and registration responses.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
}

impl AuthResponse {
    fn ok(message: &str, user: UserDto) -> Self {
        Self {
            success: true,
            message: message.to_owned(),
            user: Some(user),
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
            user: None,
        }
    }
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let user = match AuthService::new(state.pool())
        .login(&body.email, &body.password)
        .await
    {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("API login failed");
            return Ok((
                StatusCode::UNAUTHORIZED,
                Json(AuthResponse::failed("Invalid credentials".to_owned())),
            )
                .into_response());
        }
        Err(e) => return Err(e.into()),
    };

    set_current_user(&session, &CurrentUser::from(&user))
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "API login");

    Ok(Json(AuthResponse::ok("Login successful", user.into())).into_response())
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<Registration>,
) -> Result<Response, ApiError> {
    match AuthService::new(state.pool()).register(&form).await {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(AuthResponse::ok("Registration successful", user.into())),
        )
            .into_response()),
        Err(e) if e.is_user_facing() => Ok((
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failed(AppError::from(e).public_message())),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// `POST /api/auth/logout`
pub async fn logout(session: Session) -> Result<StatusCode, ApiError> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}
