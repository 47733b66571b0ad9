//! `/api/users` handlers.

use axum::{
    Json,
    extract::State,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use werescuecats_core::{UserId, UserRole};

use crate::db::UserRepository;
use crate::error::{ApiResult, AppError};
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::User;
use crate::routes::api::extract::ApiPath;
use crate::services::AuthService;
use crate::state::AppState;

/// A user as the API exposes it. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub role: UserRole,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email.into_inner(),
            first_name: user.first_name,
            last_name: user.last_name,
            street_address: user.street_address,
            postal_code: user.postal_code,
            role: user.role,
            enabled: user.enabled,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

/// `GET /api/users/me`
pub async fn me(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
) -> ApiResult<Json<UserDto>> {
    let user = AuthService::new(state.pool()).get_user(current.id).await?;
    Ok(Json(user.into()))
}

/// `GET /api/users/{id}`: admins see anyone, users only themselves.
pub async fn show(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> ApiResult<Json<UserDto>> {
    if !current.is_admin() && current.id != id {
        return Err(AppError::Forbidden("Access denied".to_owned()).into());
    }
    let user = AuthService::new(state.pool()).get_user(id).await?;
    Ok(Json(user.into()))
}

/// `GET /api/users`
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<UserDto>>> {
    let users = UserRepository::new(state.pool()).list_all().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}
