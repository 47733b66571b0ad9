//! User management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use tracing::instrument;

use werescuecats_core::{UserId, UserRole};

use super::{Notice, redirect_after};
use crate::db::UserRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentUser, User};
use crate::state::AppState;

const USERS_PATH: &str = "/admin/users";

#[derive(Template, WebTemplate)]
#[template(path = "admin/users.html")]
pub struct UsersTemplate {
    pub user: Option<CurrentUser>,
    pub current_path: &'static str,
    pub users: Vec<User>,
    pub admin_count: usize,
    pub notice: Notice,
}

/// All users, newest first.
#[instrument(skip(admin, state, notice), fields(admin_id = %admin.id))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(notice): Query<Notice>,
) -> Result<UsersTemplate> {
    let users = UserRepository::new(state.pool()).list_all().await?;
    let admin_count = users.iter().filter(|u| u.is_admin()).count();

    Ok(UsersTemplate {
        user: Some(admin),
        current_path: USERS_PATH,
        users,
        admin_count,
        notice,
    })
}

async fn delete_user(state: &AppState, id: UserId) -> Result<()> {
    let users = UserRepository::new(state.pool());
    let target = users
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User not found with id: {id}")))?;

    if target.role == UserRole::Admin {
        return Err(AppError::BadRequest("Cannot delete admin users".to_owned()));
    }

    if !users.delete(id).await? {
        return Err(AppError::NotFound(format!("User not found with id: {id}")));
    }
    Ok(())
}

/// Delete a regular user. Admin accounts are refused.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Redirect> {
    let outcome = delete_user(&state, id).await;
    if outcome.is_ok() {
        tracing::info!(user_id = %id, "User deleted");
        let user_id = id.to_string();
        add_breadcrumb("admin", "User deleted", Some(&[("user_id", user_id.as_str())]));
    }
    redirect_after(USERS_PATH, outcome, "User deleted")
}
