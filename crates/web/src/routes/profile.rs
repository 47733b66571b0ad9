//! Account page: the user's applications, stats and password change.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use werescuecats_core::AdoptionId;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{Adoption, CurrentUser, User};
use crate::services::adoption::UserAdoptionStats;
use crate::services::{AdoptionService, AuthError, AuthService};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub user: Option<CurrentUser>,
    pub account: User,
    pub adoptions: Vec<Adoption>,
    pub stats: UserAdoptionStats,
    pub success: Option<&'static str>,
    pub error: Option<String>,
}

/// Map a `?success=` code to a banner.
fn success_message(code: Option<&str>) -> Option<&'static str> {
    match code? {
        "cancelled" => Some("Your application has been withdrawn."),
        "password" => Some("Your password has been changed."),
        _ => None,
    }
}

fn redirect_with_error(message: &str) -> Redirect {
    Redirect::to(&format!(
        "/profile?error={}",
        urlencoding::encode(message)
    ))
}

/// Display the profile page.
#[instrument(skip(state, current, query), fields(user_id = %current.id))]
pub async fn show(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<ProfileTemplate> {
    let account = AuthService::new(state.pool()).get_user(current.id).await?;
    let adoptions = AdoptionService::new(state.pool());
    let applications = adoptions.list_by_user(current.id).await?;
    let stats = adoptions.user_stats(current.id).await?;

    Ok(ProfileTemplate {
        user: Some(current),
        account,
        adoptions: applications,
        stats,
        success: success_message(query.success.as_deref()),
        error: query.error,
    })
}

/// Withdraw one of the user's pending applications.
#[instrument(skip(state, current), fields(user_id = %current.id))]
pub async fn cancel_adoption(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<AdoptionId>,
) -> Result<Redirect> {
    match AdoptionService::new(state.pool()).cancel(id, &current).await {
        Ok(_) => {
            let adoption_id = id.to_string();
            add_breadcrumb(
                "adoption",
                "Application cancelled",
                Some(&[("adoption_id", adoption_id.as_str())]),
            );
            Ok(Redirect::to("/profile?success=cancelled"))
        }
        Err(e) => {
            let err = AppError::from(e);
            if err.status().is_server_error() {
                return Err(err);
            }
            Ok(redirect_with_error(&err.public_message()))
        }
    }
}

/// Change the user's password.
#[instrument(skip(state, current, form), fields(user_id = %current.id))]
pub async fn change_password(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Form(form): Form<PasswordForm>,
) -> Result<Redirect> {
    if form.new_password != form.new_password_confirm {
        return Ok(redirect_with_error("Passwords do not match"));
    }

    match AuthService::new(state.pool())
        .change_password(current.id, &form.current_password, &form.new_password)
        .await
    {
        Ok(()) => Ok(Redirect::to("/profile?success=password")),
        Err(e) if e.is_user_facing() => {
            let message = match e {
                AuthError::InvalidCredentials => "Current password is incorrect".to_owned(),
                other => other.to_string(),
            };
            Ok(redirect_with_error(&message))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_messages() {
        assert!(success_message(Some("cancelled")).is_some());
        assert!(success_message(Some("password")).is_some());
        assert_eq!(success_message(Some("other")), None);
        assert_eq!(success_message(None), None);
    }
}
