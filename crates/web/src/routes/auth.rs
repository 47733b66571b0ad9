//! Authentication route handlers.
//!
//! Login, registration and logout for the HTML pages. Failed submissions
//! re-render the form with the error inline.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::services::auth::{AuthError, Registration};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub postal_code: String,
}

impl RegisterForm {
    fn to_registration(&self) -> Registration {
        Registration {
            email: self.email.clone(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            street_address: Some(self.street_address.clone()),
            postal_code: Some(self.postal_code.clone()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub email: String,
}

/// Register page template. Keeps entered values on error.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub street_address: String,
    pub postal_code: String,
}

impl RegisterTemplate {
    fn empty() -> Self {
        Self {
            user: None,
            error: None,
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            street_address: String::new(),
            postal_code: String::new(),
        }
    }

    fn with_error(form: &RegisterForm, error: String) -> Self {
        Self {
            user: None,
            error: Some(error),
            email: form.email.clone(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            street_address: form.street_address.clone(),
            postal_code: form.postal_code.clone(),
        }
    }
}

fn success_message(code: Option<&str>) -> Option<String> {
    match code? {
        "registered" => Some("Registration successful. Please log in.".to_owned()),
        "logged_out" => Some("You have been logged out.".to_owned()),
        _ => None,
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page. Logged-in users go straight to their profile.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/profile").into_response();
    }
    LoginTemplate {
        user: None,
        error: None,
        success: success_message(query.success.as_deref()),
        email: String::new(),
    }
    .into_response()
}

/// Handle login form submission. Admins land on the dashboard.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let failed = |error: &str| {
        (
            StatusCode::UNAUTHORIZED,
            LoginTemplate {
                user: None,
                error: Some(error.to_owned()),
                success: None,
                email: form.email.clone(),
            },
        )
            .into_response()
    };

    let user = match AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await
    {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Login failed");
            return failed("Invalid email or password");
        }
        Err(e) => {
            tracing::error!(error = %e, "Login error");
            return failed("Login failed, please try again");
        }
    };

    let current = CurrentUser::from(&user);
    if let Err(e) = set_current_user(&session, &current).await {
        tracing::error!("Failed to set session: {}", e);
        return failed("Login failed, please try again");
    }
    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "User logged in");

    let target = if current.is_admin() { "/admin" } else { "/profile" };
    Redirect::to(target).into_response()
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(OptionalAuth(user): OptionalAuth) -> Response {
    if user.is_some() {
        return Redirect::to("/profile").into_response();
    }
    RegisterTemplate::empty().into_response()
}

/// Handle registration form submission.
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    if form.password != form.password_confirm {
        return (
            StatusCode::BAD_REQUEST,
            RegisterTemplate::with_error(&form, "Passwords do not match".to_owned()),
        )
            .into_response();
    }

    match AuthService::new(state.pool())
        .register(&form.to_registration())
        .await
    {
        Ok(_) => Redirect::to("/auth/login?success=registered").into_response(),
        Err(e) if e.is_user_facing() => {
            tracing::info!(error = %e, "Registration rejected");
            (
                StatusCode::BAD_REQUEST,
                RegisterTemplate::with_error(&form, e.to_string()),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Registration failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                RegisterTemplate::with_error(&form, "Registration failed, please try again".to_owned()),
            )
                .into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout by destroying the session.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    clear_sentry_user();
    Redirect::to("/auth/login?success=logged_out").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_messages() {
        assert!(success_message(Some("registered")).is_some());
        assert!(success_message(Some("<script>")).is_none());
        assert!(success_message(None).is_none());
    }

    #[test]
    fn test_register_form_keeps_blank_optional_fields() {
        let form = RegisterForm {
            email: "a@b.co".into(),
            password: "secret1".into(),
            password_confirm: "secret1".into(),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            street_address: String::new(),
            postal_code: String::new(),
        };
        let registration = form.to_registration();
        assert_eq!(registration.postal_code.as_deref(), Some(""));
    }
}
