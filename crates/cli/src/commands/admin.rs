//! Admin user management commands.

use thiserror::Error;

use werescuecats_core::UserRole;
use werescuecats_web::services::auth::{AuthError, AuthService, Registration};

use super::{ConnectError, connect};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Admin user already exists with email: {0}")]
    UserExists(String),

    #[error(transparent)]
    Auth(AuthError),
}

/// Create a new admin user.
///
/// Goes through the same validation and hashing as registration.
pub async fn create_user(
    email: &str,
    first_name: &str,
    last_name: &str,
    password: &str,
) -> Result<(), AdminError> {
    let pool = connect().await?;

    let registration = Registration {
        email: email.to_owned(),
        password: password.to_owned(),
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        street_address: None,
        postal_code: None,
    };

    let user = AuthService::new(&pool)
        .register_with_role(&registration, UserRole::Admin)
        .await
        .map_err(|e| match e {
            AuthError::UserAlreadyExists => AdminError::UserExists(email.to_owned()),
            other => AdminError::Auth(other),
        })?;

    tracing::info!("Admin user created successfully!");
    tracing::info!("  ID: {}", user.id);
    tracing::info!("  Email: {}", user.email);
    tracing::info!("  Name: {}", user.full_name());
    Ok(())
}
