//! Authentication service.
//!
//! Password registration and login with argon2id hashes.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::instrument;

use werescuecats_core::{Email, UserId, UserRole};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::{NewUser, User};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

const NAME_LENGTH: std::ops::RangeInclusive<usize> = 2..=50;

const MAX_POSTAL_CODE_LENGTH: usize = 5;

/// Registration form, shared by the page and the JSON API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a regular user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`, `AuthError::Validation` or
    /// `AuthError::WeakPassword` if a field is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(&self, form: &Registration) -> Result<User, AuthError> {
        self.register_with_role(form, UserRole::User).await
    }

    /// Register a user with an explicit role.
    ///
    /// # Errors
    ///
    /// See [`Self::register`].
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn register_with_role(
        &self,
        form: &Registration,
        role: UserRole,
    ) -> Result<User, AuthError> {
        let new = validate_registration(form)?;
        let password_hash = hash_password(&form.password)?;

        let user = self
            .users
            .create(&NewUser {
                password_hash,
                role,
                ..new
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown, the
    /// account is disabled, or the password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_credentials(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.enabled {
            tracing::debug!(user_id = %user.id, "Login refused for disabled account");
            return Err(AuthError::InvalidCredentials);
        }

        verify_password(password, &password_hash)?;

        self.users.update_last_login(user.id).await?;

        Ok(user)
    }

    /// Change a password after checking the current one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if `current` is wrong.
    /// Returns `AuthError::WeakPassword` if `new` is too short.
    pub async fn change_password(
        &self,
        user_id: UserId,
        current: &str,
        new: &str,
    ) -> Result<(), AuthError> {
        let hash = self
            .users
            .get_password_hash(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        verify_password(current, &hash)?;
        validate_password(new)?;

        let new_hash = hash_password(new)?;
        self.users
            .update_password(user_id, &new_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::UserNotFound,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Check every registration field, returning the row to insert minus the hash.
fn validate_registration(form: &Registration) -> Result<NewUser, AuthError> {
    let email = Email::parse(&form.email)?;
    let first_name = validate_name("First name", &form.first_name)?;
    let last_name = validate_name("Last name", &form.last_name)?;

    let postal_code = non_blank(form.postal_code.as_deref());
    if let Some(code) = &postal_code
        && code.chars().count() > MAX_POSTAL_CODE_LENGTH
    {
        return Err(AuthError::Validation(format!(
            "Postal code must be at most {MAX_POSTAL_CODE_LENGTH} characters"
        )));
    }

    validate_password(&form.password)?;

    Ok(NewUser {
        email,
        password_hash: String::new(),
        first_name,
        last_name,
        street_address: non_blank(form.street_address.as_deref()),
        postal_code,
        role: UserRole::User,
    })
}

fn validate_name(field: &str, value: &str) -> Result<String, AuthError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AuthError::Validation(format!("{field} is required")));
    }
    if !NAME_LENGTH.contains(&value.chars().count()) {
        return Err(AuthError::Validation(format!(
            "{field} must be between {} and {} characters",
            NAME_LENGTH.start(),
            NAME_LENGTH.end()
        )));
    }
    Ok(value.to_owned())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> Registration {
        Registration {
            email: " Jane.Smith@Example.com ".into(),
            password: "password123".into(),
            first_name: " Jane ".into(),
            last_name: "Smith".into(),
            street_address: Some("789 Pine Street".into()),
            postal_code: Some("67890".into()),
        }
    }

    #[test]
    fn test_valid_registration() {
        let new = validate_registration(&form()).unwrap();
        assert_eq!(new.email.as_str(), "jane.smith@example.com");
        assert_eq!(new.first_name, "Jane");
        assert_eq!(new.postal_code.as_deref(), Some("67890"));
        assert_eq!(new.role, UserRole::User);
    }

    #[test]
    fn test_name_length() {
        let mut f = form();
        f.first_name = "J".into();
        let err = validate_registration(&f).unwrap_err();
        assert_eq!(
            err.to_string(),
            "First name must be between 2 and 50 characters"
        );

        f.first_name = "   ".into();
        let err = validate_registration(&f).unwrap_err();
        assert_eq!(err.to_string(), "First name is required");
    }

    #[test]
    fn test_postal_code_length() {
        let mut f = form();
        f.postal_code = Some("123456".into());
        assert!(matches!(
            validate_registration(&f),
            Err(AuthError::Validation(_))
        ));

        f.postal_code = Some("  ".into());
        assert!(validate_registration(&f).unwrap().postal_code.is_none());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("admin123").is_ok());
        assert!(validate_password("12345").is_err());
    }

    #[test]
    fn test_bad_email() {
        let mut f = form();
        f.email = "not-an-email".into();
        assert!(matches!(
            validate_registration(&f),
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_hash_roundtrip() {
        let hash = hash_password("admin123").unwrap();
        assert!(verify_password("admin123", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
