//! User domain types.

use chrono::{DateTime, Utc};

use werescuecats_core::{Email, UserId, UserRole};

/// Tenant every account belongs to until multi-tenancy is needed.
pub const DEFAULT_TENANT: &str = "main";

/// A registered adopter or admin (domain type).
///
/// The password hash is deliberately absent; it is only read by
/// [`crate::db::UserRepository::get_credentials`] during login.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub role: UserRole,
    /// Disabled accounts cannot log in.
    pub enabled: bool,
    pub tenant_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Street and postal code joined by a space, skipping missing parts.
    #[must_use]
    pub fn full_address(&self) -> String {
        [self.street_address.as_deref(), self.postal_code.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Fields required to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub role: UserRole,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(street: Option<&str>, postal: Option<&str>) -> User {
        User {
            id: UserId::new(1),
            email: Email::parse("john.doe@example.com").unwrap(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            street_address: street.map(Into::into),
            postal_code: postal.map(Into::into),
            role: UserRole::User,
            enabled: true,
            tenant_id: DEFAULT_TENANT.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(user(None, None).full_name(), "John Doe");
    }

    #[test]
    fn test_full_address() {
        assert_eq!(
            user(Some("456 Oak Avenue"), Some("54321")).full_address(),
            "456 Oak Avenue 54321"
        );
        assert_eq!(user(Some("456 Oak Avenue"), None).full_address(), "456 Oak Avenue");
        assert_eq!(user(None, Some(" ")).full_address(), "");
    }
}
