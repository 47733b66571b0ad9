//! Status and classification enums for cats, users and adoptions.
//!
//! Every enum serializes in `SCREAMING_SNAKE_CASE` so the JSON API and the
//! Postgres enum types share one spelling (`AVAILABLE`, `PENDING`, ...).

use serde::{Deserialize, Serialize};

/// Cat gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "gender", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// All genders, in display order.
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "MALE"),
            Self::Female => write!(f, "FEMALE"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            _ => Err(format!("invalid gender: {s}")),
        }
    }
}

/// Where a cat is in the adoption pipeline.
///
/// A cat is `Pending` from the moment an application is filed until the
/// application is completed (`Adopted`) or rejected/cancelled (`Available`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "cat_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatStatus {
    #[default]
    Available,
    Pending,
    Adopted,
}

impl CatStatus {
    /// All statuses, in pipeline order.
    pub const ALL: [Self; 3] = [Self::Available, Self::Pending, Self::Adopted];

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Available => "Available for adoption",
            Self::Pending => "Adoption pending",
            Self::Adopted => "Successfully adopted",
        }
    }
}

impl std::fmt::Display for CatStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "AVAILABLE"),
            Self::Pending => write!(f, "PENDING"),
            Self::Adopted => write!(f, "ADOPTED"),
        }
    }
}

impl std::str::FromStr for CatStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AVAILABLE" => Ok(Self::Available),
            "PENDING" => Ok(Self::Pending),
            "ADOPTED" => Ok(Self::Adopted),
            _ => Err(format!("invalid cat status: {s}")),
        }
    }
}

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Adopter. Can browse and apply.
    #[default]
    User,
    /// Back-office access to cats, users and applications.
    Admin,
}

impl UserRole {
    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::User => "Regular User",
            Self::Admin => "Administrator",
        }
    }

    /// Whether this role grants back-office access.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "USER"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Adoption application lifecycle.
///
/// ```text
/// PENDING --approve--> APPROVED --complete--> COMPLETED
///    |  \
///    |   `--reject--> REJECTED
///    `--cancel--> CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "adoption_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdoptionStatus {
    #[default]
    Pending,
    Approved,
    Completed,
    Rejected,
    Cancelled,
}

impl AdoptionStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Approved,
        Self::Completed,
        Self::Rejected,
        Self::Cancelled,
    ];

    /// Short name shown in tables and badges.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pending => "Pending Review",
            Self::Approved => "Approved",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Sentence shown to the applicant.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Pending => "Application submitted and awaiting review",
            Self::Approved => "Application approved, ready for pickup",
            Self::Completed => "Adoption completed successfully",
            Self::Rejected => "Application was rejected",
            Self::Cancelled => "Application was cancelled",
        }
    }

    /// `true` while the application still holds the cat.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Lowercase form used in CSS classes and query strings.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Approved => write!(f, "APPROVED"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for AdoptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "COMPLETED" => Ok(Self::Completed),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(format!("invalid adoption status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cat_status_default_is_available() {
        assert_eq!(CatStatus::default(), CatStatus::Available);
    }

    #[test]
    fn test_cat_status_parse_case_insensitive() {
        assert_eq!("adopted".parse::<CatStatus>().unwrap(), CatStatus::Adopted);
        assert_eq!("PENDING".parse::<CatStatus>().unwrap(), CatStatus::Pending);
        assert!("lost".parse::<CatStatus>().is_err());
    }

    #[test]
    fn test_status_serde_spelling() {
        assert_eq!(
            serde_json::to_string(&CatStatus::Available).unwrap(),
            "\"AVAILABLE\""
        );
        assert_eq!(
            serde_json::from_str::<AdoptionStatus>("\"CANCELLED\"").unwrap(),
            AdoptionStatus::Cancelled
        );
    }

    #[test]
    fn test_display_matches_serde() {
        for status in AdoptionStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn test_active_adoption_statuses() {
        assert!(AdoptionStatus::Pending.is_active());
        assert!(AdoptionStatus::Approved.is_active());
        assert!(!AdoptionStatus::Completed.is_active());
        assert!(!AdoptionStatus::Rejected.is_active());
        assert!(!AdoptionStatus::Cancelled.is_active());
    }

    #[test]
    fn test_role_names() {
        assert_eq!(UserRole::User.display_name(), "Regular User");
        assert_eq!(UserRole::Admin.display_name(), "Administrator");
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::default().is_admin());
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
    }
}
