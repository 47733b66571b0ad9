//! Anonymised adoption data for partner health institutions.
//!
//! Institutions authenticate with an API token and receive completed
//! adoptions stripped of anything that identifies the adopter. The only
//! location kept is the region, the last comma-separated part of the
//! adopter's street address.

/// Prefix of every issued token.
pub const TOKEN_PREFIX: &str = "health_";

/// Requests allowed per token per day.
pub const DEFAULT_DAILY_LIMIT: i32 = 1000;

/// Days until a token expires.
pub const TOKEN_VALIDITY_DAYS: i64 = 365;

/// Placeholder for missing region or breed.
pub const UNKNOWN: &str = "Unknown";

/// Institutions that receive a token on first start.
pub const DEFAULT_INSTITUTIONS: [&str; 2] =
    ["Default Health Institution", "Test Health Institution"];

/// Region of an address: its last non-blank comma-separated segment, trimmed.
///
/// ```
/// use werescuecats_core::region_from_address;
///
/// assert_eq!(region_from_address(Some("12 Elbe St, Neustadt, Dresden")), "Dresden");
/// assert_eq!(region_from_address(None), "Unknown");
/// ```
#[must_use]
pub fn region_from_address(address: Option<&str>) -> String {
    address
        .and_then(|a| a.rsplit(',').map(str::trim).find(|s| !s.is_empty()))
        .unwrap_or(UNKNOWN)
        .to_owned()
}

/// A fresh random token: `health_` followed by 32 hex digits.
#[must_use]
pub fn generate_token() -> String {
    format!("{TOKEN_PREFIX}{}", uuid::Uuid::new_v4().simple())
}

/// Placeholder contact address for an institution.
///
/// `"Test Health Institution"` becomes `test.health.institution@example.com`.
#[must_use]
pub fn contact_email_for(organization: &str) -> String {
    format!(
        "{}@example.com",
        organization.trim().to_lowercase().replace(' ', ".")
    )
}

#[must_use]
pub fn token_description_for(organization: &str) -> String {
    format!("API token for {}", organization.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_takes_last_segment() {
        assert_eq!(region_from_address(Some("Neustadt, Dresden")), "Dresden");
        assert_eq!(region_from_address(Some("456 Oak Avenue")), "456 Oak Avenue");
        assert_eq!(region_from_address(Some("  Leipzig  ")), "Leipzig");
    }

    #[test]
    fn test_region_ignores_trailing_comma() {
        assert_eq!(region_from_address(Some("Hauptstr. 1, Dresden,")), "Dresden");
        assert_eq!(region_from_address(Some("Street, ")), "Street");
    }

    #[test]
    fn test_region_unknown() {
        assert_eq!(region_from_address(Some("")), UNKNOWN);
        assert_eq!(region_from_address(Some(" , ,")), UNKNOWN);
        assert_eq!(region_from_address(None), UNKNOWN);
    }

    #[test]
    fn test_token_format() {
        let token = generate_token();
        assert!(token.starts_with(TOKEN_PREFIX));
        let suffix = token.trim_start_matches(TOKEN_PREFIX);
        assert_eq!(suffix.len(), 32);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(generate_token(), token);
    }

    #[test]
    fn test_contact_email() {
        assert_eq!(
            contact_email_for("Default Health Institution"),
            "default.health.institution@example.com"
        );
    }

    #[test]
    fn test_description() {
        assert_eq!(token_description_for("Vet Lab"), "API token for Vet Lab");
    }
}
