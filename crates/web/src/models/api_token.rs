//! Health institution API tokens.

use chrono::{DateTime, Utc};

use werescuecats_core::ApiTokenId;

/// An API token issued to a health institution.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub id: ApiTokenId,
    pub token: String,
    pub organization_name: String,
    pub contact_email: Option<String>,
    pub daily_request_limit: i32,
    /// Requests made on the day of `last_used_at`.
    pub request_count: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub active: bool,
}

impl ApiToken {
    /// Active and not yet expired.
    #[must_use]
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.active && now < self.expires_at
    }

    /// Requests counted against today's limit.
    ///
    /// The counter belongs to the UTC day of the last use, so it reads as
    /// zero once that day has passed.
    #[must_use]
    pub fn requests_today(&self, now: DateTime<Utc>) -> i32 {
        match self.last_used_at {
            Some(last) if last.date_naive() == now.date_naive() => self.request_count,
            _ => 0,
        }
    }

    #[must_use]
    pub fn has_requests_remaining(&self, now: DateTime<Utc>) -> bool {
        self.requests_today(now) < self.daily_request_limit
    }

    /// Token with all but the prefix and last four characters masked.
    #[must_use]
    pub fn masked(&self) -> String {
        let visible: String = self
            .token
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("{}…{visible}", werescuecats_core::health::TOKEN_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn token(now: DateTime<Utc>) -> ApiToken {
        ApiToken {
            id: ApiTokenId::new(1),
            token: "health_0123456789abcdef0123456789abcdef".into(),
            organization_name: "Test Health Institution".into(),
            contact_email: None,
            daily_request_limit: 2,
            request_count: 0,
            description: None,
            created_at: now,
            expires_at: now + Duration::days(365),
            last_used_at: None,
            active: true,
        }
    }

    #[test]
    fn test_validity() {
        let now = Utc::now();
        let mut t = token(now);
        assert!(t.is_valid(now));

        t.active = false;
        assert!(!t.is_valid(now));

        t.active = true;
        t.expires_at = now - Duration::seconds(1);
        assert!(!t.is_valid(now));
    }

    #[test]
    fn test_daily_limit() {
        let now = Utc::now();
        let mut t = token(now);
        t.request_count = 2;
        t.last_used_at = Some(now);
        assert!(!t.has_requests_remaining(now));

        // Yesterday's usage does not count today.
        t.last_used_at = Some(now - Duration::days(1));
        assert_eq!(t.requests_today(now), 0);
        assert!(t.has_requests_remaining(now));
    }

    #[test]
    fn test_masked() {
        let t = token(Utc::now());
        assert_eq!(t.masked(), "health_…cdef");
    }
}
