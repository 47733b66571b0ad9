//! Adoption application domain types.

use chrono::{DateTime, Utc};

use werescuecats_core::{AdoptionId, AdoptionStatus, CatId, Email, UserId};

/// The applicant, as shown alongside an application.
#[derive(Debug, Clone)]
pub struct AdoptionUser {
    pub id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    /// Used only to derive the region for anonymised exports.
    pub street_address: Option<String>,
}

impl AdoptionUser {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The cat applied for.
#[derive(Debug, Clone)]
pub struct AdoptionCat {
    pub id: CatId,
    pub name: String,
    pub age: Option<i32>,
    pub breed_name: Option<String>,
    pub image_url: Option<String>,
}

/// An adoption application with its applicant and cat.
#[derive(Debug, Clone)]
pub struct Adoption {
    pub id: AdoptionId,
    pub status: AdoptionStatus,
    /// When the application was filed.
    pub adoption_date: DateTime<Utc>,
    pub approved_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    /// Applicant's notes.
    pub notes: Option<String>,
    /// Admin's notes, e.g. the rejection reason.
    pub admin_notes: Option<String>,
    /// Admin who last moved the application along.
    pub processed_by_admin: Option<UserId>,
    pub tenant_id: String,
    pub user: AdoptionUser,
    pub cat: AdoptionCat,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Adoption {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == AdoptionStatus::Pending
    }

    /// Whole days between filing and `now`.
    #[must_use]
    pub fn days_from_application(&self, now: DateTime<Utc>) -> i64 {
        (now - self.adoption_date).num_days()
    }
}
