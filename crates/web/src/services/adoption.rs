//! Adoption application lifecycle.
//!
//! ```text
//! PENDING ──approve──▶ APPROVED ──complete──▶ COMPLETED
//!    │
//!    ├──reject──▶ REJECTED
//!    └──cancel──▶ CANCELLED
//! ```
//!
//! Every transition also moves the cat: approval keeps it reserved,
//! completion marks it adopted, rejection and cancellation release it.

use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use werescuecats_core::{AdoptionId, AdoptionStatus, CatId, CatStatus, UserId};

use crate::db::adoptions::LifecycleUpdate;
use crate::db::{AdoptionRepository, CatRepository, RepositoryError, UserRepository};
use crate::models::{Adoption, CurrentUser};

/// Errors from adoption operations.
#[derive(Debug, Error)]
pub enum AdoptionError {
    #[error("{0}")]
    NotFound(String),

    #[error("Cat is not available for adoption: {0}")]
    CatNotAvailable(String),

    #[error("Adoption must be {expected} to be transitioned to {target}")]
    InvalidTransition {
        expected: AdoptionStatus,
        target: AdoptionStatus,
    },

    /// The application belongs to someone else.
    #[error("You can only manage your own applications")]
    NotOwner,

    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// A lifecycle action on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Approve,
    Complete,
    Reject,
    Cancel,
}

impl Transition {
    /// Status the application must be in.
    #[must_use]
    pub const fn source(self) -> AdoptionStatus {
        match self {
            Self::Complete => AdoptionStatus::Approved,
            Self::Approve | Self::Reject | Self::Cancel => AdoptionStatus::Pending,
        }
    }

    #[must_use]
    pub const fn target(self) -> AdoptionStatus {
        match self {
            Self::Approve => AdoptionStatus::Approved,
            Self::Complete => AdoptionStatus::Completed,
            Self::Reject => AdoptionStatus::Rejected,
            Self::Cancel => AdoptionStatus::Cancelled,
        }
    }

    /// Status the cat ends up in.
    #[must_use]
    pub const fn cat_status(self) -> CatStatus {
        match self {
            Self::Approve => CatStatus::Pending,
            Self::Complete => CatStatus::Adopted,
            Self::Reject | Self::Cancel => CatStatus::Available,
        }
    }

    /// Check that an application in `current` may take this transition.
    ///
    /// # Errors
    ///
    /// Returns `AdoptionError::InvalidTransition` otherwise.
    pub fn check(self, current: AdoptionStatus) -> Result<(), AdoptionError> {
        if current == self.source() {
            Ok(())
        } else {
            Err(AdoptionError::InvalidTransition {
                expected: self.source(),
                target: self.target(),
            })
        }
    }
}

/// Per-user application counts.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAdoptionStats {
    pub user_id: UserId,
    pub total_applications: u64,
    pub completed_adoptions: u64,
    pub pending_applications: u64,
}

/// Build the applicant's notes from the adoption form.
///
/// # Errors
///
/// Returns `AdoptionError::Validation` if either answer is blank.
pub fn format_notes(experience: &str, reason: &str) -> Result<String, AdoptionError> {
    let experience = experience.trim();
    let reason = reason.trim();
    if experience.is_empty() {
        return Err(AdoptionError::Validation(
            "Experience with cats is required".to_owned(),
        ));
    }
    if reason.is_empty() {
        return Err(AdoptionError::Validation(
            "Reason for adoption is required".to_owned(),
        ));
    }
    Ok(format!(
        "Experience with Cats: {experience} \nReason for Adoption: {reason}"
    ))
}

/// Adoption service.
pub struct AdoptionService<'a> {
    adoptions: AdoptionRepository<'a>,
    cats: CatRepository<'a>,
    users: UserRepository<'a>,
}

impl<'a> AdoptionService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            adoptions: AdoptionRepository::new(pool),
            cats: CatRepository::new(pool),
            users: UserRepository::new(pool),
        }
    }

    /// File an application and reserve the cat.
    ///
    /// # Errors
    ///
    /// Returns `AdoptionError::NotFound` if the user or cat doesn't exist.
    /// Returns `AdoptionError::CatNotAvailable` if the cat isn't available.
    #[instrument(skip(self, notes))]
    pub async fn create(
        &self,
        user_id: UserId,
        cat_id: CatId,
        notes: Option<&str>,
    ) -> Result<Adoption, AdoptionError> {
        let user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AdoptionError::NotFound(format!("User not found with id: {user_id}")))?;
        let cat = self
            .cats
            .get(cat_id)
            .await?
            .ok_or_else(|| AdoptionError::NotFound(format!("Cat not found with id: {cat_id}")))?;

        if !cat.is_available() {
            return Err(AdoptionError::CatNotAvailable(cat.name));
        }

        let id = self
            .adoptions
            .create(user.id, cat.id, notes)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AdoptionError::CatNotAvailable(cat.name.clone()),
                other => AdoptionError::Repository(other),
            })?;

        tracing::info!(adoption_id = %id, cat = %cat.name, "Adoption application filed");
        self.get(id).await
    }

    /// # Errors
    ///
    /// Returns `AdoptionError::NotFound` if the application doesn't exist.
    pub async fn get(&self, id: AdoptionId) -> Result<Adoption, AdoptionError> {
        self.adoptions
            .get(id)
            .await?
            .ok_or_else(|| AdoptionError::NotFound(format!("Adoption not found with id: {id}")))
    }

    /// # Errors
    ///
    /// Returns `AdoptionError::InvalidTransition` unless the application is pending.
    pub async fn approve(
        &self,
        id: AdoptionId,
        admin: &CurrentUser,
    ) -> Result<Adoption, AdoptionError> {
        self.transition(id, Transition::Approve, Some(admin.id), None)
            .await
    }

    /// # Errors
    ///
    /// Returns `AdoptionError::InvalidTransition` unless the application is approved.
    pub async fn complete(
        &self,
        id: AdoptionId,
        admin: &CurrentUser,
    ) -> Result<Adoption, AdoptionError> {
        self.transition(id, Transition::Complete, Some(admin.id), None)
            .await
    }

    /// Reject with a reason recorded as admin notes.
    ///
    /// # Errors
    ///
    /// Returns `AdoptionError::Validation` if the reason is blank.
    /// Returns `AdoptionError::InvalidTransition` unless the application is pending.
    pub async fn reject(
        &self,
        id: AdoptionId,
        admin: &CurrentUser,
        reason: &str,
    ) -> Result<Adoption, AdoptionError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AdoptionError::Validation(
                "Rejection reason is required".to_owned(),
            ));
        }
        self.transition(id, Transition::Reject, Some(admin.id), Some(reason))
            .await
    }

    /// Withdraw one's own pending application.
    ///
    /// # Errors
    ///
    /// Returns `AdoptionError::NotOwner` if `user` didn't file it.
    /// Returns `AdoptionError::InvalidTransition` unless it is pending.
    pub async fn cancel(
        &self,
        id: AdoptionId,
        user: &CurrentUser,
    ) -> Result<Adoption, AdoptionError> {
        let adoption = self.get(id).await?;
        if adoption.user.id != user.id {
            return Err(AdoptionError::NotOwner);
        }
        self.transition(id, Transition::Cancel, None, None).await
    }

    #[instrument(skip(self, admin_notes))]
    async fn transition(
        &self,
        id: AdoptionId,
        transition: Transition,
        processed_by: Option<UserId>,
        admin_notes: Option<&str>,
    ) -> Result<Adoption, AdoptionError> {
        let adoption = self.get(id).await?;
        transition.check(adoption.status)?;

        let update = LifecycleUpdate {
            from: transition.source(),
            to: transition.target(),
            cat_status: transition.cat_status(),
            processed_by,
            admin_notes,
        };

        self.adoptions
            .update_lifecycle(id, &update)
            .await
            .map_err(|e| match e {
                // Someone else moved it between the read and the write.
                RepositoryError::NotFound => AdoptionError::InvalidTransition {
                    expected: transition.source(),
                    target: transition.target(),
                },
                other => AdoptionError::Repository(other),
            })?;

        tracing::info!(
            adoption_id = %id,
            status = %transition.target(),
            processed_by = ?processed_by,
            "Adoption status changed"
        );
        self.get(id).await
    }

    /// # Errors
    ///
    /// Returns `AdoptionError::Repository` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Adoption>, AdoptionError> {
        Ok(self.adoptions.list_all().await?)
    }

    /// # Errors
    ///
    /// Returns `AdoptionError::Repository` if the query fails.
    pub async fn list_pending(&self) -> Result<Vec<Adoption>, AdoptionError> {
        Ok(self
            .adoptions
            .list_by_status(AdoptionStatus::Pending)
            .await?)
    }

    /// # Errors
    ///
    /// Returns `AdoptionError::Repository` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Adoption>, AdoptionError> {
        Ok(self.adoptions.list_by_user(user_id).await?)
    }

    /// # Errors
    ///
    /// Returns `AdoptionError::Repository` if a query fails.
    pub async fn user_stats(&self, user_id: UserId) -> Result<UserAdoptionStats, AdoptionError> {
        Ok(UserAdoptionStats {
            user_id,
            total_applications: self.adoptions.count_by_user(user_id).await?,
            completed_adoptions: self
                .adoptions
                .count_by_user_and_status(user_id, AdoptionStatus::Completed)
                .await?,
            pending_applications: self
                .adoptions
                .count_by_user_and_status(user_id, AdoptionStatus::Pending)
                .await?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_sources() {
        assert!(Transition::Approve.check(AdoptionStatus::Pending).is_ok());
        assert!(Transition::Complete.check(AdoptionStatus::Approved).is_ok());
        assert!(Transition::Reject.check(AdoptionStatus::Pending).is_ok());
        assert!(Transition::Cancel.check(AdoptionStatus::Pending).is_ok());

        assert!(Transition::Complete.check(AdoptionStatus::Pending).is_err());
        assert!(Transition::Reject.check(AdoptionStatus::Approved).is_err());
        assert!(Transition::Cancel.check(AdoptionStatus::Completed).is_err());
    }

    #[test]
    fn test_transition_message() {
        let err = Transition::Approve
            .check(AdoptionStatus::Completed)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Adoption must be PENDING to be transitioned to APPROVED"
        );
    }

    #[test]
    fn test_cat_follows_application() {
        assert_eq!(Transition::Approve.cat_status(), CatStatus::Pending);
        assert_eq!(Transition::Complete.cat_status(), CatStatus::Adopted);
        assert_eq!(Transition::Reject.cat_status(), CatStatus::Available);
        assert_eq!(Transition::Cancel.cat_status(), CatStatus::Available);
    }

    #[test]
    fn test_terminal_states_are_final() {
        let all = [
            Transition::Approve,
            Transition::Complete,
            Transition::Reject,
            Transition::Cancel,
        ];
        for status in [
            AdoptionStatus::Completed,
            AdoptionStatus::Rejected,
            AdoptionStatus::Cancelled,
        ] {
            assert!(all.iter().all(|t| t.check(status).is_err()));
        }
    }

    #[test]
    fn test_format_notes() {
        assert_eq!(
            format_notes(" Two cats before ", "Quiet home").unwrap(),
            "Experience with Cats: Two cats before \nReason for Adoption: Quiet home"
        );
        assert!(format_notes("", "Quiet home").is_err());
        assert!(format_notes("Some", "  ").is_err());
    }

    #[test]
    fn test_not_available_message() {
        let err = AdoptionError::CatNotAvailable("Fluffy".into());
        assert_eq!(err.to_string(), "Cat is not available for adoption: Fluffy");
    }
}
