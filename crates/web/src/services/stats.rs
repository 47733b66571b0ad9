//! Admin dashboard figures.

use serde::Serialize;
use sqlx::PgPool;

use werescuecats_core::{AdoptionStatus, CatStatus, UserRole};

use crate::db::{AdoptionRepository, CatRepository, RepositoryError, UserRepository};

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_cats: u64,
    pub available_cats: u64,
    pub adopted_cats: u64,
    pub total_users: u64,
    pub admin_users: u64,
    pub total_adoptions: u64,
    pub pending_adoptions: u64,
    pub completed_adoptions: u64,
}

impl DashboardStats {
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any count fails.
    pub async fn load(pool: &PgPool) -> Result<Self, RepositoryError> {
        let cats = CatRepository::new(pool);
        let users = UserRepository::new(pool);
        let adoptions = AdoptionRepository::new(pool);

        Ok(Self {
            total_cats: cats.count().await?,
            available_cats: cats.count_by_status(CatStatus::Available).await?,
            adopted_cats: cats.count_by_status(CatStatus::Adopted).await?,
            total_users: users.count().await?,
            admin_users: users.count_by_role(UserRole::Admin).await?,
            total_adoptions: adoptions.count().await?,
            pending_adoptions: adoptions.count_by_status(AdoptionStatus::Pending).await?,
            completed_adoptions: adoptions.count_by_status(AdoptionStatus::Completed).await?,
        })
    }

    /// Share of cats already adopted, as a whole percentage.
    #[must_use]
    pub fn adoption_rate(&self) -> u64 {
        if self.total_cats == 0 {
            0
        } else {
            self.adopted_cats * 100 / self.total_cats
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adoption_rate() {
        let stats = DashboardStats {
            total_cats: 24,
            adopted_cats: 6,
            ..DashboardStats::default()
        };
        assert_eq!(stats.adoption_rate(), 25);
        assert_eq!(DashboardStats::default().adoption_rate(), 0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(DashboardStats::default()).unwrap_or_default();
        assert!(json.get("pendingAdoptions").is_some());
        assert!(json.get("adminUsers").is_some());
    }
}
