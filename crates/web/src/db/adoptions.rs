//! Adoption application repository.
//!
//! Status changes of an application and of its cat are written in the same
//! transaction.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use werescuecats_core::{AdoptionId, AdoptionStatus, CatId, CatStatus, Email, UserId};

use super::{RepositoryError, map_constraint, to_count};
use crate::models::user::DEFAULT_TENANT;
use crate::models::{Adoption, AdoptionCat, AdoptionUser};

#[derive(sqlx::FromRow)]
struct AdoptionRow {
    id: AdoptionId,
    status: AdoptionStatus,
    adoption_date: DateTime<Utc>,
    approved_date: Option<DateTime<Utc>>,
    completed_date: Option<DateTime<Utc>>,
    notes: Option<String>,
    admin_notes: Option<String>,
    processed_by_admin: Option<UserId>,
    tenant_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_id: UserId,
    user_email: String,
    user_first_name: String,
    user_last_name: String,
    user_street_address: Option<String>,
    cat_id: CatId,
    cat_name: String,
    cat_age: Option<i32>,
    cat_image_url: Option<String>,
    breed_name: Option<String>,
}

impl TryFrom<AdoptionRow> for Adoption {
    type Error = RepositoryError;

    fn try_from(row: AdoptionRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.user_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            status: row.status,
            adoption_date: row.adoption_date,
            approved_date: row.approved_date,
            completed_date: row.completed_date,
            notes: row.notes,
            admin_notes: row.admin_notes,
            processed_by_admin: row.processed_by_admin,
            tenant_id: row.tenant_id,
            user: AdoptionUser {
                id: row.user_id,
                email,
                first_name: row.user_first_name,
                last_name: row.user_last_name,
                street_address: row.user_street_address,
            },
            cat: AdoptionCat {
                id: row.cat_id,
                name: row.cat_name,
                age: row.cat_age,
                breed_name: row.breed_name,
                image_url: row.cat_image_url,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_ADOPTION: &str = r"
    SELECT a.id, a.status, a.adoption_date, a.approved_date, a.completed_date,
           a.notes, a.admin_notes, a.processed_by_admin, a.tenant_id,
           a.created_at, a.updated_at,
           u.id AS user_id, u.email AS user_email, u.first_name AS user_first_name,
           u.last_name AS user_last_name, u.street_address AS user_street_address,
           c.id AS cat_id, c.name AS cat_name, c.age AS cat_age,
           c.image_url AS cat_image_url, b.name AS breed_name
    FROM adoptions a
    JOIN users u ON u.id = a.user_id
    JOIN cats c ON c.id = a.cat_id
    LEFT JOIN breeds b ON b.id = c.breed_id
";

/// A status change to apply to an application and its cat.
#[derive(Debug, Clone)]
pub struct LifecycleUpdate<'a> {
    /// Status the application must currently have.
    pub from: AdoptionStatus,
    pub to: AdoptionStatus,
    pub cat_status: CatStatus,
    pub processed_by: Option<UserId>,
    pub admin_notes: Option<&'a str>,
}

/// Repository for adoption applications.
pub struct AdoptionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdoptionRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// File a pending application and reserve the cat.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the cat is no longer available.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        cat_id: CatId,
        notes: Option<&str>,
    ) -> Result<AdoptionId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let reserved = sqlx::query(
            r"
            UPDATE cats SET status = 'PENDING', updated_at = now()
            WHERE id = $1 AND status = 'AVAILABLE'
            ",
        )
        .bind(cat_id)
        .execute(&mut *tx)
        .await?;

        if reserved.rows_affected() == 0 {
            return Err(RepositoryError::Conflict("cat is not available".to_owned()));
        }

        let id = sqlx::query_scalar::<_, AdoptionId>(
            r"
            INSERT INTO adoptions (user_id, cat_id, status, adoption_date, notes, tenant_id)
            VALUES ($1, $2, 'PENDING', now(), $3, $4)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(cat_id)
        .bind(notes)
        .bind(DEFAULT_TENANT)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_constraint(e, "unknown user or cat"))?;

        tx.commit().await?;

        Ok(id)
    }

    /// Insert an application in any status without touching the cat.
    ///
    /// Used by seeding, where cat statuses are set up front. `processed_by`
    /// is the admin credited with approving or completing it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user or cat doesn't exist.
    pub async fn insert_seeded(
        &self,
        user_id: UserId,
        cat_id: CatId,
        status: AdoptionStatus,
        notes: &str,
        processed_by: Option<UserId>,
    ) -> Result<AdoptionId, RepositoryError> {
        let id = sqlx::query_scalar::<_, AdoptionId>(
            r"
            INSERT INTO adoptions (user_id, cat_id, status, adoption_date, notes, tenant_id,
                                   processed_by_admin, approved_date, completed_date)
            VALUES ($1, $2, $3, now(), $4, $5, $6,
                    CASE WHEN $3 IN ('APPROVED', 'COMPLETED') THEN now() END,
                    CASE WHEN $3 = 'COMPLETED' THEN now() END)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(cat_id)
        .bind(status)
        .bind(notes)
        .bind(DEFAULT_TENANT)
        .bind(processed_by)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_constraint(e, "unknown user or cat"))?;

        Ok(id)
    }

    /// Get an application with its applicant and cat.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: AdoptionId) -> Result<Option<Adoption>, RepositoryError> {
        let sql = format!("{SELECT_ADOPTION} WHERE a.id = $1");
        let row = sqlx::query_as::<_, AdoptionRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        row.map(TryInto::try_into).transpose()
    }

    /// All applications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Adoption>, RepositoryError> {
        let sql = format!("{SELECT_ADOPTION} ORDER BY a.adoption_date DESC, a.id DESC");
        let rows = sqlx::query_as::<_, AdoptionRow>(&sql)
            .fetch_all(self.pool)
            .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Applications in one status, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_status(
        &self,
        status: AdoptionStatus,
    ) -> Result<Vec<Adoption>, RepositoryError> {
        let sql = format!("{SELECT_ADOPTION} WHERE a.status = $1 ORDER BY a.adoption_date, a.id");
        let rows = sqlx::query_as::<_, AdoptionRow>(&sql)
            .bind(status)
            .fetch_all(self.pool)
            .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// One user's applications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Adoption>, RepositoryError> {
        let sql = format!(
            "{SELECT_ADOPTION} WHERE a.user_id = $1 ORDER BY a.adoption_date DESC, a.id DESC"
        );
        let rows = sqlx::query_as::<_, AdoptionRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Apply a status change to an application and its cat.
    ///
    /// Approval stamps `approved_date` and completion stamps
    /// `completed_date`. Admin notes are only overwritten when given.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no application with `id` is in
    /// status `update.from`.
    pub async fn update_lifecycle(
        &self,
        id: AdoptionId,
        update: &LifecycleUpdate<'_>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let cat_id = sqlx::query_scalar::<_, CatId>(
            r"
            UPDATE adoptions SET
                status = $3,
                approved_date = CASE WHEN $3 = 'APPROVED' THEN now() ELSE approved_date END,
                completed_date = CASE WHEN $3 = 'COMPLETED' THEN now() ELSE completed_date END,
                processed_by_admin = COALESCE($4, processed_by_admin),
                admin_notes = COALESCE($5, admin_notes),
                updated_at = now()
            WHERE id = $1 AND status = $2
            RETURNING cat_id
            ",
        )
        .bind(id)
        .bind(update.from)
        .bind(update.to)
        .bind(update.processed_by)
        .bind(update.admin_notes)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        sqlx::query("UPDATE cats SET status = $2, updated_at = now() WHERE id = $1")
            .bind(cat_id)
            .bind(update.cat_status)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Completed applications, oldest first, for the anonymised export.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_completed(&self) -> Result<Vec<Adoption>, RepositoryError> {
        self.list_by_status(AdoptionStatus::Completed).await
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM adoptions")
            .fetch_one(self.pool)
            .await?;
        Ok(to_count(n))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_status(&self, status: AdoptionStatus) -> Result<u64, RepositoryError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM adoptions WHERE status = $1")
            .bind(status)
            .fetch_one(self.pool)
            .await?;
        Ok(to_count(n))
    }

    /// A user's applications in one status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_user_and_status(
        &self,
        user_id: UserId,
        status: AdoptionStatus,
    ) -> Result<u64, RepositoryError> {
        let n = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM adoptions WHERE user_id = $1 AND status = $2",
        )
        .bind(user_id)
        .bind(status)
        .fetch_one(self.pool)
        .await?;
        Ok(to_count(n))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_user(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM adoptions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;
        Ok(to_count(n))
    }
}
