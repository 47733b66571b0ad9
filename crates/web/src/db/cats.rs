//! Cat repository.
//!
//! Every query joins `breeds` so the breed name travels with the cat.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use werescuecats_core::{BoundingBox, BreedId, CatId, CatStatus, Gender};

use super::{RepositoryError, map_constraint, to_count};
use crate::models::{Cat, NewCat};

#[derive(sqlx::FromRow)]
struct CatRow {
    id: CatId,
    name: String,
    age: Option<i32>,
    gender: Option<Gender>,
    description: Option<String>,
    breed_id: Option<BreedId>,
    breed_name: Option<String>,
    image_url: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    address: Option<String>,
    status: CatStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CatRow> for Cat {
    fn from(row: CatRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            age: row.age,
            gender: row.gender,
            description: row.description,
            breed_id: row.breed_id,
            breed_name: row.breed_name,
            image_url: row.image_url,
            latitude: row.latitude,
            longitude: row.longitude,
            address: row.address,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_CAT: &str = r"
    SELECT c.id, c.name, c.age, c.gender, c.description, c.breed_id,
           b.name AS breed_name, c.image_url, c.latitude, c.longitude,
           c.address, c.status, c.created_at, c.updated_at
    FROM cats c
    LEFT JOIN breeds b ON b.id = c.breed_id
";

/// Repository for cat database operations.
pub struct CatRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Cats with the given status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_status(&self, status: CatStatus) -> Result<Vec<Cat>, RepositoryError> {
        let sql = format!("{SELECT_CAT} WHERE c.status = $1 ORDER BY c.created_at DESC, c.id DESC");
        let rows = sqlx::query_as::<_, CatRow>(&sql)
            .bind(status)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Cat::from).collect())
    }

    /// Cats of one breed with the given status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_breed_and_status(
        &self,
        breed_id: &BreedId,
        status: CatStatus,
    ) -> Result<Vec<Cat>, RepositoryError> {
        let sql = format!(
            "{SELECT_CAT} WHERE c.breed_id = $1 AND c.status = $2 ORDER BY c.created_at DESC, c.id DESC"
        );
        let rows = sqlx::query_as::<_, CatRow>(&sql)
            .bind(breed_id)
            .bind(status)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Cat::from).collect())
    }

    /// Available cats located inside `area`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn available_in_area(&self, area: &BoundingBox) -> Result<Vec<Cat>, RepositoryError> {
        let sql = format!(
            "{SELECT_CAT}
             WHERE c.status = 'AVAILABLE'
               AND c.latitude BETWEEN $1 AND $2
               AND c.longitude BETWEEN $3 AND $4
             ORDER BY c.id"
        );
        let rows = sqlx::query_as::<_, CatRow>(&sql)
            .bind(area.min_lat)
            .bind(area.max_lat)
            .bind(area.min_lon)
            .bind(area.max_lon)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Cat::from).collect())
    }

    /// One page of all cats, optionally restricted to a status.
    ///
    /// Returns the page and the total matching count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn page(
        &self,
        status: Option<CatStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Cat>, u64), RepositoryError> {
        let sql = format!(
            "{SELECT_CAT}
             WHERE ($1::cat_status IS NULL OR c.status = $1)
             ORDER BY c.id DESC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, CatRow>(&sql)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM cats WHERE ($1::cat_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(self.pool)
        .await?;

        Ok((rows.into_iter().map(Cat::from).collect(), to_count(total)))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CatId) -> Result<Option<Cat>, RepositoryError> {
        let sql = format!("{SELECT_CAT} WHERE c.id = $1");
        let row = sqlx::query_as::<_, CatRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Cat::from))
    }

    /// Insert a cat as available.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the breed doesn't exist.
    pub async fn create(&self, new: &NewCat) -> Result<Cat, RepositoryError> {
        let id = sqlx::query_scalar::<_, CatId>(
            r"
            INSERT INTO cats (name, age, gender, description, breed_id, image_url,
                              latitude, longitude, address, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'AVAILABLE')
            RETURNING id
            ",
        )
        .bind(&new.name)
        .bind(new.age)
        .bind(new.gender)
        .bind(&new.description)
        .bind(&new.breed_id)
        .bind(&new.image_url)
        .bind(new.location.latitude())
        .bind(new.location.longitude())
        .bind(&new.address)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_constraint(e, "unknown breed"))?;

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Insert a cat with an explicit status, used by seeding.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the breed doesn't exist.
    pub async fn create_with_status(
        &self,
        new: &NewCat,
        status: CatStatus,
    ) -> Result<CatId, RepositoryError> {
        let id = sqlx::query_scalar::<_, CatId>(
            r"
            INSERT INTO cats (name, age, gender, description, breed_id, image_url,
                              latitude, longitude, address, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            ",
        )
        .bind(&new.name)
        .bind(new.age)
        .bind(new.gender)
        .bind(&new.description)
        .bind(&new.breed_id)
        .bind(&new.image_url)
        .bind(new.location.latitude())
        .bind(new.location.longitude())
        .bind(&new.address)
        .bind(status)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_constraint(e, "unknown breed"))?;

        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cat doesn't exist.
    pub async fn update_status(&self, id: CatId, status: CatStatus) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE cats SET status = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete a cat.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` while applications reference the cat.
    /// Returns `RepositoryError::NotFound` if the cat doesn't exist.
    pub async fn delete(&self, id: CatId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cats WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| map_constraint(e, "cat has adoption applications"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_status(&self, status: CatStatus) -> Result<u64, RepositoryError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cats WHERE status = $1")
            .bind(status)
            .fetch_one(self.pool)
            .await?;
        Ok(to_count(n))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cats")
            .fetch_one(self.pool)
            .await?;
        Ok(to_count(n))
    }
}
