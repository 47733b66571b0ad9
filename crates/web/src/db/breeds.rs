//! Breed repository.

use sqlx::PgPool;

use werescuecats_core::{BreedId, BreedTraits, TraitRating};

use super::{RepositoryError, to_count};
use crate::models::Breed;

#[derive(sqlx::FromRow)]
struct BreedRow {
    id: BreedId,
    name: String,
    description: Option<String>,
    origin: Option<String>,
    wikipedia_url: Option<String>,
    reference_image_id: Option<String>,
    image_url: Option<String>,
    adaptability: i16,
    affection_level: i16,
    child_friendly: i16,
    dog_friendly: i16,
    energy_level: i16,
    grooming: i16,
    health_issues: i16,
    intelligence: i16,
    social_needs: i16,
    stranger_friendly: i16,
}

impl From<BreedRow> for Breed {
    fn from(row: BreedRow) -> Self {
        let rating = |v: i16| TraitRating::new(i32::from(v));
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            origin: row.origin,
            wikipedia_url: row.wikipedia_url,
            reference_image_id: row.reference_image_id,
            image_url: row.image_url,
            traits: BreedTraits {
                adaptability: rating(row.adaptability),
                affection_level: rating(row.affection_level),
                child_friendly: rating(row.child_friendly),
                dog_friendly: rating(row.dog_friendly),
                energy_level: rating(row.energy_level),
                grooming: rating(row.grooming),
                health_issues: rating(row.health_issues),
                intelligence: rating(row.intelligence),
                social_needs: rating(row.social_needs),
                stranger_friendly: rating(row.stranger_friendly),
            },
        }
    }
}

fn db_rating(r: TraitRating) -> i16 {
    i16::from(r.get())
}

/// Repository for breed reference data.
pub struct BreedRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BreedRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All breeds ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Breed>, RepositoryError> {
        let rows = sqlx::query_as::<_, BreedRow>(
            r"
            SELECT id, name, description, origin, wikipedia_url, reference_image_id, image_url,
                   adaptability, affection_level, child_friendly, dog_friendly, energy_level,
                   grooming, health_issues, intelligence, social_needs, stranger_friendly
            FROM breeds
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Breed::from).collect())
    }

    /// A page of breeds ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<Breed>, RepositoryError> {
        let rows = sqlx::query_as::<_, BreedRow>(
            r"
            SELECT id, name, description, origin, wikipedia_url, reference_image_id, image_url,
                   adaptability, affection_level, child_friendly, dog_friendly, energy_level,
                   grooming, health_issues, intelligence, social_needs, stranger_friendly
            FROM breeds
            ORDER BY name
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Breed::from).collect())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &BreedId) -> Result<Option<Breed>, RepositoryError> {
        let row = sqlx::query_as::<_, BreedRow>(
            r"
            SELECT id, name, description, origin, wikipedia_url, reference_image_id, image_url,
                   adaptability, affection_level, child_friendly, dog_friendly, energy_level,
                   grooming, health_issues, intelligence, social_needs, stranger_friendly
            FROM breeds
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Breed::from))
    }

    /// Insert or refresh a breed from the catalogue.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(&self, breed: &Breed) -> Result<(), RepositoryError> {
        let t = &breed.traits;
        sqlx::query(
            r"
            INSERT INTO breeds (id, name, description, origin, wikipedia_url, reference_image_id,
                                image_url, adaptability, affection_level, child_friendly,
                                dog_friendly, energy_level, grooming, health_issues,
                                intelligence, social_needs, stranger_friendly)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                origin = EXCLUDED.origin,
                wikipedia_url = EXCLUDED.wikipedia_url,
                reference_image_id = EXCLUDED.reference_image_id,
                image_url = COALESCE(EXCLUDED.image_url, breeds.image_url),
                adaptability = EXCLUDED.adaptability,
                affection_level = EXCLUDED.affection_level,
                child_friendly = EXCLUDED.child_friendly,
                dog_friendly = EXCLUDED.dog_friendly,
                energy_level = EXCLUDED.energy_level,
                grooming = EXCLUDED.grooming,
                health_issues = EXCLUDED.health_issues,
                intelligence = EXCLUDED.intelligence,
                social_needs = EXCLUDED.social_needs,
                stranger_friendly = EXCLUDED.stranger_friendly,
                updated_at = now()
            ",
        )
        .bind(&breed.id)
        .bind(&breed.name)
        .bind(&breed.description)
        .bind(&breed.origin)
        .bind(&breed.wikipedia_url)
        .bind(&breed.reference_image_id)
        .bind(&breed.image_url)
        .bind(db_rating(t.adaptability))
        .bind(db_rating(t.affection_level))
        .bind(db_rating(t.child_friendly))
        .bind(db_rating(t.dog_friendly))
        .bind(db_rating(t.energy_level))
        .bind(db_rating(t.grooming))
        .bind(db_rating(t.health_issues))
        .bind(db_rating(t.intelligence))
        .bind(db_rating(t.social_needs))
        .bind(db_rating(t.stranger_friendly))
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Distinct breed names of available cats, for filter dropdowns.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn names_with_available_cats(&self) -> Result<Vec<String>, RepositoryError> {
        let names = sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT b.name
            FROM breeds b
            JOIN cats c ON c.breed_id = b.id
            WHERE c.status = 'AVAILABLE'
            ORDER BY b.name
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(names)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM breeds")
            .fetch_one(self.pool)
            .await?;
        Ok(to_count(n))
    }
}
