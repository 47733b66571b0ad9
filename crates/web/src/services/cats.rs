//! Cat listings and intake.

use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use werescuecats_core::geo::DEFAULT_RADIUS_KM;
use werescuecats_core::pagination::{ADMIN_PAGE_SIZE, offset};
use werescuecats_core::{
    BoundingBox, BreedId, CatFilter, CatId, CatStatus, Coordinates, GeoError, Gender, Page,
};

use super::cat_api::CatApiClient;
use crate::db::{BreedRepository, CatRepository, RepositoryError};
use crate::models::{Cat, NewCat};

const MAX_NAME_LENGTH: usize = 100;

const AGE_RANGE: std::ops::RangeInclusive<i32> = 0..=25;

#[derive(Debug, Error)]
pub enum CatError {
    #[error("{0}")]
    Validation(String),

    #[error("Cat not found with id: {0}")]
    NotFound(CatId),

    /// The cat still has adoption records.
    #[error("Cat {0} has adoption history and cannot be deleted")]
    InUse(CatId),

    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Intake form for a new cat, shared by the admin page and the JSON API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatForm {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    #[serde(default)]
    pub description: String,
    pub breed_id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
}

impl CatForm {
    /// Check the fields that need no database access.
    ///
    /// # Errors
    ///
    /// Returns `CatError::Validation` or `CatError::Geo` for the first bad field.
    pub fn validate(&self) -> Result<(String, BreedId, Coordinates), CatError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CatError::Validation("Cat name is required".to_owned()));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(CatError::Validation(format!(
                "Cat name must be at most {MAX_NAME_LENGTH} characters"
            )));
        }
        if !AGE_RANGE.contains(&self.age) {
            return Err(CatError::Validation(format!(
                "Age must be between {} and {}",
                AGE_RANGE.start(),
                AGE_RANGE.end()
            )));
        }
        let breed_id = BreedId::parse(&self.breed_id)
            .map_err(|_| CatError::Validation("Breed is required".to_owned()))?;
        let location = Coordinates::new(self.latitude, self.longitude)?;

        Ok((name.to_owned(), breed_id, location))
    }
}

pub struct CatService<'a> {
    pool: &'a PgPool,
    cats: CatRepository<'a>,
}

impl<'a> CatService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            cats: CatRepository::new(pool),
        }
    }

    /// Add a cat, picking its picture from TheCatAPI.
    ///
    /// When the image lookup fails the breed's stored image is used.
    ///
    /// # Errors
    ///
    /// Returns `CatError::Validation` for invalid fields or an unknown breed.
    #[instrument(skip(self, form, cat_api), fields(name = %form.name))]
    pub async fn create(&self, form: &CatForm, cat_api: &CatApiClient) -> Result<Cat, CatError> {
        let (name, breed_id, location) = form.validate()?;

        let breeds = BreedRepository::new(self.pool);
        let breed = breeds
            .get(&breed_id)
            .await?
            .ok_or_else(|| CatError::Validation(format!("Unknown breed: {breed_id}")))?;

        let image_url = match cat_api.breed_image(&breed.id).await {
            Ok(Some(url)) => Some(url),
            Ok(None) => breed.image_url.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "Breed image lookup failed, using stored image");
                breed.image_url.clone()
            }
        };

        let new = NewCat {
            name,
            age: form.age,
            gender: form.gender,
            description: form.description.trim().to_owned(),
            breed_id,
            image_url,
            location,
            address: form.address.trim().to_owned(),
        };

        let cat = self.cats.create(&new).await?;
        tracing::info!(cat_id = %cat.id, "Cat added");
        Ok(cat)
    }

    /// Available cats within `radius_km` (default 10) of a point.
    ///
    /// # Errors
    ///
    /// Returns `CatError::Geo` for out-of-range coordinates or radius.
    pub async fn in_area(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<f64>,
    ) -> Result<Vec<Cat>, CatError> {
        let center = Coordinates::new(latitude, longitude)?;
        let area = BoundingBox::around(center, radius_km.unwrap_or(DEFAULT_RADIUS_KM))?;
        Ok(self.cats.available_in_area(&area).await?)
    }

    /// Available cats matching the browse filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CatError::Repository` if the query fails.
    pub async fn browse(&self, filter: &CatFilter) -> Result<Vec<Cat>, CatError> {
        let cats = self
            .cats
            .list_by_status(CatStatus::Available)
            .await?;
        Ok(cats
            .into_iter()
            .filter(|c| filter.matches(c.breed_name.as_deref(), c.gender, c.age))
            .collect())
    }

    /// # Errors
    ///
    /// Returns `CatError::NotFound` if the cat doesn't exist.
    pub async fn get(&self, id: CatId) -> Result<Cat, CatError> {
        self.cats.get(id).await?.ok_or(CatError::NotFound(id))
    }

    /// Available cats of one breed.
    ///
    /// # Errors
    ///
    /// Returns `CatError::Repository` if the query fails.
    pub async fn by_breed(&self, breed_id: &BreedId) -> Result<Vec<Cat>, CatError> {
        Ok(self
            .cats
            .list_by_breed_and_status(breed_id, CatStatus::Available)
            .await?)
    }

    /// # Errors
    ///
    /// Returns `CatError::Repository` if the query fails.
    pub async fn by_status(&self, status: CatStatus) -> Result<Vec<Cat>, CatError> {
        Ok(self.cats.list_by_status(status).await?)
    }

    /// One admin page of cats, optionally narrowed to a status.
    ///
    /// # Errors
    ///
    /// Returns `CatError::Repository` if the query fails.
    pub async fn page(&self, status: Option<CatStatus>, page: u32) -> Result<Page<Cat>, CatError> {
        let (items, total) = self
            .cats
            .page(status, i64::from(ADMIN_PAGE_SIZE), offset(page, ADMIN_PAGE_SIZE))
            .await?;
        Ok(Page::new(items, page, ADMIN_PAGE_SIZE, total))
    }

    /// Override a cat's status by hand.
    ///
    /// # Errors
    ///
    /// Returns `CatError::NotFound` if the cat doesn't exist.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: CatId, status: CatStatus) -> Result<Cat, CatError> {
        self.cats.update_status(id, status).await.map_err(|e| match e {
            RepositoryError::NotFound => CatError::NotFound(id),
            other => CatError::Repository(other),
        })?;
        tracing::info!(cat_id = %id, %status, "Cat status updated");
        self.get(id).await
    }

    /// # Errors
    ///
    /// Returns `CatError::NotFound` if the cat doesn't exist and
    /// `CatError::InUse` if adoptions still reference it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: CatId) -> Result<(), CatError> {
        self.cats.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => CatError::NotFound(id),
            RepositoryError::Conflict(_) => CatError::InUse(id),
            other => CatError::Repository(other),
        })?;
        tracing::info!(cat_id = %id, "Cat deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> CatForm {
        CatForm {
            name: " Whiskers ".into(),
            age: 3,
            gender: Gender::Female,
            description: "Loves laps".into(),
            breed_id: "pers".into(),
            latitude: 51.0504,
            longitude: 13.7373,
            address: "Neustadt, Dresden".into(),
        }
    }

    #[test]
    fn test_valid_form() {
        let (name, breed, location) = form().validate().unwrap();
        assert_eq!(name, "Whiskers");
        assert_eq!(breed.as_str(), "pers");
        assert!((location.latitude() - 51.0504).abs() < f64::EPSILON);
    }

    #[test]
    fn test_age_bounds() {
        let mut f = form();
        f.age = 26;
        assert!(matches!(f.validate(), Err(CatError::Validation(_))));
        f.age = 0;
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_name_required() {
        let mut f = form();
        f.name = "  ".into();
        assert_eq!(f.validate().unwrap_err().to_string(), "Cat name is required");
        f.name = "x".repeat(101);
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_bad_coordinates() {
        let mut f = form();
        f.latitude = 95.0;
        assert!(matches!(f.validate(), Err(CatError::Geo(_))));
    }

    #[test]
    fn test_form_from_json() {
        let f: CatForm = serde_json::from_str(
            r#"{"name":"Tom","age":2,"gender":"MALE","breedId":"siam","latitude":51.0,"longitude":13.7}"#,
        )
        .unwrap();
        assert_eq!(f.gender, Gender::Male);
        assert!(f.description.is_empty());
    }
}
