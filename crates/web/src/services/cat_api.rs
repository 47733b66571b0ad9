//! TheCatAPI client.
//!
//! Fetches the breed catalogue and breed reference images. Image lookups
//! are cached with `moka` for an hour.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use werescuecats_core::{BreedId, BreedTraits, TraitRating};

use crate::config::CatApiConfig;
use crate::models::Breed;

const CLIENT_USER_AGENT: &str = "WeRescueCats/1.0";

const IMAGE_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Errors talking to TheCatAPI.
#[derive(Debug, Error)]
pub enum CatApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// A breed as TheCatAPI returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct BreedDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub origin: Option<String>,
    pub adaptability: Option<i32>,
    pub affection_level: Option<i32>,
    pub child_friendly: Option<i32>,
    pub dog_friendly: Option<i32>,
    pub energy_level: Option<i32>,
    pub grooming: Option<i32>,
    pub health_issues: Option<i32>,
    pub intelligence: Option<i32>,
    pub social_needs: Option<i32>,
    pub stranger_friendly: Option<i32>,
    pub wikipedia_url: Option<String>,
    pub reference_image_id: Option<String>,
    pub image: Option<ImageDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageDto {
    pub id: Option<String>,
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl TryFrom<BreedDto> for Breed {
    type Error = CatApiError;

    fn try_from(dto: BreedDto) -> Result<Self, Self::Error> {
        let id = BreedId::parse(&dto.id)
            .map_err(|e| CatApiError::Parse(format!("breed id {:?}: {e}", dto.id)))?;
        let rating = TraitRating::from_upstream;

        Ok(Self {
            id,
            name: dto.name,
            description: dto.description,
            origin: dto.origin,
            wikipedia_url: dto.wikipedia_url,
            reference_image_id: dto.reference_image_id,
            image_url: dto.image.and_then(|i| i.url),
            traits: BreedTraits {
                adaptability: rating(dto.adaptability),
                affection_level: rating(dto.affection_level),
                child_friendly: rating(dto.child_friendly),
                dog_friendly: rating(dto.dog_friendly),
                energy_level: rating(dto.energy_level),
                grooming: rating(dto.grooming),
                health_issues: rating(dto.health_issues),
                intelligence: rating(dto.intelligence),
                social_needs: rating(dto.social_needs),
                stranger_friendly: rating(dto.stranger_friendly),
            },
        })
    }
}

/// Client for TheCatAPI.
#[derive(Clone)]
pub struct CatApiClient {
    inner: Arc<CatApiClientInner>,
}

struct CatApiClientInner {
    client: reqwest::Client,
    base_url: String,
    images: Cache<BreedId, Option<String>>,
}

impl CatApiClient {
    /// # Errors
    ///
    /// Returns `CatApiError::Parse` if the API key isn't a valid header
    /// value, or `CatApiError::Http` if the client fails to build.
    pub fn new(config: &CatApiConfig) -> Result<Self, CatApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        if let Some(key) = &config.api_key {
            let mut value = HeaderValue::from_str(key.expose_secret())
                .map_err(|e| CatApiError::Parse(format!("Invalid API key format: {e}")))?;
            value.set_sensitive(true);
            headers.insert("x-api-key", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(15))
            .build()?;

        let images = Cache::builder()
            .max_capacity(500)
            .time_to_live(IMAGE_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(CatApiClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                images,
            }),
        })
    }

    /// The full breed catalogue.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body can't be parsed.
    #[instrument(skip(self))]
    pub async fn fetch_breeds(&self) -> Result<Vec<BreedDto>, CatApiError> {
        let url = format!("{}/breeds", self.inner.base_url);
        let breeds: Vec<BreedDto> = self.get_json(&url).await?;
        debug!(count = breeds.len(), "Fetched breeds");
        Ok(breeds)
    }

    /// URL of a reference image for a breed, if TheCatAPI has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails. Failures are not cached.
    #[instrument(skip(self), fields(breed = %breed_id))]
    pub async fn breed_image(&self, breed_id: &BreedId) -> Result<Option<String>, CatApiError> {
        if let Some(cached) = self.inner.images.get(breed_id).await {
            debug!("Cache hit for breed image");
            return Ok(cached);
        }

        let url = format!(
            "{}/images/search?limit=1&breed_ids={}",
            self.inner.base_url,
            urlencoding::encode(breed_id.as_str())
        );
        let images: Vec<ImageDto> = self.get_json(&url).await?;
        let image_url = images.into_iter().next().and_then(|i| i.url);

        if image_url.is_none() {
            tracing::warn!("No images found for breed");
        }

        self.inner
            .images
            .insert(breed_id.clone(), image_url.clone())
            .await;

        Ok(image_url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, CatApiError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatApiError::Parse(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PERSIAN: &str = r#"{
        "id": "pers",
        "name": "Persian",
        "origin": "Iran (Persia)",
        "description": "Calm and sweet.",
        "adaptability": 5,
        "affection_level": 5,
        "child_friendly": 2,
        "dog_friendly": 2,
        "energy_level": 1,
        "grooming": 5,
        "health_issues": 3,
        "intelligence": 3,
        "social_needs": 4,
        "stranger_friendly": 2,
        "wikipedia_url": "https://en.wikipedia.org/wiki/Persian_(cat)",
        "reference_image_id": "-Zfz5z2jK",
        "image": {"id": "-Zfz5z2jK", "url": "https://cdn2.thecatapi.com/images/-Zfz5z2jK.jpg", "width": 1000, "height": 667}
    }"#;

    #[test]
    fn test_breed_from_upstream() {
        let dto: BreedDto = serde_json::from_str(PERSIAN).unwrap();
        let breed = Breed::try_from(dto).unwrap();
        assert_eq!(breed.id.as_str(), "pers");
        assert_eq!(breed.traits.grooming.get(), 5);
        assert_eq!(breed.traits.energy_level.get(), 1);
        assert_eq!(
            breed.image_url.as_deref(),
            Some("https://cdn2.thecatapi.com/images/-Zfz5z2jK.jpg")
        );
    }

    #[test]
    fn test_missing_traits_default_to_neutral() {
        let dto: BreedDto =
            serde_json::from_str(r#"{"id": "xxxx", "name": "Mystery"}"#).unwrap();
        let breed = Breed::try_from(dto).unwrap();
        assert_eq!(breed.traits.intelligence.get(), 3);
        assert!(breed.image_url.is_none());
    }

    #[test]
    fn test_rejects_bad_id() {
        let dto: BreedDto =
            serde_json::from_str(r#"{"id": "much-too-long-id", "name": "X"}"#).unwrap();
        assert!(matches!(Breed::try_from(dto), Err(CatApiError::Parse(_))));
    }

    #[test]
    fn test_client_builds_without_key() {
        assert!(CatApiClient::new(&CatApiConfig::default()).is_ok());
    }
}
