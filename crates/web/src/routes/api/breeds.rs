//! `/api/breeds` handlers.
//!
//! Breeds keep TheCatAPI's `snake_case` field names.

use axum::{
    Json,
    extract::State,
};
use serde::Serialize;

use werescuecats_core::pagination::{BREED_PAGE_SIZE, offset, page_number};
use werescuecats_core::{BreedId, BreedSearch, Page};

use super::cats::PageQuery;
use crate::db::BreedRepository;
use crate::error::{ApiResult, AppError};
use crate::models::Breed;
use crate::routes::api::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct BreedDto {
    pub id: BreedId,
    pub name: String,
    pub description: Option<String>,
    pub origin: Option<String>,
    pub adaptability: u8,
    pub affection_level: u8,
    pub child_friendly: u8,
    pub dog_friendly: u8,
    pub energy_level: u8,
    pub grooming: u8,
    pub health_issues: u8,
    pub intelligence: u8,
    pub social_needs: u8,
    pub stranger_friendly: u8,
    pub wikipedia_url: Option<String>,
    pub reference_image_id: Option<String>,
    pub image_url: Option<String>,
}

impl From<Breed> for BreedDto {
    fn from(breed: Breed) -> Self {
        let t = breed.traits;
        Self {
            id: breed.id,
            name: breed.name,
            description: breed.description,
            origin: breed.origin,
            adaptability: t.adaptability.get(),
            affection_level: t.affection_level.get(),
            child_friendly: t.child_friendly.get(),
            dog_friendly: t.dog_friendly.get(),
            energy_level: t.energy_level.get(),
            grooming: t.grooming.get(),
            health_issues: t.health_issues.get(),
            intelligence: t.intelligence.get(),
            social_needs: t.social_needs.get(),
            stranger_friendly: t.stranger_friendly.get(),
            wikipedia_url: breed.wikipedia_url,
            reference_image_id: breed.reference_image_id,
            image_url: breed.image_url,
        }
    }
}

/// `GET /api/breeds?page=`
pub async fn index(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<Json<Page<BreedDto>>> {
    let repo = BreedRepository::new(state.pool());
    let page = page_number(query.page);
    let items = repo
        .list_page(i64::from(BREED_PAGE_SIZE), offset(page, BREED_PAGE_SIZE))
        .await?;
    let total = repo.count().await?;

    Ok(Json(
        Page::new(items, page, BREED_PAGE_SIZE, total).map(BreedDto::from),
    ))
}

/// `GET /api/breeds/{id}`
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<BreedDto>> {
    let not_found = || AppError::NotFound(format!("Breed not found with id: {id}"));
    let breed_id = BreedId::parse(&id).map_err(|_| not_found())?;
    let breed = BreedRepository::new(state.pool())
        .get(&breed_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(breed.into()))
}

/// `GET /api/breeds/search?name=&childFriendly=&dogFriendly=&energyLevel=&origin=`
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(search): ApiQuery<BreedSearch>,
) -> ApiResult<Json<Vec<BreedDto>>> {
    let breeds = BreedRepository::new(state.pool()).list_all().await?;
    Ok(Json(
        breeds
            .into_iter()
            .filter(|b| search.matches(&b.name, b.origin.as_deref(), &b.traits))
            .map(BreedDto::from)
            .collect(),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use werescuecats_core::{BreedTraits, TraitRating};

    #[test]
    fn test_breed_dto_uses_snake_case() {
        let breed = Breed {
            id: BreedId::parse("siam").unwrap(),
            name: "Siamese".into(),
            description: None,
            origin: Some("Thailand".into()),
            wikipedia_url: None,
            reference_image_id: None,
            image_url: None,
            traits: BreedTraits {
                energy_level: TraitRating::new(5),
                ..BreedTraits::default()
            },
        };
        let json = serde_json::to_value(BreedDto::from(breed)).unwrap();
        assert_eq!(json["energy_level"], 5);
        assert_eq!(json["child_friendly"], 3);
        assert!(json.get("childFriendly").is_none());
    }
}
