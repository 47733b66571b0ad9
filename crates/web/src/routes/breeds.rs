//! Breed browser and breed detail pages.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::instrument;

use werescuecats_core::pagination::{BREED_PAGE_SIZE, page_number, paginate};
use werescuecats_core::{BreedFilter, BreedId, CareTips, Characteristic, Page, Trait};

use crate::db::BreedRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{Breed, CurrentUser};
use crate::state::AppState;

/// Breed browser query.
///
/// Every other key is a characteristic checkbox. `page` stays a string
/// because the urlencoded deserializer can't parse numbers next to a
/// flattened map.
#[derive(Debug, Default, Deserialize)]
pub struct BreedQuery {
    pub name: Option<String>,
    pub page: Option<String>,
    #[serde(flatten)]
    pub rest: HashMap<String, String>,
}

impl BreedQuery {
    fn filter(&self) -> BreedFilter {
        BreedFilter::from_keys(
            self.name.as_deref(),
            self.rest
                .iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, _)| k.as_str()),
        )
    }

    fn page(&self) -> u32 {
        page_number(self.page.as_deref().and_then(|p| p.parse().ok()))
    }
}

/// A characteristic checkbox and whether it is ticked.
pub struct CharacteristicOption {
    pub key: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "breeds/index.html")]
pub struct BreedsIndexTemplate {
    pub user: Option<CurrentUser>,
    pub breeds: Page<Breed>,
    pub name: String,
    pub characteristics: Vec<CharacteristicOption>,
}

impl BreedsIndexTemplate {
    /// Link to another page keeping the current filters.
    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        let mut url = format!("/breeds?page={page}");
        if !self.name.is_empty() {
            url.push_str("&name=");
            url.push_str(&urlencoding::encode(&self.name));
        }
        for c in self.characteristics.iter().filter(|c| c.checked) {
            url.push('&');
            url.push_str(c.key);
            url.push_str("=on");
        }
        url
    }
}

/// One rating bar on the breed page.
pub struct TraitView {
    pub label: &'static str,
    pub rating: u8,
    pub description: &'static str,
}

impl TraitView {
    /// Bar width in percent.
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.rating * 20
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "breeds/show.html")]
pub struct BreedShowTemplate {
    pub user: Option<CurrentUser>,
    pub breed: Breed,
    pub traits: Vec<TraitView>,
    pub care: CareTips,
}

/// Display the breed browser.
#[instrument(skip(state, user, query))]
pub async fn index(
    OptionalAuth(user): OptionalAuth,
    State(state): State<AppState>,
    Query(query): Query<BreedQuery>,
) -> Result<BreedsIndexTemplate> {
    let filter = query.filter();
    let breeds: Vec<Breed> = BreedRepository::new(state.pool())
        .list_all()
        .await?
        .into_iter()
        .filter(|b| filter.matches(&b.name, &b.traits))
        .collect();

    let characteristics = Characteristic::ALL
        .into_iter()
        .map(|c| CharacteristicOption {
            key: c.key(),
            label: c.label(),
            checked: filter.has(c),
        })
        .collect();

    Ok(BreedsIndexTemplate {
        user,
        breeds: paginate(&breeds, query.page(), BREED_PAGE_SIZE),
        name: filter.name_prefix,
        characteristics,
    })
}

/// Display a breed with its trait ratings and care tips.
#[instrument(skip(state, user))]
pub async fn show(
    OptionalAuth(user): OptionalAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<BreedShowTemplate> {
    let not_found = || AppError::NotFound(format!("Breed not found with id: {id}"));
    let breed_id = BreedId::parse(&id).map_err(|_| not_found())?;
    let breed = BreedRepository::new(state.pool())
        .get(&breed_id)
        .await?
        .ok_or_else(not_found)?;

    Ok(BreedShowTemplate {
        user,
        traits: trait_views(&breed),
        care: breed.care_tips(),
        breed,
    })
}

fn trait_views(breed: &Breed) -> Vec<TraitView> {
    Trait::ALL
        .into_iter()
        .map(|t| {
            let rating = breed.traits.rating(t).get();
            TraitView {
                label: t.label(),
                rating,
                description: t.describe(rating),
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> BreedQuery {
        BreedQuery {
            name: None,
            page: None,
            rest: pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }

    #[test]
    fn test_query_builds_filter() {
        let q = query(&[("childFriendly", "on"), ("bogus", "on"), ("grooming", "")]);
        let filter = q.filter();
        assert!(filter.has(Characteristic::ChildFriendly));
        assert!(!filter.has(Characteristic::Grooming));
        assert_eq!(filter.characteristics.len(), 1);
    }

    #[test]
    fn test_query_page_parsing() {
        let mut q = query(&[]);
        assert_eq!(q.page(), 1);
        q.page = Some("3".into());
        assert_eq!(q.page(), 3);
        q.page = Some("abc".into());
        assert_eq!(q.page(), 1);
    }

    #[test]
    fn test_page_url_keeps_checked_boxes() {
        let template = BreedsIndexTemplate {
            user: None,
            breeds: paginate(&[], 1, BREED_PAGE_SIZE),
            name: "Maine".into(),
            characteristics: vec![
                CharacteristicOption {
                    key: "dogFriendly",
                    label: "Dog Friendly",
                    checked: true,
                },
                CharacteristicOption {
                    key: "grooming",
                    label: "High Grooming Needs",
                    checked: false,
                },
            ],
        };
        assert_eq!(template.page_url(2), "/breeds?page=2&name=Maine&dogFriendly=on");
    }
}
