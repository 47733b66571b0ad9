//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use werescuecats_core::CatStatus;

use crate::db::{BreedRepository, CatRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{Breed, Cat, CurrentUser};
use crate::state::AppState;

/// Cats shown on the home page.
const FEATURED_CATS: usize = 6;

/// Breeds highlighted on the home page, in display order.
const POPULAR_BREEDS: [&str; 8] = ["pers", "siam", "mcoo", "bsho", "ragd", "rblu", "sphy", "sfol"];

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub user: Option<CurrentUser>,
    pub featured: Vec<Cat>,
    pub popular_breeds: Vec<Breed>,
    pub available_count: usize,
}

/// Pick the popular breeds that exist, keeping their display order.
fn popular(breeds: Vec<Breed>) -> Vec<Breed> {
    let mut picked: Vec<Breed> = breeds
        .into_iter()
        .filter(|b| POPULAR_BREEDS.contains(&b.id.as_str()))
        .collect();
    picked.sort_by_key(|b| POPULAR_BREEDS.iter().position(|id| *id == b.id.as_str()));
    picked
}

/// Display the home page.
#[instrument(skip(state, user))]
pub async fn home(
    OptionalAuth(user): OptionalAuth,
    State(state): State<AppState>,
) -> Result<HomeTemplate> {
    let available = CatRepository::new(state.pool())
        .list_by_status(CatStatus::Available)
        .await?;
    let available_count = available.len();
    let featured = available.into_iter().take(FEATURED_CATS).collect();

    let breeds = BreedRepository::new(state.pool()).list_all().await?;

    Ok(HomeTemplate {
        user,
        featured,
        popular_breeds: popular(breeds),
        available_count,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use werescuecats_core::{BreedId, BreedTraits};

    fn breed(id: &str) -> Breed {
        Breed {
            id: BreedId::parse(id).unwrap(),
            name: id.to_uppercase(),
            description: None,
            origin: None,
            wikipedia_url: None,
            reference_image_id: None,
            image_url: None,
            traits: BreedTraits::default(),
        }
    }

    #[test]
    fn test_popular_keeps_display_order() {
        let picked = popular(vec![breed("siam"), breed("abys"), breed("pers")]);
        let ids: Vec<_> = picked.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["pers", "siam"]);
    }
}
