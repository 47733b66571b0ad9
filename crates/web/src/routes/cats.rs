//! Public cat pages: the browse grid, cat detail and the adoption form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use werescuecats_core::pagination::{CAT_GRID_PAGE_SIZE, page_number, paginate};
use werescuecats_core::{AgeRange, CatFilter, CatId, Gender, Page};

use crate::db::BreedRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{Breed, Cat, CurrentUser};
use crate::services::adoption::format_notes;
use crate::services::{AdoptionService, CatService};
use crate::state::AppState;

/// Browse query. Blank values mean "any".
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    pub breed: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AdoptForm {
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "cats/index.html")]
pub struct CatsIndexTemplate {
    pub user: Option<CurrentUser>,
    pub cats: Page<Cat>,
    pub filter: CatFilter,
    pub breed_names: Vec<String>,
    pub genders: [Gender; 2],
    pub age_ranges: [AgeRange; 3],
}

impl CatsIndexTemplate {
    /// Link to another page keeping the current filters.
    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        let mut url = format!("/cats?page={page}");
        if let Some(breed) = &self.filter.breed {
            url.push_str(&format!("&breed={}", urlencoding::encode(breed)));
        }
        if let Some(gender) = self.filter.gender {
            url.push_str(&format!("&gender={gender}"));
        }
        if let Some(age) = self.filter.age_range {
            url.push_str(&format!("&age={}", urlencoding::encode(age.key())));
        }
        url
    }

    #[must_use]
    pub fn is_breed_selected(&self, name: &str) -> bool {
        self.filter.breed.as_deref() == Some(name)
    }

    #[must_use]
    pub fn is_gender_selected(&self, gender: &Gender) -> bool {
        self.filter.gender == Some(*gender)
    }

    #[must_use]
    pub fn is_age_selected(&self, age: &AgeRange) -> bool {
        self.filter.age_range == Some(*age)
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "cats/show.html")]
pub struct CatShowTemplate {
    pub user: Option<CurrentUser>,
    pub cat: Cat,
    pub breed: Option<Breed>,
    pub error: Option<String>,
    pub experience: String,
    pub reason: String,
}

/// Display the available-cats grid.
#[instrument(skip(state, user))]
pub async fn index(
    OptionalAuth(user): OptionalAuth,
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<CatsIndexTemplate> {
    let filter = CatFilter::from_query(
        query.breed.as_deref(),
        query.gender.as_deref(),
        query.age.as_deref(),
    );
    let cats = CatService::new(state.pool()).browse(&filter).await?;
    let breed_names = BreedRepository::new(state.pool())
        .names_with_available_cats()
        .await?;

    Ok(CatsIndexTemplate {
        user,
        cats: paginate(&cats, page_number(query.page), CAT_GRID_PAGE_SIZE),
        filter,
        breed_names,
        genders: Gender::ALL,
        age_ranges: AgeRange::ALL,
    })
}

async fn detail(
    state: &AppState,
    user: Option<CurrentUser>,
    id: CatId,
) -> Result<CatShowTemplate> {
    let cat = CatService::new(state.pool()).get(id).await?;
    let breed = match &cat.breed_id {
        Some(breed_id) => BreedRepository::new(state.pool()).get(breed_id).await?,
        None => None,
    };

    Ok(CatShowTemplate {
        user,
        cat,
        breed,
        error: None,
        experience: String::new(),
        reason: String::new(),
    })
}

/// Display a cat.
pub async fn show(
    OptionalAuth(user): OptionalAuth,
    State(state): State<AppState>,
    Path(id): Path<CatId>,
) -> Result<CatShowTemplate> {
    detail(&state, user, id).await
}

/// Submit an adoption application.
#[instrument(skip(state, user, form), fields(user_id = %user.id))]
pub async fn adopt(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<CatId>,
    Form(form): Form<AdoptForm>,
) -> Result<Response> {
    let result = match format_notes(&form.experience, &form.reason) {
        Ok(notes) => {
            AdoptionService::new(state.pool())
                .create(user.id, id, Some(&notes))
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(adoption) => {
            let adoption_id = adoption.id.to_string();
            add_breadcrumb(
                "adoption",
                "Application filed",
                Some(&[("adoption_id", adoption_id.as_str())]),
            );
            Ok(Redirect::to("/profile").into_response())
        }
        Err(e) => {
            let err = AppError::from(e);
            if err.status().is_server_error() {
                return Err(err);
            }
            let mut page = detail(&state, Some(user), id).await?;
            page.error = Some(err.public_message());
            page.experience = form.experience;
            page.reason = form.reason;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(filter: CatFilter) -> CatsIndexTemplate {
        CatsIndexTemplate {
            user: None,
            cats: paginate(&[], 1, CAT_GRID_PAGE_SIZE),
            filter,
            breed_names: vec![],
            genders: Gender::ALL,
            age_ranges: AgeRange::ALL,
        }
    }

    #[test]
    fn test_page_url_keeps_filters() {
        let t = template(CatFilter::from_query(Some("Maine Coon"), Some("FEMALE"), Some("8+")));
        assert_eq!(
            t.page_url(2),
            "/cats?page=2&breed=Maine%20Coon&gender=FEMALE&age=8%2B"
        );
        assert!(t.is_breed_selected("Maine Coon"));
        assert!(t.is_gender_selected(&Gender::Female));
    }

    #[test]
    fn test_page_url_without_filters() {
        assert_eq!(template(CatFilter::default()).page_url(1), "/cats?page=1");
    }
}
