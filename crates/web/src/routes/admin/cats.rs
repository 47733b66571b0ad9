//! Cat management: paged table, intake form, status override and delete.

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

use werescuecats_core::pagination::page_number;
use werescuecats_core::{CatId, CatStatus, Gender, Page};

use super::{Notice, redirect_after};
use crate::db::BreedRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{Breed, Cat, CurrentUser};
use crate::services::CatService;
use crate::services::cats::CatForm;
use crate::state::AppState;

const CATS_PATH: &str = "/admin/cats";

#[derive(Debug, Default, Deserialize)]
pub struct CatsQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub success: Option<String>,
    pub error: Option<String>,
}

impl CatsQuery {
    /// Blank or unknown statuses mean "all".
    fn status(&self) -> Option<CatStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Raw intake form. Numbers stay strings so a blank field re-renders the
/// form instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatFormInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub breed_id: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub address: String,
}

impl CatFormInput {
    fn to_form(&self) -> std::result::Result<CatForm, String> {
        let age = self
            .age
            .trim()
            .parse()
            .map_err(|_| "Age must be a whole number".to_owned())?;
        let gender = self
            .gender
            .parse::<Gender>()
            .map_err(|_| "Gender is required".to_owned())?;
        let latitude = self
            .latitude
            .trim()
            .parse()
            .map_err(|_| "Latitude must be a number".to_owned())?;
        let longitude = self
            .longitude
            .trim()
            .parse()
            .map_err(|_| "Longitude must be a number".to_owned())?;

        Ok(CatForm {
            name: self.name.clone(),
            age,
            gender,
            description: self.description.clone(),
            breed_id: self.breed_id.clone(),
            latitude,
            longitude,
            address: self.address.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: CatStatus,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/cats.html")]
pub struct CatsTemplate {
    pub user: Option<CurrentUser>,
    pub current_path: &'static str,
    pub cats: Page<Cat>,
    pub status: Option<CatStatus>,
    pub statuses: [CatStatus; 3],
    pub notice: Notice,
}

impl CatsTemplate {
    /// Link to another page keeping the status filter.
    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        match self.status {
            Some(status) => format!("{CATS_PATH}?status={status}&page={page}"),
            None => format!("{CATS_PATH}?page={page}"),
        }
    }

    #[must_use]
    pub fn is_status_selected(&self, status: &CatStatus) -> bool {
        self.status == Some(*status)
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/cat_form.html")]
pub struct CatFormTemplate {
    pub user: Option<CurrentUser>,
    pub current_path: &'static str,
    pub breeds: Vec<Breed>,
    pub genders: [Gender; 2],
    pub form: CatFormInput,
    pub error: Option<String>,
}

impl CatFormTemplate {
    #[must_use]
    pub fn is_breed_selected(&self, breed: &Breed) -> bool {
        self.form.breed_id == breed.id.as_str()
    }

    #[must_use]
    pub fn is_gender_selected(&self, gender: &Gender) -> bool {
        self.form.gender == gender.to_string()
    }
}

async fn form_page(
    state: &AppState,
    admin: CurrentUser,
    form: CatFormInput,
    error: Option<String>,
) -> Result<CatFormTemplate> {
    let breeds = BreedRepository::new(state.pool()).list_all().await?;
    Ok(CatFormTemplate {
        user: Some(admin),
        current_path: CATS_PATH,
        breeds,
        genders: Gender::ALL,
        form,
        error,
    })
}

/// Paged cat table.
#[instrument(skip(admin, state, query), fields(admin_id = %admin.id))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<CatsQuery>,
) -> Result<CatsTemplate> {
    let status = query.status();
    let cats = CatService::new(state.pool())
        .page(status, page_number(query.page))
        .await?;

    Ok(CatsTemplate {
        user: Some(admin),
        current_path: CATS_PATH,
        cats,
        status,
        statuses: CatStatus::ALL,
        notice: Notice {
            success: query.success,
            error: query.error,
        },
    })
}

/// Intake form.
pub async fn new_form(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<CatFormTemplate> {
    form_page(&state, admin, CatFormInput::default(), None).await
}

/// Create a cat from the intake form.
#[instrument(skip(admin, state, input), fields(admin_id = %admin.id))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Form(input): Form<CatFormInput>,
) -> Result<Response> {
    let form = match input.to_form() {
        Ok(form) => form,
        Err(message) => {
            let page = form_page(&state, admin, input, Some(message)).await?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    match CatService::new(state.pool())
        .create(&form, state.cat_api())
        .await
    {
        Ok(cat) => {
            let cat_id = cat.id.to_string();
            add_breadcrumb("admin", "Cat added", Some(&[("cat_id", cat_id.as_str())]));
            Ok(Redirect::to(&format!(
                "{CATS_PATH}?success={}",
                urlencoding::encode(&format!("{} added", cat.name))
            ))
            .into_response())
        }
        Err(e) => {
            let err = AppError::from(e);
            if err.status().is_server_error() {
                return Err(err);
            }
            let page = form_page(&state, admin, input, Some(err.public_message())).await?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
    }
}

/// Override a cat's status.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CatId>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    let outcome = CatService::new(state.pool())
        .update_status(id, form.status)
        .await;
    redirect_after(CATS_PATH, outcome, "Status updated")
}

/// Delete a cat with no adoption history.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CatId>,
) -> Result<Redirect> {
    let outcome = CatService::new(state.pool()).delete(id).await;
    if outcome.is_ok() {
        let cat_id = id.to_string();
        add_breadcrumb("admin", "Cat deleted", Some(&[("cat_id", cat_id.as_str())]));
    }
    redirect_after(CATS_PATH, outcome, "Cat deleted")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> CatFormInput {
        CatFormInput {
            name: "Mochi".into(),
            age: " 2 ".into(),
            gender: "FEMALE".into(),
            description: String::new(),
            breed_id: "siam".into(),
            latitude: "51.05".into(),
            longitude: "13.73".into(),
            address: "Altstadt, Dresden".into(),
        }
    }

    #[test]
    fn test_form_input_converts() {
        let form = input().to_form().unwrap();
        assert_eq!(form.age, 2);
        assert_eq!(form.gender, Gender::Female);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_form_input_reports_blank_numbers() {
        let mut bad = input();
        bad.age = String::new();
        assert_eq!(bad.to_form().unwrap_err(), "Age must be a whole number");

        let mut bad = input();
        bad.gender = String::new();
        assert_eq!(bad.to_form().unwrap_err(), "Gender is required");
    }

    #[test]
    fn test_status_query() {
        let query = CatsQuery {
            status: Some("adopted".into()),
            ..CatsQuery::default()
        };
        assert_eq!(query.status(), Some(CatStatus::Adopted));
        assert_eq!(CatsQuery::default().status(), None);
    }
}
