//! Adoption application review.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use werescuecats_core::{AdoptionId, AdoptionStatus};

use super::{Notice, redirect_after};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{Adoption, CurrentUser};
use crate::services::AdoptionService;
use crate::state::AppState;

const APPLICATIONS_PATH: &str = "/admin/applications";

#[derive(Debug, Deserialize)]
pub struct RejectForm {
    #[serde(default)]
    pub reason: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/applications.html")]
pub struct ApplicationsTemplate {
    pub user: Option<CurrentUser>,
    pub current_path: &'static str,
    pub adoptions: Vec<Adoption>,
    pub pending_count: usize,
    pub approved_count: usize,
    pub notice: Notice,
    pub now: DateTime<Utc>,
}

impl ApplicationsTemplate {
    #[must_use]
    pub fn days_waiting(&self, adoption: &Adoption) -> i64 {
        adoption.days_from_application(self.now)
    }
}

fn count_status(adoptions: &[Adoption], status: AdoptionStatus) -> usize {
    adoptions.iter().filter(|a| a.status == status).count()
}

fn breadcrumb(action: &str, id: AdoptionId) {
    let adoption_id = id.to_string();
    add_breadcrumb(
        "admin",
        action,
        Some(&[("adoption_id", adoption_id.as_str())]),
    );
}

/// All applications, newest first.
#[instrument(skip(admin, state, notice), fields(admin_id = %admin.id))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(notice): Query<Notice>,
) -> Result<ApplicationsTemplate> {
    let adoptions = AdoptionService::new(state.pool()).list_all().await?;

    Ok(ApplicationsTemplate {
        user: Some(admin),
        current_path: APPLICATIONS_PATH,
        pending_count: count_status(&adoptions, AdoptionStatus::Pending),
        approved_count: count_status(&adoptions, AdoptionStatus::Approved),
        adoptions,
        notice,
        now: Utc::now(),
    })
}

#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn approve(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<AdoptionId>,
) -> Result<Redirect> {
    let outcome = AdoptionService::new(state.pool()).approve(id, &admin).await;
    if outcome.is_ok() {
        breadcrumb("Application approved", id);
    }
    redirect_after(APPLICATIONS_PATH, outcome, "Application approved")
}

#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn complete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<AdoptionId>,
) -> Result<Redirect> {
    let outcome = AdoptionService::new(state.pool()).complete(id, &admin).await;
    if outcome.is_ok() {
        breadcrumb("Adoption completed", id);
    }
    redirect_after(APPLICATIONS_PATH, outcome, "Adoption completed")
}

#[instrument(skip(admin, state, form), fields(admin_id = %admin.id))]
pub async fn reject(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<AdoptionId>,
    Form(form): Form<RejectForm>,
) -> Result<Redirect> {
    let outcome = AdoptionService::new(state.pool())
        .reject(id, &admin, &form.reason)
        .await;
    if outcome.is_ok() {
        breadcrumb("Application rejected", id);
    }
    redirect_after(APPLICATIONS_PATH, outcome, "Application rejected")
}
