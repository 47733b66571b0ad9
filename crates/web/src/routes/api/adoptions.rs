//! `/api/adoptions` handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use werescuecats_core::{AdoptionId, AdoptionStatus, CatId, UserId};

use crate::error::{ApiResult, AppError, add_breadcrumb};
use crate::routes::api::extract::{ApiJson, ApiPath};
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::{Adoption, CurrentUser};
use crate::services::AdoptionService;
use crate::services::adoption::{UserAdoptionStats, format_notes};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionUserDto {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionCatDto {
    pub id: CatId,
    pub name: String,
    pub age: Option<i32>,
    pub breed_name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionDto {
    pub id: AdoptionId,
    pub status: AdoptionStatus,
    pub adoption_date: DateTime<Utc>,
    pub approved_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
    pub tenant_id: String,
    pub user: AdoptionUserDto,
    pub cat: AdoptionCatDto,
}

impl From<Adoption> for AdoptionDto {
    fn from(a: Adoption) -> Self {
        Self {
            id: a.id,
            status: a.status,
            adoption_date: a.adoption_date,
            approved_date: a.approved_date,
            completed_date: a.completed_date,
            notes: a.notes,
            admin_notes: a.admin_notes,
            tenant_id: a.tenant_id,
            user: AdoptionUserDto {
                id: a.user.id,
                email: a.user.email.into_inner(),
                first_name: a.user.first_name,
                last_name: a.user.last_name,
            },
            cat: AdoptionCatDto {
                id: a.cat.id,
                name: a.cat.name,
                age: a.cat.age,
                breed_name: a.cat.breed_name,
                image_url: a.cat.image_url,
            },
        }
    }
}

/// Application body. Either free-form `notes` or the two form answers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdoptionRequest {
    pub cat_id: CatId,
    pub notes: Option<String>,
    pub experience: Option<String>,
    pub reason: Option<String>,
}

impl CreateAdoptionRequest {
    /// Notes to store with the application.
    fn resolved_notes(&self) -> Result<Option<String>, AppError> {
        if self.experience.is_some() || self.reason.is_some() {
            let notes = format_notes(
                self.experience.as_deref().unwrap_or_default(),
                self.reason.as_deref().unwrap_or_default(),
            )?;
            return Ok(Some(notes));
        }
        Ok(self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_owned))
    }
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: String,
}

fn dtos(adoptions: Vec<Adoption>) -> Json<Vec<AdoptionDto>> {
    Json(adoptions.into_iter().map(AdoptionDto::from).collect())
}

fn ensure_self_or_admin(current: &CurrentUser, user_id: UserId) -> Result<(), AppError> {
    if current.is_admin() || current.id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden("Access denied".to_owned()))
    }
}

/// `POST /api/adoptions`
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateAdoptionRequest>,
) -> ApiResult<(StatusCode, Json<AdoptionDto>)> {
    let notes = body.resolved_notes()?;
    let adoption = AdoptionService::new(state.pool())
        .create(user.id, body.cat_id, notes.as_deref())
        .await?;
    let adoption_id = adoption.id.to_string();
    add_breadcrumb(
        "adoption",
        "Application filed",
        Some(&[("adoption_id", adoption_id.as_str())]),
    );
    Ok((StatusCode::CREATED, Json(adoption.into())))
}

/// `GET /api/adoptions`
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AdoptionDto>>> {
    Ok(dtos(AdoptionService::new(state.pool()).list_all().await?))
}

/// `GET /api/adoptions/pending`
pub async fn pending(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AdoptionDto>>> {
    Ok(dtos(AdoptionService::new(state.pool()).list_pending().await?))
}

/// `GET /api/adoptions/{id}`
pub async fn show(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AdoptionId>,
) -> ApiResult<Json<AdoptionDto>> {
    let adoption = AdoptionService::new(state.pool()).get(id).await?;
    ensure_self_or_admin(&current, adoption.user.id)?;
    Ok(Json(adoption.into()))
}

/// `GET /api/adoptions/user/{user_id}`
pub async fn by_user(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<UserId>,
) -> ApiResult<Json<Vec<AdoptionDto>>> {
    ensure_self_or_admin(&current, user_id)?;
    Ok(dtos(
        AdoptionService::new(state.pool())
            .list_by_user(user_id)
            .await?,
    ))
}

/// `GET /api/adoptions/user/{user_id}/stats`
pub async fn user_stats(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<UserId>,
) -> ApiResult<Json<UserAdoptionStats>> {
    ensure_self_or_admin(&current, user_id)?;
    Ok(Json(
        AdoptionService::new(state.pool())
            .user_stats(user_id)
            .await?,
    ))
}

/// `PUT /api/adoptions/{id}/approve`
pub async fn approve(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AdoptionId>,
) -> ApiResult<Json<AdoptionDto>> {
    let adoption = AdoptionService::new(state.pool()).approve(id, &admin).await?;
    Ok(Json(adoption.into()))
}

/// `PUT /api/adoptions/{id}/complete`
pub async fn complete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AdoptionId>,
) -> ApiResult<Json<AdoptionDto>> {
    let adoption = AdoptionService::new(state.pool())
        .complete(id, &admin)
        .await?;
    Ok(Json(adoption.into()))
}

/// `PUT /api/adoptions/{id}/reject`
pub async fn reject(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AdoptionId>,
    ApiJson(body): ApiJson<RejectRequest>,
) -> ApiResult<Json<AdoptionDto>> {
    let adoption = AdoptionService::new(state.pool())
        .reject(id, &admin, &body.reason)
        .await?;
    Ok(Json(adoption.into()))
}

/// `PUT /api/adoptions/{id}/cancel`
pub async fn cancel(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AdoptionId>,
) -> ApiResult<Json<AdoptionDto>> {
    let adoption = AdoptionService::new(state.pool()).cancel(id, &user).await?;
    Ok(Json(adoption.into()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(json: &str) -> CreateAdoptionRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_notes_from_form_answers() {
        let req = request(r#"{"catId":4,"experience":"Two cats","reason":"Quiet flat"}"#);
        assert_eq!(
            req.resolved_notes().unwrap().as_deref(),
            Some("Experience with Cats: Two cats \nReason for Adoption: Quiet flat")
        );
    }

    #[test]
    fn test_partial_form_answers_rejected() {
        let req = request(r#"{"catId":4,"experience":"Two cats"}"#);
        assert!(req.resolved_notes().is_err());
    }

    #[test]
    fn test_plain_notes() {
        let req = request(r#"{"catId":4,"notes":"  "}"#);
        assert!(req.resolved_notes().unwrap().is_none());
        let req = request(r#"{"catId":4,"notes":"Hello"}"#);
        assert_eq!(req.resolved_notes().unwrap().as_deref(), Some("Hello"));
    }
}
