//! `/api/cats` handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use werescuecats_core::pagination::page_number;
use werescuecats_core::{BreedId, CatId, CatStatus, Gender, Page};

use crate::error::{ApiResult, AppError};
use crate::middleware::RequireAdmin;
use crate::models::Cat;
use crate::routes::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::services::CatService;
use crate::services::cats::CatForm;
use crate::state::AppState;

/// Card-sized cat for list endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatSummaryDto {
    pub id: CatId,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub breed_name: Option<String>,
    pub image_url: Option<String>,
    pub address: Option<String>,
    pub status: CatStatus,
}

impl From<Cat> for CatSummaryDto {
    fn from(cat: Cat) -> Self {
        Self {
            id: cat.id,
            name: cat.name,
            age: cat.age,
            gender: cat.gender,
            breed_name: cat.breed_name,
            image_url: cat.image_url,
            address: cat.address,
            status: cat.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatDto {
    pub id: CatId,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub description: Option<String>,
    pub breed_id: Option<BreedId>,
    pub breed_name: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub status: CatStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Cat> for CatDto {
    fn from(cat: Cat) -> Self {
        Self {
            id: cat.id,
            name: cat.name,
            age: cat.age,
            gender: cat.gender,
            description: cat.description,
            breed_id: cat.breed_id,
            breed_name: cat.breed_name,
            image_url: cat.image_url,
            latitude: cat.latitude,
            longitude: cat.longitude,
            address: cat.address,
            status: cat.status,
            created_at: cat.created_at,
            updated_at: cat.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AreaQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: CatStatus,
}

fn summaries(cats: Vec<Cat>) -> Json<Vec<CatSummaryDto>> {
    Json(cats.into_iter().map(CatSummaryDto::from).collect())
}

/// `GET /api/cats/available`
pub async fn available(State(state): State<AppState>) -> ApiResult<Json<Vec<CatSummaryDto>>> {
    let cats = CatService::new(state.pool())
        .by_status(CatStatus::Available)
        .await?;
    Ok(summaries(cats))
}

/// `GET /api/cats/breed/{breed_id}`
pub async fn by_breed(
    State(state): State<AppState>,
    ApiPath(breed_id): ApiPath<String>,
) -> ApiResult<Json<Vec<CatSummaryDto>>> {
    let breed_id =
        BreedId::parse(&breed_id).map_err(|e| AppError::BadRequest(format!("breed id: {e}")))?;
    let cats = CatService::new(state.pool()).by_breed(&breed_id).await?;
    Ok(summaries(cats))
}

/// `GET /api/cats/area?lat=&lon=&radius=`
pub async fn in_area(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AreaQuery>,
) -> ApiResult<Json<Vec<CatSummaryDto>>> {
    let cats = CatService::new(state.pool())
        .in_area(query.lat, query.lon, query.radius)
        .await?;
    Ok(summaries(cats))
}

/// `GET /api/cats/pending`
pub async fn pending(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CatSummaryDto>>> {
    let cats = CatService::new(state.pool())
        .by_status(CatStatus::Pending)
        .await?;
    Ok(summaries(cats))
}

/// `GET /api/cats/adopted`
pub async fn adopted(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CatSummaryDto>>> {
    let cats = CatService::new(state.pool())
        .by_status(CatStatus::Adopted)
        .await?;
    Ok(summaries(cats))
}

/// `GET /api/cats/{id}`
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CatId>,
) -> ApiResult<Json<CatDto>> {
    let cat = CatService::new(state.pool()).get(id).await?;
    Ok(Json(cat.into()))
}

/// `GET /api/cats?page=`
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<Json<Page<CatDto>>> {
    let page = CatService::new(state.pool())
        .page(None, page_number(query.page))
        .await?;
    Ok(Json(page.map(CatDto::from)))
}

/// `POST /api/cats`
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiJson(form): ApiJson<CatForm>,
) -> ApiResult<(StatusCode, Json<CatDto>)> {
    let cat = CatService::new(state.pool())
        .create(&form, state.cat_api())
        .await?;
    tracing::info!(cat_id = %cat.id, admin_id = %admin.id, "Cat created via API");
    Ok((StatusCode::CREATED, Json(cat.into())))
}

/// `PUT /api/cats/{id}/status`
pub async fn update_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CatId>,
    ApiJson(body): ApiJson<StatusUpdate>,
) -> ApiResult<Json<CatDto>> {
    let cat = CatService::new(state.pool())
        .update_status(id, body.status)
        .await?;
    Ok(Json(cat.into()))
}

/// `DELETE /api/cats/{id}`
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CatId>,
) -> ApiResult<StatusCode> {
    CatService::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
