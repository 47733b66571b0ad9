//! `/api/dashboard` handlers.

use axum::{Json, extract::State};

use crate::error::ApiResult;
use crate::middleware::RequireAdmin;
use crate::services::DashboardStats;
use crate::state::AppState;

/// `GET /api/dashboard/stats`
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(DashboardStats::load(state.pool()).await?))
}
