//! Admin dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::CurrentUser;
use crate::services::DashboardStats;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub user: Option<CurrentUser>,
    pub current_path: &'static str,
    pub stats: DashboardStats,
}

/// Dashboard page handler.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<DashboardTemplate> {
    let stats = DashboardStats::load(state.pool()).await?;

    Ok(DashboardTemplate {
        user: Some(admin),
        current_path: "/admin",
        stats,
    })
}
