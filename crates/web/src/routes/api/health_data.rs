//! `/api/health-data` handlers for partner health institutions.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use werescuecats_core::health::UNKNOWN;
use werescuecats_core::{AdoptionStatus, region_from_address};

use crate::db::AdoptionRepository;
use crate::error::ApiResult;
use crate::middleware::ValidApiToken;
use crate::models::Adoption;
use crate::state::AppState;

/// A completed adoption with the adopter stripped out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousAdoption {
    pub adoption_date: DateTime<Utc>,
    pub cat_breed: String,
    pub cat_age: Option<i32>,
    pub location_region: String,
    pub status: AdoptionStatus,
    pub tenant_id: String,
}

impl From<Adoption> for AnonymousAdoption {
    fn from(a: Adoption) -> Self {
        Self {
            adoption_date: a.adoption_date,
            cat_breed: a.cat.breed_name.unwrap_or_else(|| UNKNOWN.to_owned()),
            cat_age: a.cat.age,
            location_region: region_from_address(a.user.street_address.as_deref()),
            status: a.status,
            tenant_id: a.tenant_id,
        }
    }
}

/// `GET /api/health-data/anonymous-adoptions`
pub async fn anonymous_adoptions(
    ValidApiToken(token): ValidApiToken,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AnonymousAdoption>>> {
    let adoptions = AdoptionRepository::new(state.pool())
        .list_completed()
        .await?;
    tracing::info!(
        organization = %token.organization_name,
        count = adoptions.len(),
        "Anonymous adoption data served"
    );
    Ok(Json(
        adoptions.into_iter().map(AnonymousAdoption::from).collect(),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{AdoptionCat, AdoptionUser};
    use werescuecats_core::{AdoptionId, CatId, Email, UserId};

    fn adoption(breed: Option<&str>, street: Option<&str>) -> Adoption {
        let now = Utc::now();
        Adoption {
            id: AdoptionId::new(1),
            status: AdoptionStatus::Completed,
            adoption_date: now,
            approved_date: Some(now),
            completed_date: Some(now),
            notes: Some("private".into()),
            admin_notes: None,
            processed_by_admin: Some(UserId::new(1)),
            tenant_id: "main".into(),
            user: AdoptionUser {
                id: UserId::new(2),
                email: Email::parse("john.doe@example.com").unwrap(),
                first_name: "John".into(),
                last_name: "Doe".into(),
                street_address: street.map(Into::into),
            },
            cat: AdoptionCat {
                id: CatId::new(3),
                name: "Luna".into(),
                age: Some(4),
                breed_name: breed.map(Into::into),
                image_url: None,
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_strips_adopter() {
        let data = AnonymousAdoption::from(adoption(Some("Persian"), Some("456 Oak Avenue, Dresden")));
        assert_eq!(data.cat_breed, "Persian");
        assert_eq!(data.location_region, "Dresden");
        let json = serde_json::to_string(&data).unwrap();
        assert!(!json.contains("john.doe"));
        assert!(!json.contains("Luna"));
    }

    #[test]
    fn test_unknown_fallbacks() {
        let data = AnonymousAdoption::from(adoption(None, None));
        assert_eq!(data.cat_breed, "Unknown");
        assert_eq!(data.location_region, "Unknown");
    }
}
