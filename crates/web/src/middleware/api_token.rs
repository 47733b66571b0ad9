//! `X-API-Token` extractor for the health data API.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::error::ApiError;
use crate::models::ApiToken;
use crate::services::{ApiTokenError, ApiTokenService};
use crate::state::AppState;

/// Header carrying a health institution token.
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// A validated health institution token.
///
/// Extraction counts the request against the token's daily limit.
pub struct ValidApiToken(pub ApiToken);

impl FromRequestParts<AppState> for ValidApiToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(API_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ApiTokenError::Invalid)?;

        let token = ApiTokenService::new(state.pool())
            .validate(presented)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "API token rejected"))?;

        Ok(Self(token))
    }
}
