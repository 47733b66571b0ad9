//! Health institution tokens: issuing and per-request validation.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use werescuecats_core::health::{
    DEFAULT_DAILY_LIMIT, DEFAULT_INSTITUTIONS, TOKEN_VALIDITY_DAYS, contact_email_for,
    generate_token, token_description_for,
};

use crate::db::api_tokens::NewApiToken;
use crate::db::{ApiTokenRepository, RepositoryError};
use crate::models::ApiToken;

#[derive(Debug, Error)]
pub enum ApiTokenError {
    /// Unknown, inactive or expired token.
    #[error("Invalid API token")]
    Invalid,

    #[error("Daily request limit exceeded")]
    LimitExceeded,

    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

pub struct ApiTokenService<'a> {
    tokens: ApiTokenRepository<'a>,
}

impl<'a> ApiTokenService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            tokens: ApiTokenRepository::new(pool),
        }
    }

    /// Issue a token for an institution.
    ///
    /// # Errors
    ///
    /// Returns `ApiTokenError::Validation` if the name is blank.
    #[instrument(skip(self))]
    pub async fn generate(&self, organization: &str) -> Result<ApiToken, ApiTokenError> {
        let organization = organization.trim();
        if organization.is_empty() {
            return Err(ApiTokenError::Validation(
                "Organization name is required".to_owned(),
            ));
        }

        let token = self
            .tokens
            .create(&NewApiToken {
                token: generate_token(),
                organization_name: organization.to_owned(),
                contact_email: contact_email_for(organization),
                daily_request_limit: DEFAULT_DAILY_LIMIT,
                description: token_description_for(organization),
                expires_at: Utc::now() + Duration::days(TOKEN_VALIDITY_DAYS),
            })
            .await?;

        tracing::info!(token_id = %token.id, organization, "API token issued");
        Ok(token)
    }

    /// Check a presented token and count the request.
    ///
    /// # Errors
    ///
    /// Returns `ApiTokenError::Invalid` for unknown, inactive or expired
    /// tokens, and `ApiTokenError::LimitExceeded` once today's quota is used.
    pub async fn validate(&self, presented: &str) -> Result<ApiToken, ApiTokenError> {
        let presented = presented.trim();
        if presented.is_empty() {
            return Err(ApiTokenError::Invalid);
        }

        let token = self
            .tokens
            .find_active(presented)
            .await?
            .ok_or(ApiTokenError::Invalid)?;

        let now = Utc::now();
        if !token.is_valid(now) {
            return Err(ApiTokenError::Invalid);
        }
        if !token.has_requests_remaining(now) {
            tracing::warn!(token_id = %token.id, "API token over daily limit");
            return Err(ApiTokenError::LimitExceeded);
        }

        self.tokens.record_use(token.id).await?;
        Ok(token)
    }

    /// Issue tokens for the default institutions when none exist.
    ///
    /// # Errors
    ///
    /// Returns `ApiTokenError::Repository` if a query fails.
    pub async fn ensure_defaults(&self) -> Result<Vec<ApiToken>, ApiTokenError> {
        if self.tokens.count().await? > 0 {
            return Ok(Vec::new());
        }

        let mut issued = Vec::with_capacity(DEFAULT_INSTITUTIONS.len());
        for organization in DEFAULT_INSTITUTIONS {
            issued.push(self.generate(organization).await?);
        }
        Ok(issued)
    }

    /// # Errors
    ///
    /// Returns `ApiTokenError::Repository` if the query fails.
    pub async fn list(&self) -> Result<Vec<ApiToken>, ApiTokenError> {
        Ok(self.tokens.list().await?)
    }
}
