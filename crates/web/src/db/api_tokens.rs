//! API token repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use werescuecats_core::ApiTokenId;

use super::{RepositoryError, map_constraint, to_count};
use crate::models::ApiToken;

#[derive(sqlx::FromRow)]
struct ApiTokenRow {
    id: ApiTokenId,
    token: String,
    organization_name: String,
    contact_email: Option<String>,
    daily_request_limit: i32,
    request_count: i32,
    description: Option<String>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
    active: bool,
}

impl From<ApiTokenRow> for ApiToken {
    fn from(row: ApiTokenRow) -> Self {
        Self {
            id: row.id,
            token: row.token,
            organization_name: row.organization_name,
            contact_email: row.contact_email,
            daily_request_limit: row.daily_request_limit,
            request_count: row.request_count,
            description: row.description,
            created_at: row.created_at,
            expires_at: row.expires_at,
            last_used_at: row.last_used_at,
            active: row.active,
        }
    }
}

/// Fields for issuing a token.
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub token: String,
    pub organization_name: String,
    pub contact_email: String,
    pub daily_request_limit: i32,
    pub description: String,
    pub expires_at: DateTime<Utc>,
}

/// Repository for health institution tokens.
pub struct ApiTokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ApiTokenRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the token value already exists.
    pub async fn create(&self, new: &NewApiToken) -> Result<ApiToken, RepositoryError> {
        let row = sqlx::query_as::<_, ApiTokenRow>(
            r"
            INSERT INTO api_tokens (token, organization_name, contact_email,
                                    daily_request_limit, description, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, token, organization_name, contact_email, daily_request_limit,
                      request_count, description, created_at, expires_at, last_used_at, active
            ",
        )
        .bind(&new.token)
        .bind(&new.organization_name)
        .bind(&new.contact_email)
        .bind(new.daily_request_limit)
        .bind(&new.description)
        .bind(new.expires_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_constraint(e, "token already exists"))?;

        Ok(row.into())
    }

    /// Look up an active token by its value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_active(&self, token: &str) -> Result<Option<ApiToken>, RepositoryError> {
        let row = sqlx::query_as::<_, ApiTokenRow>(
            r"
            SELECT id, token, organization_name, contact_email, daily_request_limit,
                   request_count, description, created_at, expires_at, last_used_at, active
            FROM api_tokens
            WHERE token = $1 AND active
            ",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(ApiToken::from))
    }

    /// Count a request against today's limit and stamp `last_used_at`.
    ///
    /// The counter restarts at 1 on the first use of a new UTC day.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the token doesn't exist.
    pub async fn record_use(&self, id: ApiTokenId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE api_tokens SET
                request_count = CASE
                    WHEN last_used_at IS NULL
                      OR last_used_at < date_trunc('day', now() AT TIME ZONE 'UTC') AT TIME ZONE 'UTC'
                    THEN 1
                    ELSE request_count + 1
                END,
                last_used_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// All tokens, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ApiToken>, RepositoryError> {
        let rows = sqlx::query_as::<_, ApiTokenRow>(
            r"
            SELECT id, token, organization_name, contact_email, daily_request_limit,
                   request_count, description, created_at, expires_at, last_used_at, active
            FROM api_tokens
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ApiToken::from).collect())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM api_tokens")
            .fetch_one(self.pool)
            .await?;
        Ok(to_count(n))
    }
}
