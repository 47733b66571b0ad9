//! Database operations for `PostgreSQL`.
//!
//! # Tables
//!
//! - `breeds` - Breed reference data synced from TheCatAPI
//! - `cats` - Adoptable cats
//! - `users` - Adopters and admins (argon2 password hashes)
//! - `adoptions` - Adoption applications
//! - `api_tokens` - Health institution API tokens
//! - `tower_sessions.session` - Tower-sessions storage
//!
//! Queries are built at runtime with `sqlx::query_as` and `FromRow` row
//! types, then converted into the domain types in [`crate::models`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p werescuecats-cli -- migrate
//! ```

pub mod adoptions;
pub mod api_tokens;
pub mod breeds;
pub mod cats;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use adoptions::AdoptionRepository;
pub use api_tokens::ApiTokenRepository;
pub use breeds::BreedRepository;
pub use cats::CatRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email, cat still referenced).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Map unique and foreign key violations to [`RepositoryError::Conflict`].
fn map_constraint(e: sqlx::Error, conflict: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && (db_err.is_unique_violation() || db_err.is_foreign_key_violation())
    {
        return RepositoryError::Conflict(conflict.to_owned());
    }
    RepositoryError::Database(e)
}

/// Convert a `COUNT(*)` result.
fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
