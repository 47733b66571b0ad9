//! Subcommand implementations.

pub mod admin;
pub mod breeds;
pub mod migrate;
pub mod seed;
pub mod token;

use sqlx::PgPool;

use werescuecats_web::config::{ConfigError, get_database_url};
use werescuecats_web::db;

/// Errors shared by commands that only need a database connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Connect using `WRC_DATABASE_URL` or `DATABASE_URL`.
pub async fn connect() -> Result<PgPool, ConnectError> {
    let database_url = get_database_url("WRC_DATABASE_URL")?;
    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}
