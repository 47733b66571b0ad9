//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::WebConfig;
use crate::services::{CatApiClient, CatApiError};

/// Application state shared across all handlers.
///
/// Cheap to clone: everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    pool: PgPool,
    cat_api: CatApiClient,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the TheCatAPI client can't be built.
    pub fn new(config: WebConfig, pool: PgPool) -> Result<Self, CatApiError> {
        let cat_api = CatApiClient::new(&config.cat_api)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                cat_api,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// TheCatAPI client.
    #[must_use]
    pub fn cat_api(&self) -> &CatApiClient {
        &self.inner.cat_api
    }
}
