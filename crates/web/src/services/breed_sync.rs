//! Copies TheCatAPI's breed catalogue into the `breeds` table.

use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use super::cat_api::{CatApiClient, CatApiError};
use crate::db::{BreedRepository, RepositoryError};
use crate::models::Breed;

#[derive(Debug, Error)]
pub enum BreedSyncError {
    #[error("TheCatAPI error: {0}")]
    CatApi(#[from] CatApiError),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Outcome of a sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub upserted: usize,
    /// Upstream entries that could not be converted.
    pub skipped: usize,
}

/// Fetch every breed and upsert it.
///
/// # Errors
///
/// Returns an error if the fetch fails or a write fails. Malformed entries
/// are skipped and counted.
#[instrument(skip_all)]
pub async fn sync_breeds(pool: &PgPool, client: &CatApiClient) -> Result<SyncReport, BreedSyncError> {
    let repo = BreedRepository::new(pool);
    let mut report = SyncReport::default();

    for dto in client.fetch_breeds().await? {
        match Breed::try_from(dto) {
            Ok(breed) => {
                repo.upsert(&breed).await?;
                report.upserted += 1;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed breed");
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        upserted = report.upserted,
        skipped = report.skipped,
        "Fetched breeds from TheCatAPI"
    );
    Ok(report)
}

/// Sync only when the breed table is empty.
///
/// Returns `None` when breeds were already present.
///
/// # Errors
///
/// See [`sync_breeds`].
pub async fn sync_if_empty(
    pool: &PgPool,
    client: &CatApiClient,
) -> Result<Option<SyncReport>, BreedSyncError> {
    let count = BreedRepository::new(pool).count().await?;
    if count > 0 {
        tracing::info!(count, "Breeds present, no fetch needed");
        return Ok(None);
    }

    tracing::info!("No breeds found, performing initial fetch");
    sync_breeds(pool, client).await.map(Some)
}
