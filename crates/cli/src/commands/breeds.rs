//! Breed catalogue sync from TheCatAPI.

use werescuecats_web::config::CatApiConfig;
use werescuecats_web::services::CatApiClient;
use werescuecats_web::services::breed_sync::sync_breeds;

use super::connect;

/// Fetch every breed and upsert it, whether or not the table is empty.
pub async fn sync() -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;
    let client = CatApiClient::new(&CatApiConfig::from_env()?)?;

    tracing::info!("Fetching breeds from TheCatAPI...");
    let report = sync_breeds(&pool, &client).await?;

    tracing::info!("Breed sync complete!");
    tracing::info!("  Upserted: {}", report.upserted);
    if report.skipped > 0 {
        tracing::warn!("  Skipped (malformed): {}", report.skipped);
    }
    Ok(())
}
