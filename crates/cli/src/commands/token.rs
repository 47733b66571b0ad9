//! Health data API token commands.

use werescuecats_web::services::ApiTokenService;

use super::connect;

/// Issue a token and log it. The value is not shown again.
pub async fn create(organization: &str) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;
    let token = ApiTokenService::new(&pool).generate(organization).await?;

    tracing::info!("API token created successfully!");
    tracing::info!("  Organization: {}", token.organization_name);
    tracing::info!("  Daily limit: {}", token.daily_request_limit);
    tracing::info!("  Expires: {}", token.expires_at);
    tracing::info!("");
    tracing::info!("Send it in the X-API-Token header:");
    tracing::info!("  {}", token.token);
    Ok(())
}
