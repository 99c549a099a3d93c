//! sales-data Service

use std::sync::Arc;

use sales_data::{AppState, SalesService, routes};
use salesgen_bootstrap::run;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    run("config", |config, health| {
        info!("Initializing sales-data service...");

        let service = Arc::new(SalesService::new(&config.generator)?);
        health.register(service.clone());
        info!(window = ?service.generator().window(), "Generator initialized");

        Ok(routes(AppState::new(service, config.api)))
    })
    .await
}
