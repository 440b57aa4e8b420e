//! services/api/src/bin/api.rs

use api_lib::{
    adapters::InMemoryRosterAdapter,
    config::Config,
    error::ApiError,
    web::{rest::ApiDoc, router, state::AppState},
};
use axum::Router;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tutor_roster_core::{seed::demo_store, store::RosterStore};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Materialize the Rosters ---
    let store = if config.seed_demo_data {
        info!("Loading demo rosters.");
        demo_store()
    } else {
        RosterStore::new()
    };
    for overview in store.overview() {
        info!(
            organization = %overview.organization,
            students = overview.student_count,
            "Roster ready"
        );
    }
    let roster_adapter = Arc::new(InMemoryRosterAdapter::new(store));

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        roster: roster_adapter,
        config: config.clone(),
    });

    // --- 4. Create the Web Router ---
    let app = Router::new()
        .merge(router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
