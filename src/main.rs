use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tripforge::api::{AppState, StartupStatus};
use tripforge::{GeminiClient, PlannerService, TripForgeConfig, VERSION, web};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing credential fails here, before anything is served
    let config = TripForgeConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging.level, &config.logging.format);
    info!("Starting TripForge v{VERSION}");

    let client =
        GeminiClient::new(config.gemini.clone()).context("Failed to create model API client")?;
    let model = client.model().to_string();
    let planner = PlannerService::new(client, config.gemini.temperature);

    // Startup connectivity check. A failure lands in the diagnostics panel
    // and the form stays usable.
    let startup = match planner.self_test().await {
        Ok(_) => {
            info!("Model API self-test passed");
            StartupStatus::passed()
        }
        Err(e) => {
            warn!("Model API self-test failed: {e}");
            StartupStatus::failed(e.user_message())
        }
    };

    let state = Arc::new(AppState {
        planner,
        defaults: config.defaults.clone(),
        model,
        api_key_preview: config.api_key_preview(),
        startup,
    });

    web::run(state, &config.server.bind, config.server.port).await
}

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
