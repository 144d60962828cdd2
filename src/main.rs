use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use product_config_harness::{router, startup, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "product_config_harness={0},tower_http={0}",
            config.log_level
        )
        .into()
    });

    // Structured output for log shippers outside development
    if config.environment == "production" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Loaded configuration for environment: {}", config.environment);

    let app_state = startup::initialize_app(&config)?;
    let app = router::build_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Starting product configuration harness on {}", addr);

    startup::print_startup(&config)?;

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    Ok(())
}
