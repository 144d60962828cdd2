//! Application startup: dependency wiring, console narration, shutdown.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use crate::app_state::AppState;
use crate::config::Config;
use crate::database::{Bindings, Database, MockDatabase, Resolve, ResolveExt, DATABASE_BINDING};
use crate::models::sample_product_json;

/// Resolve the product database from `resolver` and build the [`AppState`].
pub fn build_app_state<R: Resolve>(
    resolver: &R,
    database_label: &str,
    config: &Config,
) -> Result<AppState> {
    let db = resolver.resolve(DATABASE_BINDING).ok_or_else(|| {
        anyhow::anyhow!("No database bound to `{}`", DATABASE_BINDING)
    })?;

    Ok(AppState::new(db, database_label, config.clone()))
}

/// Wire the harness: the product database binding is answered by the mock.
pub fn initialize_app(config: &Config) -> Result<AppState> {
    let mock: Arc<dyn Database> = Arc::new(MockDatabase::new());
    let resolver = Bindings::new().substitute(DATABASE_BINDING, mock);
    info!(binding = DATABASE_BINDING, "✅ Mock database substituted");

    let app_state = build_app_state(&resolver, "mock", config)?;
    info!(environment = %config.environment, "✅ AppState created");

    Ok(app_state)
}

/// Lines printed once the listener is bound.
pub fn startup_banner(config: &Config) -> Vec<String> {
    vec![
        format!("Test server running on port {}", config.port),
        "API changes successfully loaded!".to_string(),
        "Test endpoints:".to_string(),
        "  GET  /api/products/:id - Returns full configuration".to_string(),
        "  POST /api/products - Creates and returns full configuration".to_string(),
        "  PUT  /api/products/:id - Updates and returns full configuration".to_string(),
        "  DELETE /api/products/:id - Deletes product".to_string(),
    ]
}

/// Print the banner and, if enabled, the example request body.
pub fn print_startup(config: &Config) -> Result<()> {
    for line in startup_banner(config) {
        println!("{}", line);
    }

    if config.print_sample_payload {
        println!();
        println!("Example product data structure:");
        println!("{}", sample_product_json()?);
    }

    Ok(())
}

/// Wait for shutdown signal.
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}
