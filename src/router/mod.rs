//! Router configuration.

use std::time::Duration;

use axum::{http::StatusCode, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::app_state::AppState;
use crate::middleware::request_logger_middleware;

pub mod products;
pub mod public;

pub use products::product_routes;
pub use public::{public_routes, ApiDoc};

/// Build the application router around an already-resolved [`AppState`].
pub fn build_router(app_state: AppState) -> Router {
    let timeout = Duration::from_secs(app_state.config.request_timeout);

    public_routes()
        .nest("/api", product_routes())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_logger_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    timeout,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
