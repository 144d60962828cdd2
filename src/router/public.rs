//! Routes outside the product API: health and the OpenAPI document.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::handlers::{self, health};
use crate::models::product;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(title = "Product Configuration API", version = "0.1.0"),
    paths(
        health::health_check,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
    ),
    components(schemas(
        health::HealthStatus,
        handlers::products::DeletedProduct,
        product::Product,
        product::CustomVariable,
        product::Table,
        product::Section,
        product::Parameter,
        product::SectionConfiguration,
        product::ProductConfiguration,
        product::ParameterPayload,
        product::SectionPayload,
        product::ProductPayload,
        product::ProductUpdate,
    )),
    tags(
        (name = "products", description = "Product configuration CRUD"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Build routes that sit beside the product API.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
}
