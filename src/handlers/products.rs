use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::error::Result;
use crate::handlers::extractors::{Actor, ValidatedJson};
use crate::handlers::response::{ApiResponse, Created};
use crate::models::product::{ProductConfiguration, ProductPayload, ProductUpdate};

/// Body of a successful delete
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedProduct {
    pub id: String,
}

/// Full product configuration
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Full product configuration", body = ProductConfiguration),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductConfiguration>>> {
    let config = state.product_service.get_configuration(&id).await?;
    Ok(Json(ApiResponse::success(config)))
}

/// Create a product and return its full configuration
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = ProductConfiguration),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(payload): ValidatedJson<ProductPayload>,
) -> Result<Created<ProductConfiguration>> {
    info!(
        product_id = %payload.product_id,
        sections = payload.sections.len(),
        user = ?actor.as_deref(),
        "Creating product"
    );

    let config = state
        .product_service
        .create(payload, actor.as_deref())
        .await?;
    Ok(Created(config))
}

/// Update a product and return its full configuration
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product identifier")),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Product updated", body = ProductConfiguration),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
    ValidatedJson(update): ValidatedJson<ProductUpdate>,
) -> Result<Json<ApiResponse<ProductConfiguration>>> {
    let config = state
        .product_service
        .update(&id, update, actor.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(config)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product deleted", body = DeletedProduct),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    actor: Actor,
) -> Result<Json<ApiResponse<DeletedProduct>>> {
    let row = state.product_service.delete(&id, actor.as_deref()).await?;
    let id = row
        .get("id")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or(id);

    Ok(Json(ApiResponse::success_with_message(
        DeletedProduct { id },
        "Product deleted",
    )))
}
