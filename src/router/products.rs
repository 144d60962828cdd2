use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;
use crate::handlers::products;

/// `/api/products` routes, mounted under `/api` by [`super::build_router`].
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(products::create_product))
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}
