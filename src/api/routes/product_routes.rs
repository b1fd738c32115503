use crate::api::controllers::product_controller;
use axum::Router;
use axum::routing::{delete, get, post, put};

pub fn routes() -> Router {
    Router::new()
        .route("/", post(product_controller::add_product))
        .route("/", get(product_controller::get_products))
        .route("/my-listings", get(product_controller::get_my_listings))
        .route("/{id}", get(product_controller::get_product_by_id))
        .route("/{id}", put(product_controller::update_product))
        .route("/{id}", delete(product_controller::delete_product))
        .route("/{id}/status", put(product_controller::update_product_status))
}
