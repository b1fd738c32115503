use crate::api::controllers::cart_controller;
use axum::Router;
use axum::routing::{delete, get, post};

pub fn routes() -> Router {
    Router::new()
        .route("/", post(cart_controller::add_to_cart))
        .route("/", get(cart_controller::get_cart))
        .route("/", delete(cart_controller::clear_cart))
        .route("/{product_id}", delete(cart_controller::remove_from_cart))
}
