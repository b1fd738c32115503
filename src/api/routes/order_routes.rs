use crate::api::controllers::order_controller;
use axum::Router;
use axum::routing::{get, post, put};

pub fn routes() -> Router {
    Router::new()
        .route("/", post(order_controller::place_order))
        .route("/", get(order_controller::get_my_orders))
        .route("/admin/all", get(order_controller::get_all_orders_admin))
        .route(
            "/admin/{id}/status",
            put(order_controller::update_order_status),
        )
}
