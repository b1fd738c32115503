use crate::api::controllers::user_controller;
use axum::Router;
use axum::routing::{get, put};

pub fn routes() -> Router {
    Router::new()
        .route("/", get(user_controller::get_all_users))
        .route("/{id}/status", put(user_controller::update_user_status))
}
