use crate::api::controllers::wallet_controller;
use axum::Router;
use axum::routing::{get, post};

pub fn routes() -> Router {
    Router::new()
        .route("/{user_id}", get(wallet_controller::get_wallet))
        .route("/credit", post(wallet_controller::credit))
        .route("/debit", post(wallet_controller::debit))
        .route("/transfer", post(wallet_controller::transfer))
}
