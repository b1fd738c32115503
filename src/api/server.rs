use crate::api::config::Config;
use crate::api::routes::{cart_routes, order_routes, product_routes, user_routes, wallet_routes};
use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub async fn start() {
    let config = Config::new();

    let cors_layer = CorsLayer::new().allow_origin(Any);

    let router = Router::new()
        .route("/api", get(|| async { "Toybox API is running!" }))
        .nest("/api/orders", order_routes::routes())
        .nest("/api/products", product_routes::routes())
        .nest("/api/cart", cart_routes::routes())
        .nest("/api/wallet", wallet_routes::routes())
        .nest("/api/users", user_routes::routes())
        .layer(cors_layer)
        .with_state::<()>(());

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], config.server_port)))
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running on http://127.0.0.1:{}", config.server_port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start the server");
}
