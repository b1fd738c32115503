use crate::api::extractors::AdminClaims;
use crate::api::request::{PlaceOrderRequest, UpdateOrderStatusRequest};
use crate::api::response::{
    AdminOrderResponse, MessageResponse, OrderResponse, OrderSummaryResponse, PlaceOrderResponse,
};
use crate::data::database::Database;
use crate::data::models::order::OrderStatus;
use crate::security::jwt::AccessClaims;
use crate::services::checkout_service::CheckoutService;
use crate::services::errors::{CheckoutError, OrderServiceError};
use crate::services::order_service::OrderService;
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::str::FromStr;

/// Convert the caller's cart into an order
pub async fn place_order(
    claims: AccessClaims,
    Json(payload): Json<PlaceOrderRequest>,
) -> impl IntoResponse {
    let service = CheckoutService::new(Database::new().await);

    match service.place_order(claims.user_id(), &payload.address).await {
        Ok(order) => (
            StatusCode::CREATED,
            Json(PlaceOrderResponse {
                message: "Order placed successfully!".to_string(),
                order_id: order.order_id,
            }),
        )
            .into_response(),
        Err(e @ CheckoutError::MissingAddress) | Err(e @ CheckoutError::EmptyCart) => (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse {
                message: e.to_string(),
            }),
        )
            .into_response(),
        Err(e @ CheckoutError::ProductUnavailable(_)) => (
            StatusCode::CONFLICT,
            Json(MessageResponse {
                message: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Checkout failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// The caller's own order history
pub async fn get_my_orders(claims: AccessClaims) -> impl IntoResponse {
    let service = OrderService::new();

    match service.get_user_orders(claims.user_id()).await {
        Ok(orders) => {
            let response: Vec<OrderResponse> =
                orders.into_iter().map(OrderResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Admin: all orders with purchaser identity
pub async fn get_all_orders_admin(_claims: AdminClaims) -> impl IntoResponse {
    let service = OrderService::new();

    match service.get_all_orders_admin().await {
        Ok(orders) => {
            let response: Vec<AdminOrderResponse> =
                orders.into_iter().map(AdminOrderResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Admin: advance an order along the fulfilment workflow
pub async fn update_order_status(
    claims: AdminClaims,
    Path(order_id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> impl IntoResponse {
    tracing::info!(
        "Admin {} setting order {} to {}",
        claims.0.user_id(),
        order_id,
        payload.status
    );

    let new_status = match OrderStatus::from_str(&payload.status) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse {
                    message: format!("Unknown order status: {}", payload.status),
                }),
            )
                .into_response();
        }
    };

    let service = OrderService::new();

    match service.update_order_status(order_id, new_status).await {
        Ok(order) => (StatusCode::OK, Json(OrderSummaryResponse::from(order))).into_response(),
        Err(OrderServiceError::OrderNotFound) => {
            (StatusCode::NOT_FOUND, "Order not found").into_response()
        }
        Err(e @ OrderServiceError::InvalidStatusTransition) => (
            StatusCode::CONFLICT,
            Json(MessageResponse {
                message: e.to_string(),
            }),
        )
            .into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
