use crate::api::request::AddCartItemRequest;
use crate::api::response::{CartItemResponse, MessageResponse};
use crate::security::jwt::AccessClaims;
use crate::services::cart_service::CartService;
use crate::services::errors::CartServiceError;
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Add a product to the caller's cart (re-adding bumps the quantity)
pub async fn add_to_cart(
    claims: AccessClaims,
    Json(payload): Json<AddCartItemRequest>,
) -> impl IntoResponse {
    let service = CartService::new();
    let quantity = payload.quantity.unwrap_or(1);

    match service
        .add_to_cart(claims.user_id(), payload.product_id, quantity)
        .await
    {
        Ok(()) => (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "Added to cart".to_string(),
            }),
        )
            .into_response(),
        Err(e @ CartServiceError::InvalidQuantity) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(CartServiceError::ProductNotFound) => {
            (StatusCode::NOT_FOUND, "Product not found").into_response()
        }
        Err(e @ CartServiceError::ProductUnavailable(_)) => (
            StatusCode::CONFLICT,
            Json(MessageResponse {
                message: e.to_string(),
            }),
        )
            .into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// The caller's cart with product details
pub async fn get_cart(claims: AccessClaims) -> impl IntoResponse {
    let service = CartService::new();

    match service.get_cart(claims.user_id()).await {
        Ok(lines) => {
            let response: Vec<CartItemResponse> =
                lines.into_iter().map(CartItemResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Empty the caller's cart
pub async fn clear_cart(claims: AccessClaims) -> impl IntoResponse {
    let service = CartService::new();

    match service.clear_cart(claims.user_id()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Cart cleared".to_string(),
            }),
        )
            .into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Drop one product from the caller's cart
pub async fn remove_from_cart(
    claims: AccessClaims,
    Path(product_id): Path<i32>,
) -> impl IntoResponse {
    let service = CartService::new();

    match service.remove_from_cart(claims.user_id(), product_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Removed from cart".to_string(),
            }),
        )
            .into_response(),
        Err(e @ CartServiceError::ItemNotInCart) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
