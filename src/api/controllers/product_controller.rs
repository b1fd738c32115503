use crate::api::extractors::AdminClaims;
use crate::api::request::{CreateProductRequest, UpdateProductRequest, UpdateProductStatusRequest};
use crate::api::response::{MessageResponse, ProductResponse};
use crate::data::models::product::{ProductCondition, ProductStatus, UpdateProduct};
use crate::security::jwt::AccessClaims;
use crate::services::errors::ProductServiceError;
use crate::services::product_service::{NewListing, ProductService};
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use std::str::FromStr;

/// List a product for sale
pub async fn add_product(
    claims: AccessClaims,
    Json(payload): Json<CreateProductRequest>,
) -> impl IntoResponse {
    let condition = match ProductCondition::from_str(&payload.condition) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse {
                    message: format!("Unknown condition: {}", payload.condition),
                }),
            )
                .into_response();
        }
    };

    let service = ProductService::new();

    let listing = NewListing {
        title: &payload.title,
        description: &payload.description,
        price: payload.price.clone(),
        condition: condition.as_str(),
        seller_id: claims.user_id(),
        category_id: payload.category_id,
        sub_category_id: payload.sub_category_id,
        age_group_id: payload.age_group_id,
        gender_id: payload.gender_id,
        color_id: payload.color_id,
        material_id: payload.material_id,
        image_urls: payload.images.clone().unwrap_or_default(),
    };

    match service.create_listing(listing).await {
        Ok(product_id) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Product listed successfully",
                "product_id": product_id,
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Listing creation failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Product creation failed").into_response()
        }
    }
}

/// Public storefront: browse active listings
pub async fn get_products() -> impl IntoResponse {
    let service = ProductService::new();

    match service.get_active_listings().await {
        Ok(listings) => {
            let response: Vec<ProductResponse> =
                listings.into_iter().map(ProductResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// The caller's own listings, sold ones included
pub async fn get_my_listings(claims: AccessClaims) -> impl IntoResponse {
    let service = ProductService::new();

    match service.get_my_listings(claims.user_id()).await {
        Ok(listings) => {
            let response: Vec<ProductResponse> =
                listings.into_iter().map(ProductResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

pub async fn get_product_by_id(Path(product_id): Path<i32>) -> impl IntoResponse {
    let service = ProductService::new();

    match service.get_listing(product_id).await {
        Ok(listing) => (StatusCode::OK, Json(ProductResponse::from(listing))).into_response(),
        Err(ProductServiceError::ProductNotFound) => {
            (StatusCode::NOT_FOUND, "Product not found").into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Owner edit: title, description, price, condition
pub async fn update_product(
    claims: AccessClaims,
    Path(product_id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> impl IntoResponse {
    let condition = match payload.condition.as_deref() {
        Some(raw) => match ProductCondition::from_str(raw) {
            Ok(value) => Some(value),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(MessageResponse {
                        message: format!("Unknown condition: {}", raw),
                    }),
                )
                    .into_response();
            }
        },
        None => None,
    };

    if payload.title.is_none()
        && payload.description.is_none()
        && payload.price.is_none()
        && condition.is_none()
    {
        return (StatusCode::BAD_REQUEST, "Nothing to update").into_response();
    }

    let changes = UpdateProduct {
        title: payload.title.as_deref(),
        description: payload.description.as_deref(),
        price: payload.price.clone(),
        condition: condition.map(|c| c.as_str()),
    };

    let service = ProductService::new();

    match service
        .update_listing(product_id, claims.user_id(), changes)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Listing updated".to_string(),
            }),
        )
            .into_response(),
        Err(e) => listing_write_error(e),
    }
}

/// Owner delete: active and pending listings only
pub async fn delete_product(
    claims: AccessClaims,
    Path(product_id): Path<i32>,
) -> impl IntoResponse {
    let service = ProductService::new();

    match service.delete_listing(product_id, claims.user_id()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Listing deleted".to_string(),
            }),
        )
            .into_response(),
        Err(e) => listing_write_error(e),
    }
}

/// Admin moderation: approve or reject a listing
pub async fn update_product_status(
    _claims: AdminClaims,
    Path(product_id): Path<i32>,
    Json(payload): Json<UpdateProductStatusRequest>,
) -> impl IntoResponse {
    let new_status = match ProductStatus::from_str(&payload.status) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse {
                    message: format!("Unknown product status: {}", payload.status),
                }),
            )
                .into_response();
        }
    };

    let service = ProductService::new();

    match service.set_listing_status(product_id, new_status).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Status updated".to_string(),
            }),
        )
            .into_response(),
        Err(ProductServiceError::ProductNotFound) => {
            (StatusCode::NOT_FOUND, "Product not found").into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

fn listing_write_error(e: ProductServiceError) -> axum::response::Response {
    match e {
        ProductServiceError::ProductNotFound => {
            (StatusCode::NOT_FOUND, "Product not found").into_response()
        }
        ProductServiceError::NotListingOwner => {
            (StatusCode::FORBIDDEN, e.to_string()).into_response()
        }
        ProductServiceError::ListingUnavailable => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
