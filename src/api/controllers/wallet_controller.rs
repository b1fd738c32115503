use crate::api::request::{WalletAmountRequest, WalletTransferRequest};
use crate::api::response::{MessageResponse, WalletResponse};
use crate::security::jwt::AccessClaims;
use crate::services::errors::WalletServiceError;
use crate::services::wallet_service::WalletService;
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;

pub async fn get_wallet(_claims: AccessClaims, Path(user_id): Path<i32>) -> impl IntoResponse {
    let service = WalletService::new();

    match service.get_wallet(user_id).await {
        Ok(wallet) => (StatusCode::OK, Json(WalletResponse::from(wallet))).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

pub async fn credit(
    _claims: AccessClaims,
    Json(payload): Json<WalletAmountRequest>,
) -> impl IntoResponse {
    let service = WalletService::new();

    match service.credit(payload.user_id, payload.amount).await {
        Ok(wallet) => (StatusCode::OK, Json(WalletResponse::from(wallet))).into_response(),
        Err(e) => wallet_error(e),
    }
}

pub async fn debit(
    _claims: AccessClaims,
    Json(payload): Json<WalletAmountRequest>,
) -> impl IntoResponse {
    let service = WalletService::new();

    match service.debit(payload.user_id, payload.amount).await {
        Ok(wallet) => (StatusCode::OK, Json(WalletResponse::from(wallet))).into_response(),
        Err(e) => wallet_error(e),
    }
}

pub async fn transfer(
    _claims: AccessClaims,
    Json(payload): Json<WalletTransferRequest>,
) -> impl IntoResponse {
    let service = WalletService::new();

    match service
        .transfer(payload.from_user_id, payload.to_user_id, payload.amount)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Transfer complete".to_string(),
            }),
        )
            .into_response(),
        Err(e) => wallet_error(e),
    }
}

fn wallet_error(e: WalletServiceError) -> axum::response::Response {
    match e {
        WalletServiceError::InvalidAmount => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        WalletServiceError::InsufficientFunds => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        WalletServiceError::DatabaseError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}
