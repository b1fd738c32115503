use crate::api::extractors::AdminClaims;
use crate::api::request::UpdateUserStatusRequest;
use crate::api::response::{MessageResponse, UserResponse};
use crate::services::errors::UserServiceError;
use crate::services::user_service::UserService;
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Admin: list storefront accounts (buyers and sellers)
pub async fn get_all_users(_claims: AdminClaims) -> impl IntoResponse {
    let service = UserService::new();

    match service.get_storefront_users().await {
        Ok(users) => {
            let response: Vec<UserResponse> =
                users.into_iter().map(UserResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Admin: ban or unban an account
pub async fn update_user_status(
    _claims: AdminClaims,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateUserStatusRequest>,
) -> impl IntoResponse {
    let service = UserService::new();

    match service.set_user_active(user_id, payload.is_active).await {
        Ok(()) => {
            let verdict = if payload.is_active {
                "Activated"
            } else {
                "Banned"
            };
            (
                StatusCode::OK,
                Json(MessageResponse {
                    message: format!("User {} successfully", verdict),
                }),
            )
                .into_response()
        }
        Err(UserServiceError::UserNotFound) => {
            (StatusCode::NOT_FOUND, "User not found").into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
