use crate::api::errors::ApiError;
use crate::security::jwt::{AccessClaims, JwtService};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// The session token travels in the custom `x-access-token` header, the
/// convention the mobile and admin clients both use.
const ACCESS_TOKEN_HEADER: &str = "x-access-token";

impl FromRequestParts<()> for AccessClaims {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &()) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(ACCESS_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::MissingToken)?;

        let tokenizer = JwtService::new();

        let claims = tokenizer
            .decode_token::<AccessClaims>(token)
            .await
            .map_err(|e| {
                tracing::error!("Token decoding error: {:?}", e);
                ApiError::Unauthorized
            })?;

        Ok(claims)
    }
}

/// Claims wrapper that additionally requires the admin role.
#[derive(Debug)]
pub struct AdminClaims(pub AccessClaims);

impl FromRequestParts<()> for AdminClaims {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &()) -> Result<Self, Self::Rejection> {
        let claims = AccessClaims::from_request_parts(parts, state).await?;

        if !claims.is_admin() {
            return Err(ApiError::AdminOnly);
        }

        Ok(AdminClaims(claims))
    }
}
