use crate::api::config::Config;
use crate::data::models::user::{User, UserRole};
use crate::security::errors::AuthError;
use serde::{Deserialize, Serialize};

/// Signs and verifies the session tokens carried in the `x-access-token`
/// header. Token issuance (the OTP login flow) lives outside this service.
pub struct JwtService;

impl JwtService {
    pub fn new() -> Self {
        JwtService
    }

    pub async fn generate_token(&self, user: &User) -> Result<String, AuthError> {
        let curr_time = chrono::Utc::now().timestamp() as usize;
        let config = Config::default();

        let claims = AccessClaims {
            sub: user.user_id,
            role: user.role.clone(),
            iat: curr_time,
            exp: curr_time + (config.jwt_expiration_minutes * 60) as usize,
        };

        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(config.jwt_secret.as_ref()),
        )
        .map_err(|_| AuthError::TokenCreationError)
    }

    pub async fn decode_token<T: for<'de> Deserialize<'de>>(
        &self,
        token: &str,
    ) -> Result<T, AuthError> {
        let validation = jsonwebtoken::Validation::default();

        let token_data = jsonwebtoken::decode::<T>(
            token,
            &jsonwebtoken::DecodingKey::from_secret(Config::default().jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AuthError::InvalidToken)?;

        Ok(token_data.claims)
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: i32,
    /// Account role, as stored on the user row
    pub role: String,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
}

impl AccessClaims {
    pub fn user_id(&self) -> i32 {
        self.sub
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role.parse::<UserRole>(), Ok(UserRole::Admin))
    }
}
