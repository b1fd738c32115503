use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failures raised before a request reaches a service, mainly by the
/// token extractor.
#[derive(Debug)]
pub enum ApiError {
    /// No `x-access-token` header on a protected route.
    MissingToken,
    /// The token did not verify.
    Unauthorized,
    /// Verified token, but the route needs the admin role.
    AdminOnly,
}

impl std::error::Error for ApiError {}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingToken => {
                write!(f, "No token provided! Add 'x-access-token' to headers.")
            }
            ApiError::Unauthorized => write!(f, "Unauthorized! Invalid Token."),
            ApiError::AdminOnly => write!(f, "Admin access required"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::MissingToken => StatusCode::FORBIDDEN,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::AdminOnly => StatusCode::FORBIDDEN,
        };
        (status, self.to_string()).into_response()
    }
}
