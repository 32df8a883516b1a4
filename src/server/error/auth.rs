use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ApiResponse;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization: Bearer` header was present on a protected route.
    #[error("Request is missing a bearer token")]
    MissingToken,

    /// The bearer token failed signature or expiry validation.
    #[error("Bearer token failed validation")]
    InvalidToken,

    /// Login credentials did not match a user record.
    ///
    /// Deliberately indistinguishable between unknown email and wrong
    /// password in the client-facing message.
    #[error("Credentials did not match")]
    WrongCredentials,

    /// The account exists but has been deactivated.
    #[error("Account for user {0} is deactivated")]
    AccountDisabled(i32),

    /// A validated token referenced a user id that no longer exists.
    #[error("User {0} from token not found in database")]
    UserNotInDatabase(i32),

    /// The user is authenticated but lacks the required permission.
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// Client-facing messages stay generic; the full error is logged at debug
/// level for diagnostics.
///
/// # Returns
/// - 401 Unauthorized - Missing/invalid tokens and failed logins
/// - 403 Forbidden - Disabled accounts and missing permissions
/// - 404 Not Found - Token subject no longer present
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("Auth failure: {}", self);

        match self {
            Self::MissingToken | Self::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<()>::error(
                    "Authentication required".to_string(),
                )),
            )
                .into_response(),
            Self::WrongCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<()>::error(
                    "Invalid email or password".to_string(),
                )),
            )
                .into_response(),
            Self::AccountDisabled(_) => (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::<()>::error(
                    "This account has been deactivated".to_string(),
                )),
            )
                .into_response(),
            Self::UserNotInDatabase(_) => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("User not found".to_string())),
            )
                .into_response(),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::<()>::error(
                    "You don't have permission to perform this action".to_string(),
                )),
            )
                .into_response(),
        }
    }
}
