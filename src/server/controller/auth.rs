use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ApiResponse,
        auth::{
            AuthResponseDto, ContactDto, ForgotPasswordDto, LoginDto, RegisterDto,
            ResetPasswordDto, VerifyResetTokenDto,
        },
    },
    server::{error::AppError, service::auth::AuthService, state::AppState},
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

fn to_auth_dto(session: crate::server::service::auth::AuthenticatedSession) -> AuthResponseDto {
    AuthResponseDto {
        token: session.token,
        token_type: "Bearer".to_string(),
        user: session.user.into_auth_user_dto(),
    }
}

/// Register a new account.
///
/// Rejects duplicate emails and issues a bearer token bound to the new
/// user's identity.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = AuthResponseDto),
        (status = 400, description = "Missing name, email or password"),
        (status = 409, description = "Email already registered")
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::new(&state.db, &state.tokens)
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "User registered successfully",
            to_auth_dto(session),
        )),
    ))
}

/// Log in with email and password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = AuthResponseDto),
        (status = 401, description = "Invalid email or password"),
        (status = 403, description = "Account deactivated")
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::new(&state.db, &state.tokens)
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(
        "Login successful",
        to_auth_dto(session),
    )))
}

/// Log out.
///
/// Tokens are stateless, so this only exists for API symmetry; clients drop
/// the token locally.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses((status = 200, description = "Logged out")),
)]
pub async fn logout() -> impl IntoResponse {
    Json(ApiResponse::<()>::success_empty("Logged out successfully"))
}

/// Start a password reset.
///
/// Generates a 6-digit code with a 15-minute expiry and attempts email
/// delivery; the token id is returned regardless of the delivery outcome.
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = AUTH_TAG,
    request_body = ForgotPasswordDto,
    responses(
        (status = 200, description = "Reset code generated"),
        (status = 404, description = "No account with that email")
    ),
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let token_id = AuthService::new(&state.db, &state.tokens)
        .request_password_reset(&payload.email, &state.email)
        .await?;

    Ok(Json(ApiResponse::success(
        "Password reset code generated",
        token_id,
    )))
}

/// Check a reset code without consuming it.
#[utoipa::path(
    post,
    path = "/api/auth/verify-reset-token",
    tag = AUTH_TAG,
    request_body = VerifyResetTokenDto,
    responses(
        (status = 200, description = "Token is valid"),
        (status = 400, description = "Invalid or expired token")
    ),
)]
pub async fn verify_reset_token(
    State(state): State<AppState>,
    Json(payload): Json<VerifyResetTokenDto>,
) -> Result<impl IntoResponse, AppError> {
    let valid = AuthService::new(&state.db, &state.tokens)
        .verify_reset_token(&payload.email, &payload.token)
        .await?;

    if valid {
        Ok(Json(ApiResponse::<()>::success_empty("Token is valid")).into_response())
    } else {
        Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("Invalid or expired token")),
        )
            .into_response())
    }
}

/// Reset the password with a valid code. Each code works exactly once.
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = AUTH_TAG,
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password reset"),
        (status = 409, description = "Invalid, expired or already-used code")
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, &state.tokens)
        .reset_password(&payload.email, &payload.token, &payload.new_password)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty(
        "Password reset successfully",
    )))
}

/// Relay a contact form submission to the site admin. Delivery is
/// best-effort and never blocks the response.
#[utoipa::path(
    post,
    path = "/api/auth/contact",
    tag = AUTH_TAG,
    request_body = ContactDto,
    responses((status = 200, description = "Message accepted")),
)]
pub async fn contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactDto>,
) -> Result<impl IntoResponse, AppError> {
    if payload.message.trim().is_empty() {
        return Err(AppError::BadRequest("Message is required".to_string()));
    }

    state.email.send_contact_form(
        payload.name,
        payload.email,
        payload.subject,
        payload.message,
    );

    Ok(Json(ApiResponse::<()>::success_empty(
        "Message sent successfully",
    )))
}
