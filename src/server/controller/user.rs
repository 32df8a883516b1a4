use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ApiResponse,
        user::{UpdateProfileDto, UserProfileDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::user::UpdateProfileParams,
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping profile endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Get the caller's own profile with friend and group counts.
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Profile", body = UserProfileDto),
        (status = 401, description = "Not authenticated")
    ),
)]
pub async fn my_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let profile = UserService::new(&state.db).profile(user.id).await?;

    Ok(Json(ApiResponse::success("Profile", profile.into_dto())))
}

/// Get another user's profile.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Profile", body = UserProfileDto),
        (status = 404, description = "User not found")
    ),
)]
pub async fn user_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let profile = UserService::new(&state.db).profile(user_id).await?;

    Ok(Json(ApiResponse::success("Profile", profile.into_dto())))
}

/// Partially update the caller's profile. Absent fields keep their stored
/// values.
#[utoipa::path(
    put,
    path = "/api/profile",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = UserProfileDto),
        (status = 401, description = "Not authenticated")
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let profile = UserService::new(&state.db)
        .update_profile(user.id, UpdateProfileParams::from_dto(payload))
        .await?;

    Ok(Json(ApiResponse::success(
        "Profile updated",
        profile.into_dto(),
    )))
}

/// Delete a user account and all its dependent rows. Admin only.
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Account deleted"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "User not found")
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let acting = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    UserService::new(&state.db).delete_user(&acting, user_id).await?;

    Ok(Json(ApiResponse::<()>::success_empty("User deleted")))
}
