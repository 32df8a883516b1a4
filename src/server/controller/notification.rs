use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ApiResponse, message::UnreadCountDto, notification::NotificationDto},
    server::{
        error::AppError, middleware::auth::AuthGuard,
        service::notification::NotificationService, state::AppState,
    },
};

/// Tag for grouping notification endpoints in OpenAPI documentation
pub static NOTIFICATION_TAG: &str = "notifications";

/// All notifications for the caller, newest first.
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = NOTIFICATION_TAG,
    responses((status = 200, description = "Notifications", body = [NotificationDto])),
)]
pub async fn notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let notifications = NotificationService::new(&state.db)
        .notifications(user.id)
        .await?;
    let notifications: Vec<NotificationDto> =
        notifications.into_iter().map(|n| n.into_dto()).collect();

    Ok(Json(ApiResponse::success("Notifications", notifications)))
}

/// Unread notifications for the caller, newest first.
#[utoipa::path(
    get,
    path = "/api/notifications/unread",
    tag = NOTIFICATION_TAG,
    responses((status = 200, description = "Unread notifications", body = [NotificationDto])),
)]
pub async fn unread(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let notifications = NotificationService::new(&state.db).unread(user.id).await?;
    let notifications: Vec<NotificationDto> =
        notifications.into_iter().map(|n| n.into_dto()).collect();

    Ok(Json(ApiResponse::success("Unread notifications", notifications)))
}

/// Live unread notification count.
#[utoipa::path(
    get,
    path = "/api/notifications/unread/count",
    tag = NOTIFICATION_TAG,
    responses((status = 200, description = "Unread count", body = UnreadCountDto)),
)]
pub async fn unread_count(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let unread_count = NotificationService::new(&state.db)
        .unread_count(user.id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Unread count",
        UnreadCountDto { unread_count },
    )))
}

/// Mark one notification as read; recipient only.
#[utoipa::path(
    post,
    path = "/api/notifications/{notification_id}/read",
    tag = NOTIFICATION_TAG,
    params(("notification_id" = i32, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Marked read", body = NotificationDto),
        (status = 403, description = "Caller is not the recipient")
    ),
)]
pub async fn mark_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(notification_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let notification = NotificationService::new(&state.db)
        .mark_read(notification_id, user.id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Notification marked as read",
        notification.into_dto(),
    )))
}

/// Mark every notification as read.
#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    tag = NOTIFICATION_TAG,
    responses((status = 200, description = "All marked read")),
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    NotificationService::new(&state.db).mark_all_read(user.id).await?;

    Ok(Json(ApiResponse::<()>::success_empty(
        "All notifications marked as read",
    )))
}

/// Delete every already-read notification.
#[utoipa::path(
    delete,
    path = "/api/notifications/read",
    tag = NOTIFICATION_TAG,
    responses((status = 200, description = "Read notifications deleted")),
)]
pub async fn delete_read(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let deleted = NotificationService::new(&state.db).delete_read(user.id).await?;

    Ok(Json(ApiResponse::success(
        "Read notifications deleted",
        deleted,
    )))
}

/// Delete one notification; recipient only.
#[utoipa::path(
    delete,
    path = "/api/notifications/{notification_id}",
    tag = NOTIFICATION_TAG,
    params(("notification_id" = i32, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification deleted"),
        (status = 403, description = "Caller is not the recipient")
    ),
)]
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(notification_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    NotificationService::new(&state.db)
        .delete(notification_id, user.id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty("Notification deleted")))
}
