use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ApiResponse,
        message::{ConversationDto, DirectMessageDto, SendDirectMessageDto, UnreadCountDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard,
        service::direct_message::DirectMessageService, state::AppState,
    },
};

/// Tag for grouping direct message endpoints in OpenAPI documentation
pub static MESSAGE_TAG: &str = "messages";

/// Maximum direct message length, enforced at this boundary.
const MAX_MESSAGE_LEN: usize = 1000;

/// Send a direct message to a friend.
///
/// Content is bounded to 1000 characters here; the friendship requirement is
/// enforced by the service. A notification for the receiver is attempted
/// after the write and its failure never fails the send.
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = MESSAGE_TAG,
    request_body = SendDirectMessageDto,
    responses(
        (status = 201, description = "Message sent", body = DirectMessageDto),
        (status = 400, description = "Empty or oversized content"),
        (status = 409, description = "Sender and receiver are not friends")
    ),
)]
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SendDirectMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let content = payload.content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }
    if content.chars().count() > MAX_MESSAGE_LEN {
        return Err(AppError::BadRequest(format!(
            "Message cannot exceed {} characters",
            MAX_MESSAGE_LEN
        )));
    }

    let view = DirectMessageService::new(&state.db)
        .send_message(user.id, payload.receiver_id, content.to_string())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Message sent", view.into_dto(user.id))),
    ))
}

/// Full conversation with another user, oldest first. Friends only.
#[utoipa::path(
    get,
    path = "/api/messages/conversation/{user_id}",
    tag = MESSAGE_TAG,
    params(("user_id" = i32, Path, description = "Conversation partner")),
    responses(
        (status = 200, description = "Messages", body = [DirectMessageDto]),
        (status = 409, description = "Not friends")
    ),
)]
pub async fn conversation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let views = DirectMessageService::new(&state.db)
        .conversation(user.id, user_id)
        .await?;
    let messages: Vec<DirectMessageDto> =
        views.into_iter().map(|v| v.into_dto(user.id)).collect();

    Ok(Json(ApiResponse::success("Conversation", messages)))
}

/// The caller's inbox: one entry per past conversation partner, most recent
/// first.
#[utoipa::path(
    get,
    path = "/api/messages/conversations",
    tag = MESSAGE_TAG,
    responses((status = 200, description = "Conversations", body = [ConversationDto])),
)]
pub async fn conversations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let summaries = DirectMessageService::new(&state.db)
        .all_conversations(user.id)
        .await?;
    let conversations: Vec<ConversationDto> =
        summaries.into_iter().map(|s| s.into_dto()).collect();

    Ok(Json(ApiResponse::success("Conversations", conversations)))
}

/// Unread messages addressed to the caller, newest first.
#[utoipa::path(
    get,
    path = "/api/messages/unread",
    tag = MESSAGE_TAG,
    responses((status = 200, description = "Unread messages", body = [DirectMessageDto])),
)]
pub async fn unread_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let views = DirectMessageService::new(&state.db)
        .unread_messages(user.id)
        .await?;
    let messages: Vec<DirectMessageDto> =
        views.into_iter().map(|v| v.into_dto(user.id)).collect();

    Ok(Json(ApiResponse::success("Unread messages", messages)))
}

/// Live unread total for the caller.
#[utoipa::path(
    get,
    path = "/api/messages/unread/count",
    tag = MESSAGE_TAG,
    responses((status = 200, description = "Unread count", body = UnreadCountDto)),
)]
pub async fn unread_count(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let unread_count = DirectMessageService::new(&state.db)
        .unread_count(user.id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Unread count",
        UnreadCountDto { unread_count },
    )))
}

/// Mark every message from one sender as read.
#[utoipa::path(
    post,
    path = "/api/messages/conversation/{user_id}/read",
    tag = MESSAGE_TAG,
    params(("user_id" = i32, Path, description = "Sender whose messages to mark")),
    responses((status = 200, description = "Conversation marked read")),
)]
pub async fn mark_conversation_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    DirectMessageService::new(&state.db)
        .mark_conversation_read(user.id, user_id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty(
        "Conversation marked as read",
    )))
}

/// Mark a single message as read; receiver only.
#[utoipa::path(
    post,
    path = "/api/messages/{message_id}/read",
    tag = MESSAGE_TAG,
    params(("message_id" = i32, Path, description = "Message id")),
    responses(
        (status = 200, description = "Message marked read"),
        (status = 403, description = "Caller is not the receiver")
    ),
)]
pub async fn mark_message_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    DirectMessageService::new(&state.db)
        .mark_message_read(message_id, user.id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty("Message marked as read")))
}

/// Delete a single message; sender only.
#[utoipa::path(
    delete,
    path = "/api/messages/{message_id}",
    tag = MESSAGE_TAG,
    params(("message_id" = i32, Path, description = "Message id")),
    responses(
        (status = 200, description = "Message deleted"),
        (status = 403, description = "Caller is not the sender")
    ),
)]
pub async fn delete_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    DirectMessageService::new(&state.db)
        .delete_message(message_id, user.id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty("Message deleted")))
}

/// Delete the whole conversation with another user.
#[utoipa::path(
    delete,
    path = "/api/messages/conversation/{user_id}",
    tag = MESSAGE_TAG,
    params(("user_id" = i32, Path, description = "Conversation partner")),
    responses((status = 200, description = "Conversation deleted")),
)]
pub async fn delete_conversation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    DirectMessageService::new(&state.db)
        .delete_conversation(user.id, user_id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty("Conversation deleted")))
}
