use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::broadcast;

use crate::{
    model::{
        api::ApiResponse,
        group_chat::{GroupChatMessageDto, SendGroupMessageDto},
    },
    server::{
        data::group::ActivityGroupRepository,
        error::AppError,
        middleware::auth,
        middleware::auth::AuthGuard,
        service::group_chat::GroupChatService,
        state::AppState,
    },
};

/// Tag for grouping group chat endpoints in OpenAPI documentation
pub static GROUP_CHAT_TAG: &str = "group-chat";

/// Maximum chat message length, enforced at this boundary.
const MAX_MESSAGE_LEN: usize = 1000;

#[derive(Deserialize)]
pub struct RecentParams {
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    50
}

/// Auth for the websocket handshake; browsers cannot set headers on upgrade
/// requests, so the token travels as a query parameter.
#[derive(Deserialize)]
pub struct WsAuthParams {
    pub token: String,
}

/// Full chat history of a group, oldest first; members only.
#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/chat",
    tag = GROUP_CHAT_TAG,
    params(("group_id" = i32, Path, description = "Group id")),
    responses(
        (status = 200, description = "Messages", body = [GroupChatMessageDto]),
        (status = 403, description = "Caller is not a member")
    ),
)]
pub async fn group_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let views = GroupChatService::new(&state.db)
        .messages(group_id, user.id)
        .await?;
    let messages: Vec<GroupChatMessageDto> = views.into_iter().map(|v| v.into_dto()).collect();

    Ok(Json(ApiResponse::success("Messages", messages)))
}

/// The most recent messages of a group, newest first; members only.
#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/chat/recent",
    tag = GROUP_CHAT_TAG,
    params(
        ("group_id" = i32, Path, description = "Group id"),
        ("limit" = Option<u64>, Query, description = "Maximum messages (default: 50)")
    ),
    responses((status = 200, description = "Recent messages", body = [GroupChatMessageDto])),
)]
pub async fn recent_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
    Query(params): Query<RecentParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let views = GroupChatService::new(&state.db)
        .recent_messages(group_id, user.id, params.limit)
        .await?;
    let messages: Vec<GroupChatMessageDto> = views.into_iter().map(|v| v.into_dto()).collect();

    Ok(Json(ApiResponse::success("Recent messages", messages)))
}

/// Send a chat message; members only. After the write the message is
/// broadcast to the group's websocket subscribers, fire-and-forget.
#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/chat",
    tag = GROUP_CHAT_TAG,
    params(("group_id" = i32, Path, description = "Group id")),
    request_body = SendGroupMessageDto,
    responses(
        (status = 201, description = "Message sent", body = GroupChatMessageDto),
        (status = 403, description = "Caller is not a member")
    ),
)]
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(group_id): Path<i32>,
    Json(payload): Json<SendGroupMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let content = payload.message.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }
    if content.chars().count() > MAX_MESSAGE_LEN {
        return Err(AppError::BadRequest(format!(
            "Message cannot exceed {} characters",
            MAX_MESSAGE_LEN
        )));
    }

    let view = GroupChatService::new(&state.db)
        .send_message(group_id, user.id, content.to_string())
        .await?;

    let dto = view.into_dto();
    state.chat.publish(group_id, dto.clone()).await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Message sent", dto)),
    ))
}

/// Delete a chat message; author only.
#[utoipa::path(
    delete,
    path = "/api/chat/messages/{message_id}",
    tag = GROUP_CHAT_TAG,
    params(("message_id" = i32, Path, description = "Message id")),
    responses(
        (status = 200, description = "Message deleted"),
        (status = 403, description = "Caller is not the author")
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

    GroupChatService::new(&state.db)
        .delete_message(message_id, user.id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty("Message deleted")))
}

/// Subscribe to a group's chat broadcast over a websocket.
///
/// The handshake validates the token and the caller's current membership;
/// afterwards every message persisted in the group streams to the socket as
/// JSON. No acknowledgments, and lagging clients skip messages.
pub async fn group_chat_ws(
    State(state): State<AppState>,
    Path(group_id): Path<i32>,
    Query(params): Query<WsAuthParams>,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    let user = auth::authenticate_token(&state.db, &state.tokens, &params.token, &[]).await?;

    let groups = ActivityGroupRepository::new(&state.db);
    groups
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;
    if !groups.is_member(group_id, user.id).await? {
        return Err(AppError::Forbidden(
            "You must be a member of the group to use its chat".to_string(),
        ));
    }

    let receiver = state.chat.subscribe(group_id).await;

    Ok(ws.on_upgrade(move |socket| stream_messages(socket, receiver)))
}

/// Pumps broadcast messages into the socket until either side goes away.
async fn stream_messages(
    mut socket: WebSocket,
    mut receiver: broadcast::Receiver<GroupChatMessageDto>,
) {
    loop {
        tokio::select! {
            broadcast = receiver.recv() => match broadcast {
                Ok(dto) => {
                    let Ok(text) = serde_json::to_string(&dto) else {
                        continue;
                    };
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                // Slow consumer: skip to the current position.
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!("Chat subscriber lagged, skipped {} messages", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                // Inbound frames are ignored; sends go through the REST endpoint.
                Some(Ok(_)) => {}
                _ => break,
            },
        }
    }
}
