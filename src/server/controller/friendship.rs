use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ApiResponse,
        friendship::{FriendDto, FriendRequestDto, FriendshipStatusDto, SendFriendRequestDto},
        user::UserSummaryDto,
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::friendship::FriendshipService,
        state::AppState,
    },
};

/// Tag for grouping friendship endpoints in OpenAPI documentation
pub static FRIENDSHIP_TAG: &str = "friendship";

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Send a friend request.
///
/// Fails for self-requests and whenever any relationship row already exists
/// between the pair, whatever its status.
#[utoipa::path(
    post,
    path = "/api/friends/requests",
    tag = FRIENDSHIP_TAG,
    request_body = SendFriendRequestDto,
    responses(
        (status = 201, description = "Request created", body = FriendRequestDto),
        (status = 400, description = "Self-request"),
        (status = 409, description = "A relationship already exists")
    ),
)]
pub async fn send_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SendFriendRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let entry = FriendshipService::new(&state.db)
        .send_request(user.id, payload.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Friend request sent", entry.into_dto())),
    ))
}

/// Accept a pending request; addressee only.
#[utoipa::path(
    post,
    path = "/api/friends/requests/{request_id}/accept",
    tag = FRIENDSHIP_TAG,
    params(("request_id" = i32, Path, description = "Friendship row id")),
    responses(
        (status = 200, description = "Request accepted", body = FriendDto),
        (status = 403, description = "Caller is not the addressee"),
        (status = 409, description = "Not pending")
    ),
)]
pub async fn accept_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let entry = FriendshipService::new(&state.db)
        .accept_request(request_id, user.id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Friend request accepted",
        entry.into_dto(),
    )))
}

/// Reject a pending request; addressee only.
#[utoipa::path(
    post,
    path = "/api/friends/requests/{request_id}/reject",
    tag = FRIENDSHIP_TAG,
    params(("request_id" = i32, Path, description = "Friendship row id")),
    responses(
        (status = 200, description = "Request rejected"),
        (status = 403, description = "Caller is not the addressee"),
        (status = 409, description = "Not pending")
    ),
)]
pub async fn reject_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    FriendshipService::new(&state.db)
        .reject_request(request_id, user.id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty(
        "Friend request rejected",
    )))
}

/// Remove the relationship row with a user, whatever its status.
#[utoipa::path(
    delete,
    path = "/api/friends/{user_id}",
    tag = FRIENDSHIP_TAG,
    params(("user_id" = i32, Path, description = "The other user's id")),
    responses(
        (status = 200, description = "Friendship removed"),
        (status = 404, description = "No relationship exists")
    ),
)]
pub async fn remove_friend(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    FriendshipService::new(&state.db)
        .remove_friend(user.id, user_id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty("Friend removed")))
}

/// Block a user unilaterally.
#[utoipa::path(
    post,
    path = "/api/friends/{user_id}/block",
    tag = FRIENDSHIP_TAG,
    params(("user_id" = i32, Path, description = "User to block")),
    responses((status = 200, description = "User blocked")),
)]
pub async fn block_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    FriendshipService::new(&state.db)
        .block_user(user.id, user_id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty("User blocked")))
}

/// Unblock a user; only the original blocker may do this.
#[utoipa::path(
    post,
    path = "/api/friends/{user_id}/unblock",
    tag = FRIENDSHIP_TAG,
    params(("user_id" = i32, Path, description = "User to unblock")),
    responses(
        (status = 200, description = "User unblocked"),
        (status = 403, description = "Caller is not the blocker"),
        (status = 409, description = "User is not blocked")
    ),
)]
pub async fn unblock_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    FriendshipService::new(&state.db)
        .unblock_user(user.id, user_id)
        .await?;

    Ok(Json(ApiResponse::<()>::success_empty("User unblocked")))
}

/// The caller's accepted friends.
#[utoipa::path(
    get,
    path = "/api/friends",
    tag = FRIENDSHIP_TAG,
    responses((status = 200, description = "Friend list", body = [FriendDto])),
)]
pub async fn friends(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let friends = FriendshipService::new(&state.db).friends(user.id).await?;
    let friends: Vec<FriendDto> = friends.into_iter().map(|f| f.into_dto()).collect();

    Ok(Json(ApiResponse::success("Friends", friends)))
}

/// Pending requests the caller has received.
#[utoipa::path(
    get,
    path = "/api/friends/requests",
    tag = FRIENDSHIP_TAG,
    responses((status = 200, description = "Received requests", body = [FriendRequestDto])),
)]
pub async fn pending_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let requests = FriendshipService::new(&state.db)
        .pending_requests(user.id)
        .await?;
    let requests: Vec<FriendRequestDto> = requests.into_iter().map(|r| r.into_dto()).collect();

    Ok(Json(ApiResponse::success("Pending requests", requests)))
}

/// Pending requests the caller has sent.
#[utoipa::path(
    get,
    path = "/api/friends/requests/sent",
    tag = FRIENDSHIP_TAG,
    responses((status = 200, description = "Sent requests", body = [FriendRequestDto])),
)]
pub async fn sent_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let requests = FriendshipService::new(&state.db).sent_requests(user.id).await?;
    let requests: Vec<FriendRequestDto> = requests.into_iter().map(|r| r.into_dto()).collect();

    Ok(Json(ApiResponse::success("Sent requests", requests)))
}

/// Users the caller has blocked.
#[utoipa::path(
    get,
    path = "/api/friends/blocked",
    tag = FRIENDSHIP_TAG,
    responses((status = 200, description = "Blocked users", body = [FriendRequestDto])),
)]
pub async fn blocked_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let blocked = FriendshipService::new(&state.db).blocked_users(user.id).await?;
    let blocked: Vec<FriendRequestDto> = blocked.into_iter().map(|r| r.into_dto()).collect();

    Ok(Json(ApiResponse::success("Blocked users", blocked)))
}

/// Search users by name, email or public id, excluding the caller and
/// existing friends. At most 20 results.
#[utoipa::path(
    get,
    path = "/api/friends/search",
    tag = FRIENDSHIP_TAG,
    params(("q" = String, Query, description = "Substring to match")),
    responses((status = 200, description = "Matching users", body = [UserSummaryDto])),
)]
pub async fn search_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let users = FriendshipService::new(&state.db)
        .search_users(&params.q, user.id)
        .await?;
    let users: Vec<UserSummaryDto> = users.into_iter().map(|u| u.into_summary_dto()).collect();

    Ok(Json(ApiResponse::success("Search results", users)))
}

/// Relationship status between the caller and another user; "NONE" when no
/// row exists.
#[utoipa::path(
    get,
    path = "/api/friends/status/{user_id}",
    tag = FRIENDSHIP_TAG,
    params(("user_id" = i32, Path, description = "The other user's id")),
    responses((status = 200, description = "Status", body = FriendshipStatusDto)),
)]
pub async fn friendship_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let status = FriendshipService::new(&state.db)
        .status_between(user.id, user_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Friendship status",
        FriendshipStatusDto { status },
    )))
}
