use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserSummaryDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SendFriendRequestDto {
    pub user_id: i32,
}

/// A pending request, from either direction: `user` is the counterpart
/// (the sender for received requests, the target for sent ones).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FriendRequestDto {
    pub request_id: i32,
    pub user: UserSummaryDto,
    pub status: String,
    pub requested_at: DateTime<Utc>,
}

/// An accepted friend as seen from the current user's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FriendDto {
    pub user: UserSummaryDto,
    pub status: String,
    pub friends_since: Option<DateTime<Utc>>,
}

/// Relationship status between two users; "NONE" when no row exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FriendshipStatusDto {
    pub status: String,
}
