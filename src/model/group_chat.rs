use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SendGroupMessageDto {
    pub message: String,
}

/// Chat message as rendered in the group timeline and on the broadcast
/// channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GroupChatMessageDto {
    pub id: i32,
    pub group_id: i32,
    pub sender_id: i32,
    pub sender_name: String,
    pub sender_avatar: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
