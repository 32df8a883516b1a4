use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserSummaryDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SendDirectMessageDto {
    pub receiver_id: i32,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DirectMessageDto {
    pub id: i32,
    pub sender_id: i32,
    pub sender_name: String,
    pub sender_avatar: Option<String>,
    pub receiver_id: i32,
    pub receiver_name: String,
    pub receiver_avatar: Option<String>,
    pub content: String,
    pub is_read: bool,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    /// Whether the requesting user authored this message.
    pub is_current_user: bool,
}

/// One inbox entry: the conversation partner plus last-message metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversationDto {
    pub other_user: UserSummaryDto,
    pub last_message: Option<String>,
    pub last_message_time: Option<DateTime<Utc>>,
    pub unread_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UnreadCountDto {
    pub unread_count: u64,
}
