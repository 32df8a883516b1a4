//! Direct message domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::message::{ConversationDto, DirectMessageDto},
    server::model::user::User,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DirectMessage {
    pub id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl DirectMessage {
    pub fn from_entity(entity: entity::direct_message::Model) -> Self {
        Self {
            id: entity.id,
            sender_id: entity.sender_id,
            receiver_id: entity.receiver_id,
            content: entity.content,
            is_read: entity.is_read,
            created_at: entity.created_at,
            read_at: entity.read_at,
        }
    }
}

/// A message joined with both participants, ready for DTO conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub message: DirectMessage,
    pub sender: User,
    pub receiver: User,
}

impl MessageView {
    /// Converts to the wire DTO, marking whether `current_user_id` authored
    /// the message.
    pub fn into_dto(self, current_user_id: i32) -> DirectMessageDto {
        DirectMessageDto {
            id: self.message.id,
            sender_id: self.sender.id,
            sender_name: self.sender.name,
            sender_avatar: self.sender.avatar_url,
            receiver_id: self.receiver.id,
            receiver_name: self.receiver.name,
            receiver_avatar: self.receiver.avatar_url,
            content: self.message.content,
            is_read: self.message.is_read,
            sent_at: self.message.created_at,
            read_at: self.message.read_at,
            is_current_user: self.message.sender_id == current_user_id,
        }
    }
}

/// One inbox entry: conversation partner plus last-message metadata and the
/// live unread count.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSummary {
    pub other_user: User,
    pub last_message: Option<String>,
    pub last_message_time: Option<DateTime<Utc>>,
    pub unread_count: u64,
}

impl ConversationSummary {
    pub fn into_dto(self) -> ConversationDto {
        ConversationDto {
            other_user: self.other_user.into_summary_dto(),
            last_message: self.last_message,
            last_message_time: self.last_message_time,
            unread_count: self.unread_count,
        }
    }
}
