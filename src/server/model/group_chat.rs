//! Group chat domain models.

use chrono::{DateTime, Utc};

use crate::{model::group_chat::GroupChatMessageDto, server::model::user::User};

#[derive(Debug, Clone, PartialEq)]
pub struct GroupChatMessage {
    pub id: i32,
    pub group_id: i32,
    pub author_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl GroupChatMessage {
    pub fn from_entity(entity: entity::group_chat_message::Model) -> Self {
        Self {
            id: entity.id,
            group_id: entity.group_id,
            author_id: entity.author_id,
            content: entity.content,
            created_at: entity.created_at,
        }
    }
}

/// A chat message joined with its author.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupChatView {
    pub message: GroupChatMessage,
    pub author: User,
}

impl GroupChatView {
    pub fn into_dto(self) -> GroupChatMessageDto {
        GroupChatMessageDto {
            id: self.message.id,
            group_id: self.message.group_id,
            sender_id: self.author.id,
            sender_name: self.author.name,
            sender_avatar: self.author.avatar_url,
            message: self.message.content,
            created_at: self.message.created_at,
        }
    }
}
