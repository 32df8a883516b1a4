//! Group chat message factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating chat messages inside a group.
pub struct GroupChatMessageFactory<'a> {
    db: &'a DatabaseConnection,
    group_id: i32,
    author_id: i32,
    content: String,
    created_at: DateTime<Utc>,
}

impl<'a> GroupChatMessageFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, group_id: i32, author_id: i32) -> Self {
        Self {
            db,
            group_id,
            author_id,
            content: format!("Chat message {}", next_id()),
            created_at: Utc::now(),
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the message row.
    pub async fn build(self) -> Result<entity::group_chat_message::Model, DbErr> {
        entity::group_chat_message::ActiveModel {
            group_id: ActiveValue::Set(self.group_id),
            author_id: ActiveValue::Set(self.author_id),
            content: ActiveValue::Set(self.content),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
