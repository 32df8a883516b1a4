//! Direct message factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating direct messages between two users.
///
/// Sender and receiver ids are mandatory; content defaults to a unique
/// placeholder and the message starts unread. `created_at` is settable so
/// ordering-sensitive tests can control the timeline.
pub struct DirectMessageFactory<'a> {
    db: &'a DatabaseConnection,
    sender_id: i32,
    receiver_id: i32,
    content: String,
    is_read: bool,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

impl<'a> DirectMessageFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, sender_id: i32, receiver_id: i32) -> Self {
        Self {
            db,
            sender_id,
            receiver_id,
            content: format!("Message {}", next_id()),
            is_read: false,
            created_at: Utc::now(),
            read_at: None,
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn is_read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn read_at(mut self, read_at: DateTime<Utc>) -> Self {
        self.read_at = Some(read_at);
        self
    }

    /// Builds and inserts the message row.
    pub async fn build(self) -> Result<entity::direct_message::Model, DbErr> {
        entity::direct_message::ActiveModel {
            sender_id: ActiveValue::Set(self.sender_id),
            receiver_id: ActiveValue::Set(self.receiver_id),
            content: ActiveValue::Set(self.content),
            is_read: ActiveValue::Set(self.is_read),
            created_at: ActiveValue::Set(self.created_at),
            read_at: ActiveValue::Set(self.read_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
