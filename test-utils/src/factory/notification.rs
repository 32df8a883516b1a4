//! Notification factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating notifications for a test user.
pub struct NotificationFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    kind: String,
    title: String,
    message: String,
    related_kind: Option<String>,
    related_id: Option<i32>,
    is_read: bool,
}

impl<'a> NotificationFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            kind: "DIRECT_MESSAGE".to_string(),
            title: format!("Notification {}", id),
            message: "You have a new message".to_string(),
            related_kind: None,
            related_id: None,
            is_read: false,
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn related(mut self, related_kind: impl Into<String>, related_id: i32) -> Self {
        self.related_kind = Some(related_kind.into());
        self.related_id = Some(related_id);
        self
    }

    pub fn is_read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    /// Builds and inserts the notification row.
    pub async fn build(self) -> Result<entity::notification::Model, DbErr> {
        entity::notification::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            kind: ActiveValue::Set(self.kind),
            title: ActiveValue::Set(self.title),
            message: ActiveValue::Set(self.message),
            related_kind: ActiveValue::Set(self.related_kind),
            related_id: ActiveValue::Set(self.related_id),
            is_read: ActiveValue::Set(self.is_read),
            created_at: ActiveValue::Set(Utc::now()),
            read_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
