//! Notification domain models.

use chrono::{DateTime, Utc};

use crate::model::notification::{NotificationDto, RelatedEntityDto};

/// Tagged reference to the entity that triggered a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedEntity {
    pub kind: String,
    pub id: i32,
}

impl RelatedEntity {
    pub fn direct_message(id: i32) -> Self {
        Self {
            kind: "DIRECT_MESSAGE".to_string(),
            id,
        }
    }

    pub fn friendship(id: i32) -> Self {
        Self {
            kind: "FRIENDSHIP".to_string(),
            id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related: Option<RelatedEntity>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Self {
        let related = match (entity.related_kind, entity.related_id) {
            (Some(kind), Some(id)) => Some(RelatedEntity { kind, id }),
            _ => None,
        };

        Self {
            id: entity.id,
            user_id: entity.user_id,
            kind: entity.kind,
            title: entity.title,
            message: entity.message,
            related,
            is_read: entity.is_read,
            created_at: entity.created_at,
            read_at: entity.read_at,
        }
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            related: self.related.map(|r| RelatedEntityDto {
                kind: r.kind,
                id: r.id,
            }),
            is_read: self.is_read,
            created_at: self.created_at,
            read_at: self.read_at,
        }
    }
}

/// Parameters for creating a notification as a side effect of another
/// operation.
#[derive(Debug, Clone)]
pub struct NewNotificationParams {
    pub user_id: i32,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related: Option<RelatedEntity>,
}
