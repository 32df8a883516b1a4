//! Notification data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::notification::{NewNotificationParams, Notification};

/// Repository providing database operations for notifications.
pub struct NotificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a new unread notification.
    pub async fn create(&self, param: NewNotificationParams) -> Result<Notification, DbErr> {
        let (related_kind, related_id) = match param.related {
            Some(related) => (Some(related.kind), Some(related.id)),
            None => (None, None),
        };

        let entity = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            kind: ActiveValue::Set(param.kind),
            title: ActiveValue::Set(param.title),
            message: ActiveValue::Set(param.message),
            related_kind: ActiveValue::Set(related_kind),
            related_id: ActiveValue::Set(related_id),
            is_read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            read_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Notification::from_entity(entity))
    }

    /// Finds a notification by primary key.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Notification>, DbErr> {
        let entity = entity::prelude::Notification::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Notification::from_entity))
    }

    /// All notifications for a user, newest first.
    pub async fn for_user(&self, user_id: i32) -> Result<Vec<Notification>, DbErr> {
        let entities = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .order_by_desc(entity::notification::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(Notification::from_entity)
            .collect())
    }

    /// Unread notifications for a user, newest first.
    pub async fn unread_for_user(&self, user_id: i32) -> Result<Vec<Notification>, DbErr> {
        let entities = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .order_by_desc(entity::notification::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(Notification::from_entity)
            .collect())
    }

    /// Live count of unread notifications.
    pub async fn count_unread(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .count(self.db)
            .await
    }

    /// Marks a single notification as read, stamping the read timestamp.
    pub async fn mark_read(&self, id: i32) -> Result<Notification, DbErr> {
        let entity = entity::prelude::Notification::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Notification with id {} not found",
                id
            )))?;

        let mut active_model: entity::notification::ActiveModel = entity.into();
        active_model.is_read = ActiveValue::Set(true);
        active_model.read_at = ActiveValue::Set(Some(Utc::now()));

        let entity = active_model.update(self.db).await?;

        Ok(Notification::from_entity(entity))
    }

    /// Marks every unread notification of the user as read.
    pub async fn mark_all_read(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::Notification::update_many()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .col_expr(
                entity::notification::Column::IsRead,
                sea_orm::sea_query::Expr::value(true),
            )
            .col_expr(
                entity::notification::Column::ReadAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes a notification by id.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Notification::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes every already-read notification of the user.
    pub async fn delete_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes every notification of the user. Used during account removal.
    pub async fn delete_for_user(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
