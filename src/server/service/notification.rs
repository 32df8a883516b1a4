//! Notification rules: creation as a side effect of other operations, and
//! owner-gated reads and updates.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::notification::NotificationRepository,
    error::AppError,
    model::notification::{NewNotificationParams, Notification},
};

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a notification. Callers on a success path must treat failures
    /// here as non-fatal; see the direct message send flow.
    pub async fn create(&self, params: NewNotificationParams) -> Result<Notification, AppError> {
        Ok(NotificationRepository::new(self.db).create(params).await?)
    }

    pub async fn notifications(&self, user_id: i32) -> Result<Vec<Notification>, AppError> {
        Ok(NotificationRepository::new(self.db).for_user(user_id).await?)
    }

    pub async fn unread(&self, user_id: i32) -> Result<Vec<Notification>, AppError> {
        Ok(NotificationRepository::new(self.db)
            .unread_for_user(user_id)
            .await?)
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .count_unread(user_id)
            .await?)
    }

    /// Marks one notification as read; recipient-only.
    pub async fn mark_read(&self, notification_id: i32, user_id: i32) -> Result<Notification, AppError> {
        let repo = NotificationRepository::new(self.db);
        let notification = repo
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

        if notification.user_id != user_id {
            return Err(AppError::Forbidden(
                "You can only manage your own notifications".to_string(),
            ));
        }

        Ok(repo.mark_read(notification_id).await?)
    }

    pub async fn mark_all_read(&self, user_id: i32) -> Result<(), AppError> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }

    /// Deletes one notification; recipient-only.
    pub async fn delete(&self, notification_id: i32, user_id: i32) -> Result<(), AppError> {
        let repo = NotificationRepository::new(self.db);
        let notification = repo
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

        if notification.user_id != user_id {
            return Err(AppError::Forbidden(
                "You can only manage your own notifications".to_string(),
            ));
        }

        repo.delete(notification_id).await?;

        Ok(())
    }

    /// Deletes every already-read notification, returning how many went.
    pub async fn delete_read(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db).delete_read(user_id).await?)
    }
}
