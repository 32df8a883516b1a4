//! Direct message data repository for database operations.
//!
//! This module provides the `DirectMessageRepository` for the one-to-one
//! messaging store. Unread counts are always derived from live aggregate
//! queries over the message rows, never from a maintained counter.

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::direct_message::DirectMessage;

/// Builds a condition matching messages exchanged between the pair, in both
/// directions.
fn between_condition(a: i32, b: i32) -> Condition {
    Condition::any()
        .add(
            Condition::all()
                .add(entity::direct_message::Column::SenderId.eq(a))
                .add(entity::direct_message::Column::ReceiverId.eq(b)),
        )
        .add(
            Condition::all()
                .add(entity::direct_message::Column::SenderId.eq(b))
                .add(entity::direct_message::Column::ReceiverId.eq(a)),
        )
}

/// Repository providing database operations for direct messages.
pub struct DirectMessageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DirectMessageRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a new unread message.
    pub async fn create(
        &self,
        sender_id: i32,
        receiver_id: i32,
        content: String,
    ) -> Result<DirectMessage, DbErr> {
        let entity = entity::direct_message::ActiveModel {
            sender_id: ActiveValue::Set(sender_id),
            receiver_id: ActiveValue::Set(receiver_id),
            content: ActiveValue::Set(content),
            is_read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            read_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(DirectMessage::from_entity(entity))
    }

    /// Finds a message by primary key.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<DirectMessage>, DbErr> {
        let entity = entity::prelude::DirectMessage::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(DirectMessage::from_entity))
    }

    /// All messages between the pair, oldest first.
    pub async fn conversation_between(
        &self,
        a: i32,
        b: i32,
    ) -> Result<Vec<DirectMessage>, DbErr> {
        let entities = entity::prelude::DirectMessage::find()
            .filter(between_condition(a, b))
            .order_by_asc(entity::direct_message::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(DirectMessage::from_entity)
            .collect())
    }

    /// Unread messages addressed to `user_id`, newest first.
    pub async fn unread_for(&self, user_id: i32) -> Result<Vec<DirectMessage>, DbErr> {
        let entities = entity::prelude::DirectMessage::find()
            .filter(entity::direct_message::Column::ReceiverId.eq(user_id))
            .filter(entity::direct_message::Column::IsRead.eq(false))
            .order_by_desc(entity::direct_message::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(DirectMessage::from_entity)
            .collect())
    }

    /// The most recent message between the pair, if any.
    pub async fn last_message_between(
        &self,
        a: i32,
        b: i32,
    ) -> Result<Option<DirectMessage>, DbErr> {
        let entity = entity::prelude::DirectMessage::find()
            .filter(between_condition(a, b))
            .order_by_desc(entity::direct_message::Column::CreatedAt)
            .limit(1)
            .one(self.db)
            .await?;

        Ok(entity.map(DirectMessage::from_entity))
    }

    /// Live count of unread messages addressed to `user_id`.
    pub async fn count_unread(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::DirectMessage::find()
            .filter(entity::direct_message::Column::ReceiverId.eq(user_id))
            .filter(entity::direct_message::Column::IsRead.eq(false))
            .count(self.db)
            .await
    }

    /// Live count of unread messages from one specific sender.
    pub async fn count_unread_from(
        &self,
        receiver_id: i32,
        sender_id: i32,
    ) -> Result<u64, DbErr> {
        entity::prelude::DirectMessage::find()
            .filter(entity::direct_message::Column::ReceiverId.eq(receiver_id))
            .filter(entity::direct_message::Column::SenderId.eq(sender_id))
            .filter(entity::direct_message::Column::IsRead.eq(false))
            .count(self.db)
            .await
    }

    /// Distinct ids of every user `user_id` has exchanged at least one
    /// message with, regardless of current friendship status.
    ///
    /// Derived in memory from the pair columns; the caller sorts the
    /// resulting conversations by last-message time anyway.
    pub async fn conversation_partner_ids(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        let entities = entity::prelude::DirectMessage::find()
            .filter(
                Condition::any()
                    .add(entity::direct_message::Column::SenderId.eq(user_id))
                    .add(entity::direct_message::Column::ReceiverId.eq(user_id)),
            )
            .all(self.db)
            .await?;

        let mut seen = HashSet::new();
        let mut partners = Vec::new();
        for entity in entities {
            let partner = if entity.sender_id == user_id {
                entity.receiver_id
            } else {
                entity.sender_id
            };
            if seen.insert(partner) {
                partners.push(partner);
            }
        }

        Ok(partners)
    }

    /// Marks every unread message from `sender_id` to `receiver_id` as read,
    /// stamping the read timestamp.
    pub async fn mark_all_read_between(
        &self,
        receiver_id: i32,
        sender_id: i32,
    ) -> Result<(), DbErr> {
        entity::prelude::DirectMessage::update_many()
            .filter(entity::direct_message::Column::ReceiverId.eq(receiver_id))
            .filter(entity::direct_message::Column::SenderId.eq(sender_id))
            .filter(entity::direct_message::Column::IsRead.eq(false))
            .col_expr(
                entity::direct_message::Column::IsRead,
                sea_orm::sea_query::Expr::value(true),
            )
            .col_expr(
                entity::direct_message::Column::ReadAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Marks a single message as read.
    ///
    /// # Returns
    /// - `Ok(DirectMessage)` - The updated message
    /// - `Err(DbErr::RecordNotFound)` - No message with that id
    pub async fn mark_read(&self, id: i32) -> Result<DirectMessage, DbErr> {
        let entity = entity::prelude::DirectMessage::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Direct message with id {} not found",
                id
            )))?;

        let mut active_model: entity::direct_message::ActiveModel = entity.into();
        active_model.is_read = ActiveValue::Set(true);
        active_model.read_at = ActiveValue::Set(Some(Utc::now()));

        let entity = active_model.update(self.db).await?;

        Ok(DirectMessage::from_entity(entity))
    }

    /// Deletes a message by id.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::DirectMessage::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes every message between the pair.
    pub async fn delete_conversation_between(&self, a: i32, b: i32) -> Result<(), DbErr> {
        entity::prelude::DirectMessage::delete_many()
            .filter(between_condition(a, b))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes every message sent or received by `user_id`. Used during
    /// account removal.
    pub async fn delete_for_user(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::DirectMessage::delete_many()
            .filter(
                Condition::any()
                    .add(entity::direct_message::Column::SenderId.eq(user_id))
                    .add(entity::direct_message::Column::ReceiverId.eq(user_id)),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }
}
