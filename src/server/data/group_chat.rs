//! Group chat data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::group_chat::GroupChatMessage;

/// Repository providing database operations for group chat messages.
pub struct GroupChatRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupChatRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a new chat message.
    pub async fn create(
        &self,
        group_id: i32,
        author_id: i32,
        content: String,
    ) -> Result<GroupChatMessage, DbErr> {
        let entity = entity::group_chat_message::ActiveModel {
            group_id: ActiveValue::Set(group_id),
            author_id: ActiveValue::Set(author_id),
            content: ActiveValue::Set(content),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(GroupChatMessage::from_entity(entity))
    }

    /// Finds a message by primary key.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<GroupChatMessage>, DbErr> {
        let entity = entity::prelude::GroupChatMessage::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(GroupChatMessage::from_entity))
    }

    /// All messages of a group, oldest first.
    pub async fn for_group(&self, group_id: i32) -> Result<Vec<GroupChatMessage>, DbErr> {
        let entities = entity::prelude::GroupChatMessage::find()
            .filter(entity::group_chat_message::Column::GroupId.eq(group_id))
            .order_by_asc(entity::group_chat_message::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(GroupChatMessage::from_entity)
            .collect())
    }

    /// The `limit` most recent messages of a group, newest first.
    pub async fn recent_for_group(
        &self,
        group_id: i32,
        limit: u64,
    ) -> Result<Vec<GroupChatMessage>, DbErr> {
        let entities = entity::prelude::GroupChatMessage::find()
            .filter(entity::group_chat_message::Column::GroupId.eq(group_id))
            .order_by_desc(entity::group_chat_message::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(GroupChatMessage::from_entity)
            .collect())
    }

    /// Message count of the group, shown on the group page.
    pub async fn count_for_group(&self, group_id: i32) -> Result<u64, DbErr> {
        entity::prelude::GroupChatMessage::find()
            .filter(entity::group_chat_message::Column::GroupId.eq(group_id))
            .count(self.db)
            .await
    }

    /// Deletes a message by id.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::GroupChatMessage::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes every message of a group. Used when the group is removed.
    pub async fn delete_for_group(&self, group_id: i32) -> Result<(), DbErr> {
        entity::prelude::GroupChatMessage::delete_many()
            .filter(entity::group_chat_message::Column::GroupId.eq(group_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes every message the user authored. Used during account removal.
    pub async fn delete_for_author(&self, author_id: i32) -> Result<(), DbErr> {
        entity::prelude::GroupChatMessage::delete_many()
            .filter(entity::group_chat_message::Column::AuthorId.eq(author_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
