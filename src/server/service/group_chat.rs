//! Group chat rules.
//!
//! Current membership is re-validated on every read and write: a former
//! member loses access retroactively, even to messages they authored while a
//! member. Deletion is restricted to the original author.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{group::ActivityGroupRepository, group_chat::GroupChatRepository, user::UserRepository},
    error::AppError,
    model::{
        group_chat::{GroupChatMessage, GroupChatView},
        user::User,
    },
};

pub struct GroupChatService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupChatService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a message; member-only. The caller publishes the returned
    /// view on the group's broadcast channel after this succeeds.
    pub async fn send_message(
        &self,
        group_id: i32,
        user_id: i32,
        content: String,
    ) -> Result<GroupChatView, AppError> {
        self.require_membership(group_id, user_id).await?;

        let author = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let message = GroupChatRepository::new(self.db)
            .create(group_id, user_id, content)
            .await?;

        Ok(GroupChatView { message, author })
    }

    /// Full message history, oldest first; member-only.
    pub async fn messages(&self, group_id: i32, user_id: i32) -> Result<Vec<GroupChatView>, AppError> {
        self.require_membership(group_id, user_id).await?;

        let messages = GroupChatRepository::new(self.db).for_group(group_id).await?;

        self.to_views(messages).await
    }

    /// The most recent messages, newest first; member-only.
    pub async fn recent_messages(
        &self,
        group_id: i32,
        user_id: i32,
        limit: u64,
    ) -> Result<Vec<GroupChatView>, AppError> {
        self.require_membership(group_id, user_id).await?;

        let messages = GroupChatRepository::new(self.db)
            .recent_for_group(group_id, limit)
            .await?;

        self.to_views(messages).await
    }

    /// Deletes a message; author-only.
    pub async fn delete_message(&self, message_id: i32, user_id: i32) -> Result<(), AppError> {
        let repo = GroupChatRepository::new(self.db);
        let message = repo
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Message not found".to_string()))?;

        if message.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the message sender can delete this message".to_string(),
            ));
        }

        repo.delete(message_id).await?;

        Ok(())
    }

    /// Rejects callers who are not currently members of the group.
    async fn require_membership(&self, group_id: i32, user_id: i32) -> Result<(), AppError> {
        let groups = ActivityGroupRepository::new(self.db);
        groups
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

        if !groups.is_member(group_id, user_id).await? {
            return Err(AppError::Forbidden(
                "You must be a member of the group to use its chat".to_string(),
            ));
        }

        Ok(())
    }

    async fn to_views(
        &self,
        messages: Vec<GroupChatMessage>,
    ) -> Result<Vec<GroupChatView>, AppError> {
        let mut ids: Vec<i32> = messages.iter().map(|m| m.author_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let authors: HashMap<i32, User> = UserRepository::new(self.db)
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(messages
            .into_iter()
            .filter_map(|message| {
                let author = authors.get(&message.author_id)?.clone();
                Some(GroupChatView { message, author })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{
        builder::TestBuilder,
        factory::{
            group::{add_member, ActivityGroupFactory},
            group_chat_message::GroupChatMessageFactory,
            user::create_user,
        },
    };

    #[tokio::test]
    async fn send_message_requires_current_membership() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let outsider = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id).build().await.unwrap();

        let service = GroupChatService::new(db);
        let result = service
            .send_message(group.id, outsider.id, "hello".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    /// A former member loses read access retroactively, even for messages
    /// they authored while a member.
    #[tokio::test]
    async fn former_member_loses_read_access() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let member = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id).build().await.unwrap();
        add_member(db, group.id, member.id).await.unwrap();

        let service = GroupChatService::new(db);
        service
            .send_message(group.id, member.id, "while a member".to_string())
            .await
            .unwrap();

        ActivityGroupRepository::new(db)
            .remove_member(group.id, member.id)
            .await
            .unwrap();

        let read = service.messages(group.id, member.id).await;
        assert!(matches!(read, Err(AppError::Forbidden(_))));

        let write = service
            .send_message(group.id, member.id, "after leaving".to_string())
            .await;
        assert!(matches!(write, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn delete_message_is_author_only() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let member = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id).build().await.unwrap();
        add_member(db, group.id, member.id).await.unwrap();
        let message = GroupChatMessageFactory::new(db, group.id, member.id)
            .build()
            .await
            .unwrap();

        let service = GroupChatService::new(db);
        let by_creator = service.delete_message(message.id, creator.id).await;
        assert!(matches!(by_creator, Err(AppError::Forbidden(_))));

        service.delete_message(message.id, member.id).await.unwrap();
    }

    #[tokio::test]
    async fn recent_messages_returns_newest_first_with_limit() {
        let test = TestBuilder::new().with_group_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let creator = create_user(db).await.unwrap();
        let group = ActivityGroupFactory::new(db, creator.id).build().await.unwrap();

        let base = chrono::Utc::now() - chrono::Duration::minutes(10);
        for i in 0..5 {
            GroupChatMessageFactory::new(db, group.id, creator.id)
                .content(format!("message {}", i))
                .created_at(base + chrono::Duration::minutes(i))
                .build()
                .await
                .unwrap();
        }

        let service = GroupChatService::new(db);
        let recent = service.recent_messages(group.id, creator.id, 2).await.unwrap();

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message.content, "message 4");
        assert_eq!(recent[1].message.content, "message 3");
    }
}
