//! Direct messaging rules.
//!
//! Sending and conversation reads require the pair to be ACCEPTED friends.
//! The conversation list deliberately does not: messages persist even if the
//! pair later unfriends, so every past partner stays listed.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        direct_message::DirectMessageRepository, friendship::FriendshipRepository,
        user::UserRepository,
    },
    error::AppError,
    model::{
        direct_message::{ConversationSummary, DirectMessage, MessageView},
        notification::{NewNotificationParams, RelatedEntity},
        user::User,
    },
    service::notification::NotificationService,
};

pub struct DirectMessageService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DirectMessageService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sends a direct message.
    ///
    /// Requires sender and receiver to currently be ACCEPTED friends. After
    /// the message is persisted a notification is attempted for the
    /// receiver; notification failure is logged and swallowed so it can
    /// never roll back the message write.
    pub async fn send_message(
        &self,
        sender_id: i32,
        receiver_id: i32,
        content: String,
    ) -> Result<MessageView, AppError> {
        let users = UserRepository::new(self.db);
        let sender = users
            .find_by_id(sender_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Sender not found".to_string()))?;
        let receiver = users
            .find_by_id(receiver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Receiver not found".to_string()))?;

        if !FriendshipRepository::new(self.db)
            .are_friends(sender_id, receiver_id)
            .await?
        {
            return Err(AppError::Conflict(
                "You can only send messages to friends".to_string(),
            ));
        }

        let message = DirectMessageRepository::new(self.db)
            .create(sender_id, receiver_id, content)
            .await?;

        // Best effort; a failed notification must never fail the send.
        let notification = NotificationService::new(self.db)
            .create(NewNotificationParams {
                user_id: receiver_id,
                kind: "DIRECT_MESSAGE".to_string(),
                title: "New message".to_string(),
                message: format!("{} sent you a message", sender.name),
                related: Some(RelatedEntity::direct_message(message.id)),
            })
            .await;
        if let Err(e) = notification {
            tracing::warn!(
                "Failed to create notification for message {}: {}",
                message.id,
                e
            );
        }

        Ok(MessageView {
            message,
            sender,
            receiver,
        })
    }

    /// All messages between the caller and `other_id`, oldest first.
    /// Friends-only, like sending.
    pub async fn conversation(
        &self,
        user_id: i32,
        other_id: i32,
    ) -> Result<Vec<MessageView>, AppError> {
        if !FriendshipRepository::new(self.db)
            .are_friends(user_id, other_id)
            .await?
        {
            return Err(AppError::Conflict(
                "You can only view conversations with friends".to_string(),
            ));
        }

        let messages = DirectMessageRepository::new(self.db)
            .conversation_between(user_id, other_id)
            .await?;

        self.to_views(messages).await
    }

    /// The caller's inbox: one entry per conversation partner, sorted by
    /// last-message time descending with absent timestamps last. Partners
    /// are listed regardless of current friendship status.
    pub async fn all_conversations(
        &self,
        user_id: i32,
    ) -> Result<Vec<ConversationSummary>, AppError> {
        let repo = DirectMessageRepository::new(self.db);
        let users = UserRepository::new(self.db);

        let partner_ids = repo.conversation_partner_ids(user_id).await?;

        let mut conversations = Vec::new();
        for partner_id in partner_ids {
            let Some(partner) = users.find_by_id(partner_id).await? else {
                continue;
            };

            let last = repo.last_message_between(user_id, partner_id).await?;
            let unread_count = repo.count_unread_from(user_id, partner_id).await?;

            conversations.push(ConversationSummary {
                other_user: partner,
                last_message: last.as_ref().map(|m| m.content.clone()),
                last_message_time: last.map(|m| m.created_at),
                unread_count,
            });
        }

        conversations.sort_by(|a, b| match (a.last_message_time, b.last_message_time) {
            (None, None) => std::cmp::Ordering::Equal,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (Some(_), None) => std::cmp::Ordering::Less,
            (Some(ta), Some(tb)) => tb.cmp(&ta),
        });

        Ok(conversations)
    }

    /// Unread messages addressed to the caller, newest first.
    pub async fn unread_messages(&self, user_id: i32) -> Result<Vec<MessageView>, AppError> {
        let messages = DirectMessageRepository::new(self.db)
            .unread_for(user_id)
            .await?;

        self.to_views(messages).await
    }

    /// Live unread total for the caller.
    pub async fn unread_count(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(DirectMessageRepository::new(self.db)
            .count_unread(user_id)
            .await?)
    }

    /// Marks everything from `sender_id` to the caller as read.
    pub async fn mark_conversation_read(
        &self,
        receiver_id: i32,
        sender_id: i32,
    ) -> Result<(), AppError> {
        Ok(DirectMessageRepository::new(self.db)
            .mark_all_read_between(receiver_id, sender_id)
            .await?)
    }

    /// Marks a single message as read; receiver-only.
    pub async fn mark_message_read(
        &self,
        message_id: i32,
        user_id: i32,
    ) -> Result<DirectMessage, AppError> {
        let repo = DirectMessageRepository::new(self.db);
        let message = repo
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Message not found".to_string()))?;

        if message.receiver_id != user_id {
            return Err(AppError::Forbidden(
                "Only the receiver can mark this message as read".to_string(),
            ));
        }

        Ok(repo.mark_read(message_id).await?)
    }

    /// Deletes a single message; sender-only.
    pub async fn delete_message(&self, message_id: i32, user_id: i32) -> Result<(), AppError> {
        let repo = DirectMessageRepository::new(self.db);
        let message = repo
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Message not found".to_string()))?;

        if message.sender_id != user_id {
            return Err(AppError::Forbidden(
                "Only the sender can delete this message".to_string(),
            ));
        }

        repo.delete(message_id).await?;

        Ok(())
    }

    /// Removes every message between the caller and `other_id`.
    pub async fn delete_conversation(&self, user_id: i32, other_id: i32) -> Result<(), AppError> {
        Ok(DirectMessageRepository::new(self.db)
            .delete_conversation_between(user_id, other_id)
            .await?)
    }

    /// Joins messages with their participants.
    async fn to_views(&self, messages: Vec<DirectMessage>) -> Result<Vec<MessageView>, AppError> {
        let mut ids: Vec<i32> = Vec::new();
        for m in &messages {
            ids.push(m.sender_id);
            ids.push(m.receiver_id);
        }
        ids.sort_unstable();
        ids.dedup();

        let users: HashMap<i32, User> = UserRepository::new(self.db)
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut views = Vec::with_capacity(messages.len());
        for message in messages {
            let sender = users.get(&message.sender_id).cloned().ok_or_else(|| {
                AppError::InternalError(format!("Sender {} missing for message", message.sender_id))
            })?;
            let receiver = users.get(&message.receiver_id).cloned().ok_or_else(|| {
                AppError::InternalError(format!(
                    "Receiver {} missing for message",
                    message.receiver_id
                ))
            })?;

            views.push(MessageView {
                message,
                sender,
                receiver,
            });
        }

        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use test_utils::{
        builder::TestBuilder,
        factory::{
            direct_message::DirectMessageFactory, friendship::create_accepted_friendship,
            user::create_user,
        },
    };

    #[tokio::test]
    async fn send_message_requires_friendship() {
        let test = TestBuilder::new()
            .with_messaging_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();

        let service = DirectMessageService::new(db);
        let result = service.send_message(a.id, b.id, "hi".to_string()).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn send_message_persists_and_notifies_receiver() {
        let test = TestBuilder::new()
            .with_messaging_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();
        create_accepted_friendship(db, a.id, b.id).await.unwrap();

        let service = DirectMessageService::new(db);
        let view = service
            .send_message(a.id, b.id, "hi".to_string())
            .await
            .unwrap();

        assert_eq!(view.message.sender_id, a.id);
        assert!(!view.message.is_read);

        let notifications = NotificationService::new(db).unread(b.id).await.unwrap();
        assert_eq!(notifications.len(), 1);
        let related = notifications[0].related.as_ref().unwrap();
        assert_eq!(related.kind, "DIRECT_MESSAGE");
        assert_eq!(related.id, view.message.id);
    }

    #[tokio::test]
    async fn conversation_is_friends_only_and_oldest_first() {
        let test = TestBuilder::new()
            .with_messaging_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();

        let service = DirectMessageService::new(db);
        assert!(matches!(
            service.conversation(a.id, b.id).await,
            Err(AppError::Conflict(_))
        ));

        create_accepted_friendship(db, a.id, b.id).await.unwrap();
        let t0 = Utc::now() - Duration::minutes(10);
        DirectMessageFactory::new(db, a.id, b.id)
            .content("first")
            .created_at(t0)
            .build()
            .await
            .unwrap();
        DirectMessageFactory::new(db, b.id, a.id)
            .content("second")
            .created_at(t0 + Duration::minutes(1))
            .build()
            .await
            .unwrap();

        let views = service.conversation(a.id, b.id).await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].message.content, "first");
        assert_eq!(views[1].message.content, "second");
    }

    /// Partners stay listed even after unfriending, sorted by recency.
    #[tokio::test]
    async fn all_conversations_lists_past_partners_sorted() {
        let test = TestBuilder::new()
            .with_messaging_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let me = create_user(db).await.unwrap();
        let old_friend = create_user(db).await.unwrap();
        let current = create_user(db).await.unwrap();
        create_accepted_friendship(db, me.id, current.id).await.unwrap();

        let t0 = Utc::now() - Duration::hours(2);
        // No friendship row with old_friend; the conversation still counts.
        DirectMessageFactory::new(db, old_friend.id, me.id)
            .content("from before")
            .created_at(t0)
            .build()
            .await
            .unwrap();
        DirectMessageFactory::new(db, me.id, current.id)
            .content("recent")
            .created_at(t0 + Duration::hours(1))
            .build()
            .await
            .unwrap();

        let service = DirectMessageService::new(db);
        let conversations = service.all_conversations(me.id).await.unwrap();

        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].other_user.id, current.id);
        assert_eq!(conversations[1].other_user.id, old_friend.id);
        assert_eq!(conversations[1].unread_count, 1);
    }

    #[tokio::test]
    async fn mark_message_read_is_receiver_only() {
        let test = TestBuilder::new()
            .with_messaging_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();
        let message = DirectMessageFactory::new(db, a.id, b.id).build().await.unwrap();

        let service = DirectMessageService::new(db);
        let by_sender = service.mark_message_read(message.id, a.id).await;
        assert!(matches!(by_sender, Err(AppError::Forbidden(_))));

        let updated = service.mark_message_read(message.id, b.id).await.unwrap();
        assert!(updated.is_read);
        assert!(updated.read_at.is_some());
    }

    #[tokio::test]
    async fn delete_message_is_sender_only() {
        let test = TestBuilder::new()
            .with_messaging_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();
        let message = DirectMessageFactory::new(db, a.id, b.id).build().await.unwrap();

        let service = DirectMessageService::new(db);
        let by_receiver = service.delete_message(message.id, b.id).await;
        assert!(matches!(by_receiver, Err(AppError::Forbidden(_))));

        service.delete_message(message.id, a.id).await.unwrap();
        assert!(matches!(
            service.delete_message(message.id, a.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn unread_count_tracks_live_rows() {
        let test = TestBuilder::new()
            .with_messaging_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();

        DirectMessageFactory::new(db, a.id, b.id).build().await.unwrap();
        DirectMessageFactory::new(db, a.id, b.id).build().await.unwrap();

        let service = DirectMessageService::new(db);
        assert_eq!(service.unread_count(b.id).await.unwrap(), 2);

        service.mark_conversation_read(b.id, a.id).await.unwrap();
        assert_eq!(service.unread_count(b.id).await.unwrap(), 0);
    }
}
