//! Per-group chat broadcast channels.
//!
//! One `tokio::sync::broadcast` channel per group id, created lazily on
//! first use. Publishing is fire-and-forget after the message is persisted:
//! no delivery acknowledgment, no backpressure beyond the channel capacity,
//! and lagging subscribers simply drop messages.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use crate::model::group_chat::GroupChatMessageDto;

/// Buffered messages per group channel before slow receivers start lagging.
const CHANNEL_CAPACITY: usize = 64;

#[derive(Clone, Default)]
pub struct ChatBroadcaster {
    channels: Arc<RwLock<HashMap<i32, broadcast::Sender<GroupChatMessageDto>>>>,
}

impl ChatBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to a group's channel, creating it on first use.
    pub async fn subscribe(&self, group_id: i32) -> broadcast::Receiver<GroupChatMessageDto> {
        if let Some(sender) = self.channels.read().await.get(&group_id) {
            return sender.subscribe();
        }

        let mut channels = self.channels.write().await;
        channels
            .entry(group_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Publishes a persisted message to the group's subscribers.
    ///
    /// A send error only means nobody is currently subscribed, which is not
    /// a failure.
    pub async fn publish(&self, group_id: i32, message: GroupChatMessageDto) {
        if let Some(sender) = self.channels.read().await.get(&group_id) {
            let _ = sender.send(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dto(group_id: i32, text: &str) -> GroupChatMessageDto {
        GroupChatMessageDto {
            id: 1,
            group_id,
            sender_id: 1,
            sender_name: "Sender".to_string(),
            sender_avatar: None,
            message: text.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn subscribers_receive_published_messages() {
        let broadcaster = ChatBroadcaster::new();
        let mut rx = broadcaster.subscribe(7).await;

        broadcaster.publish(7, dto(7, "hello")).await;

        let received = rx.recv().await.unwrap();
        assert_eq!(received.message, "hello");
    }

    #[tokio::test]
    async fn channels_are_isolated_per_group() {
        let broadcaster = ChatBroadcaster::new();
        let mut rx_a = broadcaster.subscribe(1).await;
        let _rx_b = broadcaster.subscribe(2).await;

        broadcaster.publish(2, dto(2, "for group two")).await;

        // Group 1's receiver sees nothing.
        assert!(matches!(
            rx_a.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let broadcaster = ChatBroadcaster::new();
        broadcaster.publish(99, dto(99, "into the void")).await;
    }
}
