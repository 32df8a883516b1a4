//! Social-graph rules: requesting, accepting, rejecting, blocking and
//! searching.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{friendship::FriendshipRepository, user::UserRepository},
    error::AppError,
    model::{
        friendship::{FriendEntry, FriendRequestEntry, Friendship, FriendshipStatus},
        user::User,
    },
};

/// Upper bound on user search results.
const SEARCH_LIMIT: u64 = 20;

pub struct FriendshipService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FriendshipService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sends a friend request from `user_id` to `target_id`.
    ///
    /// Fails for self-requests and whenever any row already exists between
    /// the pair, in any status; a rejected or blocked pair can never
    /// re-request through this path.
    pub async fn send_request(
        &self,
        user_id: i32,
        target_id: i32,
    ) -> Result<FriendRequestEntry, AppError> {
        if user_id == target_id {
            return Err(AppError::BadRequest(
                "Cannot send a friend request to yourself".to_string(),
            ));
        }

        let users = UserRepository::new(self.db);
        users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let target = users
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Friend user not found".to_string()))?;

        let friendships = FriendshipRepository::new(self.db);
        if friendships.exists_between(user_id, target_id).await? {
            return Err(AppError::Conflict(
                "A relationship already exists between these users".to_string(),
            ));
        }

        let friendship = friendships.create_pending(user_id, target_id).await?;

        Ok(FriendRequestEntry {
            request_id: friendship.id,
            user: target,
            status: friendship.status,
            requested_at: friendship.created_at,
        })
    }

    /// Accepts a pending request. Only the addressee may accept, only from
    /// PENDING, and `accepted_at` is stamped on the first transition only.
    pub async fn accept_request(
        &self,
        request_id: i32,
        acting_user_id: i32,
    ) -> Result<FriendEntry, AppError> {
        let friendships = FriendshipRepository::new(self.db);
        let friendship = friendships
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Friend request not found".to_string()))?;

        if friendship.addressee_id != acting_user_id {
            return Err(AppError::Forbidden(
                "Only the receiver can accept this friend request".to_string(),
            ));
        }

        match friendship.status {
            FriendshipStatus::Pending => {}
            FriendshipStatus::Accepted => {
                return Err(AppError::Conflict(
                    "Friend request already accepted".to_string(),
                ))
            }
            FriendshipStatus::Rejected | FriendshipStatus::Blocked => {
                return Err(AppError::Conflict(
                    "This request can no longer be accepted".to_string(),
                ))
            }
        }

        let stamp = friendship.accepted_at.is_none().then(Utc::now);
        let accepted = friendships
            .set_status(request_id, FriendshipStatus::Accepted, stamp)
            .await?;

        let requester = UserRepository::new(self.db)
            .find_by_id(accepted.requester_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(FriendEntry {
            user: requester,
            status: accepted.status,
            friends_since: accepted.accepted_at,
        })
    }

    /// Rejects a pending request. Addressee-only; the row keeps existing and
    /// permits no further transitions.
    pub async fn reject_request(&self, request_id: i32, acting_user_id: i32) -> Result<(), AppError> {
        let friendships = FriendshipRepository::new(self.db);
        let friendship = friendships
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Friend request not found".to_string()))?;

        if friendship.addressee_id != acting_user_id {
            return Err(AppError::Forbidden(
                "Only the receiver can reject this friend request".to_string(),
            ));
        }

        if friendship.status != FriendshipStatus::Pending {
            return Err(AppError::Conflict(
                "Only pending requests can be rejected".to_string(),
            ));
        }

        friendships
            .set_status(request_id, FriendshipStatus::Rejected, None)
            .await?;

        Ok(())
    }

    /// Deletes the pair's row entirely, regardless of status.
    pub async fn remove_friend(&self, user_id: i32, friend_id: i32) -> Result<(), AppError> {
        let friendships = FriendshipRepository::new(self.db);
        let friendship = friendships
            .find_between(user_id, friend_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Friendship not found".to_string()))?;

        friendships.delete(friendship.id).await?;

        Ok(())
    }

    /// Unilaterally blocks a user: the pair's row is force-set to BLOCKED
    /// with `user_id` recorded as the blocking side, created when absent.
    pub async fn block_user(&self, user_id: i32, blocked_user_id: i32) -> Result<(), AppError> {
        if user_id == blocked_user_id {
            return Err(AppError::BadRequest("Cannot block yourself".to_string()));
        }

        let users = UserRepository::new(self.db);
        users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        users
            .find_by_id(blocked_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blocked user not found".to_string()))?;

        let friendships = FriendshipRepository::new(self.db);
        match friendships.find_between(user_id, blocked_user_id).await? {
            Some(existing) => {
                friendships
                    .rewrite_as_block(existing.id, user_id, blocked_user_id)
                    .await?;
            }
            None => {
                friendships.create_block(user_id, blocked_user_id).await?;
            }
        }

        Ok(())
    }

    /// Removes a block. Only the original blocker may unblock, and only when
    /// the row is actually BLOCKED.
    pub async fn unblock_user(&self, user_id: i32, blocked_user_id: i32) -> Result<(), AppError> {
        let friendships = FriendshipRepository::new(self.db);
        let friendship = friendships
            .find_between(user_id, blocked_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blocked relationship not found".to_string()))?;

        if friendship.requester_id != user_id {
            return Err(AppError::Forbidden("You didn't block this user".to_string()));
        }

        if friendship.status != FriendshipStatus::Blocked {
            return Err(AppError::Conflict("User is not blocked".to_string()));
        }

        friendships.delete(friendship.id).await?;

        Ok(())
    }

    /// All accepted friends of `user_id`.
    pub async fn friends(&self, user_id: i32) -> Result<Vec<FriendEntry>, AppError> {
        let friendships = FriendshipRepository::new(self.db)
            .accepted_for_user(user_id)
            .await?;

        let counterparts = self.load_counterparts(user_id, &friendships).await?;

        Ok(friendships
            .into_iter()
            .filter_map(|f| {
                let user = counterparts.get(&f.counterpart_of(user_id))?.clone();
                Some(FriendEntry {
                    user,
                    status: f.status,
                    friends_since: f.accepted_at,
                })
            })
            .collect())
    }

    /// Pending requests received by `user_id`, with the senders attached.
    pub async fn pending_requests(&self, user_id: i32) -> Result<Vec<FriendRequestEntry>, AppError> {
        let requests = FriendshipRepository::new(self.db)
            .received_pending(user_id)
            .await?;

        self.to_request_entries(user_id, requests).await
    }

    /// Pending requests sent by `user_id`, with the targets attached.
    pub async fn sent_requests(&self, user_id: i32) -> Result<Vec<FriendRequestEntry>, AppError> {
        let requests = FriendshipRepository::new(self.db)
            .sent_pending(user_id)
            .await?;

        self.to_request_entries(user_id, requests).await
    }

    /// Users blocked by `user_id`.
    pub async fn blocked_users(&self, user_id: i32) -> Result<Vec<FriendRequestEntry>, AppError> {
        let rows = FriendshipRepository::new(self.db).blocked_by(user_id).await?;

        self.to_request_entries(user_id, rows).await
    }

    /// Case-insensitive user search excluding the caller and their existing
    /// accepted friends, bounded to 20 results. Empty queries return nothing.
    pub async fn search_users(
        &self,
        query: &str,
        current_user_id: i32,
    ) -> Result<Vec<User>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut exclude = FriendshipRepository::new(self.db)
            .accepted_friend_ids(current_user_id)
            .await?;
        exclude.push(current_user_id);

        let users = UserRepository::new(self.db)
            .search(query, &exclude, SEARCH_LIMIT)
            .await?;

        Ok(users)
    }

    /// Whether the pair is currently ACCEPTED friends.
    pub async fn are_friends(&self, a: i32, b: i32) -> Result<bool, AppError> {
        Ok(FriendshipRepository::new(self.db).are_friends(a, b).await?)
    }

    /// Status of the pair's row; "NONE" when no row exists.
    pub async fn status_between(&self, a: i32, b: i32) -> Result<String, AppError> {
        let status = FriendshipRepository::new(self.db).status_between(a, b).await?;

        Ok(status
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "NONE".to_string()))
    }

    /// Loads the counterpart users of a set of edges into a lookup map.
    async fn load_counterparts(
        &self,
        user_id: i32,
        friendships: &[Friendship],
    ) -> Result<HashMap<i32, User>, AppError> {
        let ids: Vec<i32> = friendships
            .iter()
            .map(|f| f.counterpart_of(user_id))
            .collect();

        let users = UserRepository::new(self.db).find_by_ids(&ids).await?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }

    async fn to_request_entries(
        &self,
        user_id: i32,
        rows: Vec<Friendship>,
    ) -> Result<Vec<FriendRequestEntry>, AppError> {
        let counterparts = self.load_counterparts(user_id, &rows).await?;

        Ok(rows
            .into_iter()
            .filter_map(|f| {
                let user = counterparts.get(&f.counterpart_of(user_id))?.clone();
                Some(FriendRequestEntry {
                    request_id: f.id,
                    user,
                    status: f.status,
                    requested_at: f.created_at,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory::user::create_user};

    /// A fresh request creates exactly one PENDING row owned by the sender.
    #[tokio::test]
    async fn send_request_creates_pending_row() {
        let test = TestBuilder::new().with_social_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();

        let service = FriendshipService::new(db);
        let entry = service.send_request(a.id, b.id).await.unwrap();

        assert_eq!(entry.user.id, b.id);
        assert_eq!(entry.status, FriendshipStatus::Pending);

        let row = FriendshipRepository::new(db)
            .find_between(a.id, b.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.requester_id, a.id);
        assert_eq!(row.status, FriendshipStatus::Pending);
    }

    #[tokio::test]
    async fn send_request_rejects_self() {
        let test = TestBuilder::new().with_social_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();

        let service = FriendshipService::new(db);
        let result = service.send_request(a.id, a.id).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    /// A second request fails while any row exists, in either orientation
    /// and any status.
    #[tokio::test]
    async fn send_request_rejects_existing_pair() {
        let test = TestBuilder::new().with_social_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();

        let service = FriendshipService::new(db);
        service.send_request(a.id, b.id).await.unwrap();

        let again = service.send_request(a.id, b.id).await;
        assert!(matches!(again, Err(AppError::Conflict(_))));

        let reversed = service.send_request(b.id, a.id).await;
        assert!(matches!(reversed, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn accept_request_is_addressee_only() {
        let test = TestBuilder::new().with_social_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();

        let service = FriendshipService::new(db);
        let entry = service.send_request(a.id, b.id).await.unwrap();

        // The sender cannot accept their own request.
        let by_sender = service.accept_request(entry.request_id, a.id).await;
        assert!(matches!(by_sender, Err(AppError::Forbidden(_))));

        let accepted = service.accept_request(entry.request_id, b.id).await.unwrap();
        assert_eq!(accepted.status, FriendshipStatus::Accepted);
        assert!(accepted.friends_since.is_some());

        // Visible as ACCEPTED from both orderings.
        assert_eq!(service.status_between(a.id, b.id).await.unwrap(), "ACCEPTED");
        assert_eq!(service.status_between(b.id, a.id).await.unwrap(), "ACCEPTED");
    }

    #[tokio::test]
    async fn accept_request_rejects_double_accept() {
        let test = TestBuilder::new().with_social_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();

        let service = FriendshipService::new(db);
        let entry = service.send_request(a.id, b.id).await.unwrap();
        service.accept_request(entry.request_id, b.id).await.unwrap();

        let again = service.accept_request(entry.request_id, b.id).await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn rejected_request_permits_no_transitions() {
        let test = TestBuilder::new().with_social_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();

        let service = FriendshipService::new(db);
        let entry = service.send_request(a.id, b.id).await.unwrap();
        service.reject_request(entry.request_id, b.id).await.unwrap();

        let accept = service.accept_request(entry.request_id, b.id).await;
        assert!(matches!(accept, Err(AppError::Conflict(_))));

        // And the pair cannot re-request while the row exists.
        let resend = service.send_request(a.id, b.id).await;
        assert!(matches!(resend, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn remove_friend_deletes_row_of_any_status() {
        let test = TestBuilder::new().with_social_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();

        let service = FriendshipService::new(db);
        let entry = service.send_request(a.id, b.id).await.unwrap();
        service.reject_request(entry.request_id, b.id).await.unwrap();

        service.remove_friend(a.id, b.id).await.unwrap();
        assert_eq!(service.status_between(a.id, b.id).await.unwrap(), "NONE");

        // Removing again fails: the row no longer exists.
        let again = service.remove_friend(a.id, b.id).await;
        assert!(matches!(again, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn block_is_unilateral_and_recorded_on_the_blocker_side() {
        let test = TestBuilder::new().with_social_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();

        let service = FriendshipService::new(db);
        let entry = service.send_request(a.id, b.id).await.unwrap();
        service.accept_request(entry.request_id, b.id).await.unwrap();

        // B blocks A even though A created the original row.
        service.block_user(b.id, a.id).await.unwrap();

        let row = FriendshipRepository::new(db)
            .find_between(a.id, b.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.status, FriendshipStatus::Blocked);
        assert_eq!(row.requester_id, b.id);
    }

    #[tokio::test]
    async fn unblock_is_blocker_only_and_deletes_the_row() {
        let test = TestBuilder::new().with_social_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let a = create_user(db).await.unwrap();
        let b = create_user(db).await.unwrap();

        let service = FriendshipService::new(db);
        service.block_user(a.id, b.id).await.unwrap();

        let by_blocked = service.unblock_user(b.id, a.id).await;
        assert!(matches!(by_blocked, Err(AppError::Forbidden(_))));

        service.unblock_user(a.id, b.id).await.unwrap();
        assert_eq!(service.status_between(a.id, b.id).await.unwrap(), "NONE");
    }

    #[tokio::test]
    async fn search_excludes_self_and_accepted_friends() {
        let test = TestBuilder::new().with_social_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let me = test_utils::factory::user::UserFactory::new(db)
            .display_name("Explorer Prime")
            .build()
            .await
            .unwrap();
        let friend = test_utils::factory::user::UserFactory::new(db)
            .display_name("Explorer Friend")
            .build()
            .await
            .unwrap();
        let stranger = test_utils::factory::user::UserFactory::new(db)
            .display_name("Explorer Stranger")
            .build()
            .await
            .unwrap();
        test_utils::factory::friendship::create_accepted_friendship(db, me.id, friend.id)
            .await
            .unwrap();

        let service = FriendshipService::new(db);
        let results = service.search_users("explorer", me.id).await.unwrap();

        let ids: Vec<i32> = results.iter().map(|u| u.id).collect();
        assert!(ids.contains(&stranger.id));
        assert!(!ids.contains(&me.id));
        assert!(!ids.contains(&friend.id));
    }

    #[tokio::test]
    async fn search_with_blank_query_returns_nothing() {
        let test = TestBuilder::new().with_social_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let me = create_user(db).await.unwrap();

        let service = FriendshipService::new(db);
        let results = service.search_users("   ", me.id).await.unwrap();

        assert!(results.is_empty());
    }
}
