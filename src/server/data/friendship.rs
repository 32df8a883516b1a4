//! Friendship data repository for database operations.
//!
//! This module provides the `FriendshipRepository` for managing relationship
//! rows between users. Every pair query checks both orientations of the edge,
//! since either user may have created the row.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

use crate::server::{
    error::AppError,
    model::friendship::{Friendship, FriendshipStatus},
};

/// Builds a condition matching the unordered pair {a, b} in either
/// orientation.
fn pair_condition(a: i32, b: i32) -> Condition {
    Condition::any()
        .add(
            Condition::all()
                .add(entity::friendship::Column::RequesterId.eq(a))
                .add(entity::friendship::Column::AddresseeId.eq(b)),
        )
        .add(
            Condition::all()
                .add(entity::friendship::Column::RequesterId.eq(b))
                .add(entity::friendship::Column::AddresseeId.eq(a)),
        )
}

/// Builds a condition matching any edge touching `user_id`.
fn involves_condition(user_id: i32) -> Condition {
    Condition::any()
        .add(entity::friendship::Column::RequesterId.eq(user_id))
        .add(entity::friendship::Column::AddresseeId.eq(user_id))
}

/// Repository providing database operations for the social graph.
pub struct FriendshipRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FriendshipRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a PENDING row owned by `requester_id`.
    ///
    /// The caller is responsible for the pair-existence pre-check; the
    /// storage layer additionally enforces uniqueness on the unordered pair.
    ///
    /// # Arguments
    /// - `requester_id` - The user sending the request
    /// - `addressee_id` - The user receiving the request
    ///
    /// # Returns
    /// - `Ok(Friendship)` - The created row with generated id
    /// - `Err(AppError::DbErr)` - Insert failed (including pair-index violation)
    pub async fn create_pending(
        &self,
        requester_id: i32,
        addressee_id: i32,
    ) -> Result<Friendship, AppError> {
        let entity = entity::friendship::ActiveModel {
            requester_id: ActiveValue::Set(requester_id),
            addressee_id: ActiveValue::Set(addressee_id),
            status: ActiveValue::Set(FriendshipStatus::Pending.as_str().to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            accepted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Friendship::from_entity(entity)
    }

    /// Finds a friendship row by its id.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Friendship>, AppError> {
        let entity = entity::prelude::Friendship::find_by_id(id)
            .one(self.db)
            .await?;

        entity.map(Friendship::from_entity).transpose()
    }

    /// Finds the single row between two users, regardless of which side
    /// created it.
    pub async fn find_between(&self, a: i32, b: i32) -> Result<Option<Friendship>, AppError> {
        let entity = entity::prelude::Friendship::find()
            .filter(pair_condition(a, b))
            .one(self.db)
            .await?;

        entity.map(Friendship::from_entity).transpose()
    }

    /// Checks whether any row exists between the pair, in any status.
    pub async fn exists_between(&self, a: i32, b: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Friendship::find()
            .filter(pair_condition(a, b))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks whether the pair is currently ACCEPTED friends.
    pub async fn are_friends(&self, a: i32, b: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Friendship::find()
            .filter(pair_condition(a, b))
            .filter(entity::friendship::Column::Status.eq(FriendshipStatus::Accepted.as_str()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Returns the status of the pair's row, or `None` when no row exists.
    pub async fn status_between(
        &self,
        a: i32,
        b: i32,
    ) -> Result<Option<FriendshipStatus>, AppError> {
        Ok(self.find_between(a, b).await?.map(|f| f.status))
    }

    /// All ACCEPTED edges touching `user_id`.
    pub async fn accepted_for_user(&self, user_id: i32) -> Result<Vec<Friendship>, AppError> {
        let entities = entity::prelude::Friendship::find()
            .filter(involves_condition(user_id))
            .filter(entity::friendship::Column::Status.eq(FriendshipStatus::Accepted.as_str()))
            .all(self.db)
            .await?;

        entities.into_iter().map(Friendship::from_entity).collect()
    }

    /// PENDING requests sent by `user_id`.
    pub async fn sent_pending(&self, user_id: i32) -> Result<Vec<Friendship>, AppError> {
        let entities = entity::prelude::Friendship::find()
            .filter(entity::friendship::Column::RequesterId.eq(user_id))
            .filter(entity::friendship::Column::Status.eq(FriendshipStatus::Pending.as_str()))
            .all(self.db)
            .await?;

        entities.into_iter().map(Friendship::from_entity).collect()
    }

    /// PENDING requests received by `user_id`.
    pub async fn received_pending(&self, user_id: i32) -> Result<Vec<Friendship>, AppError> {
        let entities = entity::prelude::Friendship::find()
            .filter(entity::friendship::Column::AddresseeId.eq(user_id))
            .filter(entity::friendship::Column::Status.eq(FriendshipStatus::Pending.as_str()))
            .all(self.db)
            .await?;

        entities.into_iter().map(Friendship::from_entity).collect()
    }

    /// Rows where `user_id` is the blocking side.
    pub async fn blocked_by(&self, user_id: i32) -> Result<Vec<Friendship>, AppError> {
        let entities = entity::prelude::Friendship::find()
            .filter(entity::friendship::Column::RequesterId.eq(user_id))
            .filter(entity::friendship::Column::Status.eq(FriendshipStatus::Blocked.as_str()))
            .all(self.db)
            .await?;

        entities.into_iter().map(Friendship::from_entity).collect()
    }

    /// Number of ACCEPTED friends of `user_id`.
    pub async fn count_accepted(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Friendship::find()
            .filter(involves_condition(user_id))
            .filter(entity::friendship::Column::Status.eq(FriendshipStatus::Accepted.as_str()))
            .count(self.db)
            .await
    }

    /// Ids of all ACCEPTED friends of `user_id`, used to exclude existing
    /// friends from user search.
    pub async fn accepted_friend_ids(&self, user_id: i32) -> Result<Vec<i32>, AppError> {
        let friendships = self.accepted_for_user(user_id).await?;

        Ok(friendships
            .into_iter()
            .map(|f| f.counterpart_of(user_id))
            .collect())
    }

    /// Updates a row's status, optionally stamping the accepted timestamp.
    ///
    /// The first-transition-only rule for `accepted_at` lives in the service
    /// layer; this method writes exactly what it is given.
    ///
    /// # Arguments
    /// - `id` - Row to update
    /// - `status` - New status value
    /// - `accepted_at` - When `Some`, written to the accepted_at column
    ///
    /// # Returns
    /// - `Ok(Friendship)` - The updated row
    /// - `Err(AppError::NotFound)` - No row with that id
    pub async fn set_status(
        &self,
        id: i32,
        status: FriendshipStatus,
        accepted_at: Option<DateTime<Utc>>,
    ) -> Result<Friendship, AppError> {
        let entity = entity::prelude::Friendship::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Friend request not found".to_string()))?;

        let mut active_model: entity::friendship::ActiveModel = entity.into();
        active_model.status = ActiveValue::Set(status.as_str().to_string());
        if let Some(at) = accepted_at {
            active_model.accepted_at = ActiveValue::Set(Some(at));
        }

        let entity = active_model.update(self.db).await?;

        Friendship::from_entity(entity)
    }

    /// Rewrites an existing row as a block owned by `blocker_id`.
    ///
    /// Blocking is unilateral, so the requester side is forced to the blocker
    /// whichever way the edge originally pointed.
    pub async fn rewrite_as_block(&self, id: i32, blocker_id: i32, blocked_id: i32) -> Result<Friendship, AppError> {
        let entity = entity::prelude::Friendship::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Friendship not found".to_string()))?;

        let mut active_model: entity::friendship::ActiveModel = entity.into();
        active_model.requester_id = ActiveValue::Set(blocker_id);
        active_model.addressee_id = ActiveValue::Set(blocked_id);
        active_model.status = ActiveValue::Set(FriendshipStatus::Blocked.as_str().to_string());

        let entity = active_model.update(self.db).await?;

        Friendship::from_entity(entity)
    }

    /// Creates a BLOCKED row owned by `blocker_id` when no row exists yet.
    pub async fn create_block(&self, blocker_id: i32, blocked_id: i32) -> Result<Friendship, AppError> {
        let entity = entity::friendship::ActiveModel {
            requester_id: ActiveValue::Set(blocker_id),
            addressee_id: ActiveValue::Set(blocked_id),
            status: ActiveValue::Set(FriendshipStatus::Blocked.as_str().to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            accepted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Friendship::from_entity(entity)
    }

    /// Deletes a row by id.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Friendship::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes every edge touching `user_id`. Used during account removal.
    pub async fn delete_for_user(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::Friendship::delete_many()
            .filter(involves_condition(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
