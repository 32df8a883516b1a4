//! Friendship factory for creating relationship rows between test users.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating friendship rows with customizable status.
///
/// Requester and addressee ids are mandatory; the default status is
/// `"PENDING"` with no accepted timestamp.
pub struct FriendshipFactory<'a> {
    db: &'a DatabaseConnection,
    requester_id: i32,
    addressee_id: i32,
    status: String,
    accepted_at: Option<DateTime<Utc>>,
}

impl<'a> FriendshipFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, requester_id: i32, addressee_id: i32) -> Self {
        Self {
            db,
            requester_id,
            addressee_id,
            status: "PENDING".to_string(),
            accepted_at: None,
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn accepted_at(mut self, accepted_at: DateTime<Utc>) -> Self {
        self.accepted_at = Some(accepted_at);
        self
    }

    /// Builds and inserts the friendship row.
    pub async fn build(self) -> Result<entity::friendship::Model, DbErr> {
        entity::friendship::ActiveModel {
            requester_id: ActiveValue::Set(self.requester_id),
            addressee_id: ActiveValue::Set(self.addressee_id),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(Utc::now()),
            accepted_at: ActiveValue::Set(self.accepted_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an ACCEPTED friendship between two users, stamped now.
pub async fn create_accepted_friendship(
    db: &DatabaseConnection,
    requester_id: i32,
    addressee_id: i32,
) -> Result<entity::friendship::Model, DbErr> {
    FriendshipFactory::new(db, requester_id, addressee_id)
        .status("ACCEPTED")
        .accepted_at(Utc::now())
        .build()
        .await
}
